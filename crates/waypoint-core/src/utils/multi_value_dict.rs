//! A dictionary that can hold multiple values per key.
//!
//! Query strings may repeat a key (`?tag=a&tag=b`); [`MultiValueDict`] keeps
//! every value in the order it was appended.

use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// A dictionary that maps keys to ordered lists of values.
///
/// [`get`](MultiValueDict::get) returns the **last** value for a key, while
/// [`get_list`](MultiValueDict::get_list) returns all of them.
///
/// # Examples
///
/// ```
/// use waypoint_core::utils::MultiValueDict;
///
/// let mut d = MultiValueDict::new();
/// d.append("color".to_string(), "red");
/// d.append("color".to_string(), "blue");
///
/// assert_eq!(d.get("color"), Some(&"blue"));
/// assert_eq!(d.get_list("color"), Some(&vec!["red", "blue"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueDict<K: Eq + Hash, V> {
    inner: HashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V> Default for MultiValueDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> MultiValueDict<K, V> {
    /// Creates an empty `MultiValueDict`.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Returns the **last** value associated with the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).and_then(|v| v.last())
    }

    /// Returns all values associated with the key, in insertion order.
    pub fn get_list<Q>(&self, key: &Q) -> Option<&Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Sets the value for a key, replacing any existing values.
    pub fn set(&mut self, key: K, value: V) {
        self.inner.insert(key, vec![value]);
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    /// Removes a key and returns all of its values.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> hash_map::Keys<'_, K, Vec<V>> {
        self.inner.keys()
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the dictionary contains no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the dictionary contains the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    /// Returns an iterator over (key, value-list) pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, K, Vec<V>> {
        self.inner.iter()
    }
}

impl<K: Eq + Hash, V> IntoIterator for MultiValueDict<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = hash_map::IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a MultiValueDict<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = hash_map::Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let d: MultiValueDict<String, String> = MultiValueDict::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut d = MultiValueDict::new();
        d.append("id", "tylermcginnis");
        d.append("id", "sarah_edo");
        d.append("id", "dan_abramov");

        assert_eq!(d.get(&"id"), Some(&"dan_abramov"));
        assert_eq!(
            d.get_list(&"id"),
            Some(&vec!["tylermcginnis", "sarah_edo", "dan_abramov"])
        );
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut d: MultiValueDict<String, String> = MultiValueDict::new();
        d.append("tab".to_string(), "settings".to_string());
        assert_eq!(d.get("tab").map(String::as_str), Some("settings"));
        assert!(d.contains_key("tab"));
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut d = MultiValueDict::new();
        d.append("k", "a");
        d.append("k", "b");
        d.set("k", "c");
        assert_eq!(d.get_list(&"k"), Some(&vec!["c"]));
    }

    #[test]
    fn test_remove() {
        let mut d = MultiValueDict::new();
        d.append("k", 1);
        d.append("k", 2);
        assert_eq!(d.remove(&"k"), Some(vec![1, 2]));
        assert!(d.is_empty());
        assert_eq!(d.remove(&"k"), None);
    }

    #[test]
    fn test_equality_ignores_key_order() {
        let mut a = MultiValueDict::new();
        a.append("x", 1);
        a.append("y", 2);
        let mut b = MultiValueDict::new();
        b.append("y", 2);
        b.append("x", 1);
        assert_eq!(a, b);

        b.append("x", 3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_iter() {
        let mut d = MultiValueDict::new();
        d.append("a", 1);
        d.append("a", 2);
        d.append("b", 3);

        let items: HashMap<_, _> = d.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(items.get("a"), Some(&vec![1, 2]));
        assert_eq!(items.get("b"), Some(&vec![3]));
    }
}

//! Query string dictionary for locations.
//!
//! [`QueryDict`] wraps [`MultiValueDict`](waypoint_core::utils::MultiValueDict)
//! so that repeated keys (`?id=a&id=b`) keep every value in order.

use waypoint_core::utils::MultiValueDict;

/// A dictionary of decoded query string parameters.
///
/// # Examples
///
/// ```
/// use waypoint_routing::QueryDict;
///
/// let qd = QueryDict::parse("name=tylermcginnis&name=sarah_edo&tab=repos");
/// assert_eq!(qd.get("name"), Some("sarah_edo"));
/// assert_eq!(
///     qd.get_list("name"),
///     Some(&vec!["tylermcginnis".to_string(), "sarah_edo".to_string()])
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    data: MultiValueDict<String, String>,
}

impl QueryDict {
    /// Creates an empty `QueryDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string (`"key1=val1&key2=val2"`, with or without a
    /// leading `?`).
    ///
    /// Keys and values are percent-decoded and `+` decodes to a space. A pair
    /// without `=` yields an empty value; empty pairs are skipped.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut data = MultiValueDict::new();

        for pair in query_string.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));

            data.append(percent_decode(key), percent_decode(value));
        }

        Self { data }
    }

    /// Returns the last value for the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns every value for the given key, in order.
    pub fn get_list(&self, key: &str) -> Option<&Vec<String>> {
        self.data.get_list(key)
    }

    /// Sets a single value for the key, replacing any existing values.
    pub fn set(&mut self, key: &str, value: &str) {
        self.data.set(key.to_string(), value.to_string());
    }

    /// Appends a value to the list for the key.
    pub fn append(&mut self, key: &str, value: &str) {
        self.data.append(key.to_string(), value.to_string());
    }

    /// Removes a key, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.data.remove(key)
    }

    /// Encodes the dictionary as a query string, without a leading `?`.
    ///
    /// Pairs are sorted so that equal dictionaries encode identically.
    pub fn urlencode(&self) -> String {
        let mut parts = Vec::new();

        for (key, values) in &self.data {
            for value in values {
                parts.push(format!("{}={}", percent_encode(key), percent_encode(value)));
            }
        }

        parts.sort();
        parts.join("&")
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryDict {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut qd = Self::new();
        for (key, value) in iter {
            qd.append(key, value);
        }
        qd
    }
}

fn percent_decode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let qd = QueryDict::new();
        assert!(qd.is_empty());
        assert_eq!(qd.len(), 0);
    }

    #[test]
    fn test_parse_leading_question_mark() {
        let qd = QueryDict::parse("?tab=settings");
        assert_eq!(qd.get("tab"), Some("settings"));
        assert!(!qd.contains_key("?tab"));
    }

    #[test]
    fn test_parse_repeated_keys() {
        let qd = QueryDict::parse("id=a&id=b&id=c");
        assert_eq!(qd.get("id"), Some("c"));
        assert_eq!(
            qd.get_list("id"),
            Some(&vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(qd.len(), 1);
    }

    #[test]
    fn test_parse_no_value_and_empty_pairs() {
        let qd = QueryDict::parse("flag&&key=");
        assert_eq!(qd.get("flag"), Some(""));
        assert_eq!(qd.get("key"), Some(""));
        assert_eq!(qd.len(), 2);
    }

    #[test]
    fn test_parse_decodes() {
        let qd = QueryDict::parse("q=hello%20world&city=New+York&e=%C3%A9");
        assert_eq!(qd.get("q"), Some("hello world"));
        assert_eq!(qd.get("city"), Some("New York"));
        assert_eq!(qd.get("e"), Some("é"));
    }

    #[test]
    fn test_set_append_remove() {
        let mut qd = QueryDict::new();
        qd.append("k", "a");
        qd.append("k", "b");
        qd.set("k", "c");
        assert_eq!(qd.get_list("k"), Some(&vec!["c".to_string()]));
        assert_eq!(qd.remove("k"), Some(vec!["c".to_string()]));
        assert!(qd.is_empty());
    }

    #[test]
    fn test_urlencode_sorted_and_escaped() {
        let mut qd = QueryDict::new();
        qd.append("name", "hello world");
        qd.append("a", "1");
        assert_eq!(qd.urlencode(), "a=1&name=hello%20world");
    }

    #[test]
    fn test_urlencode_reparses_equal() {
        let qd = QueryDict::parse("b=2&a=x%26y&a=z");
        assert_eq!(QueryDict::parse(&qd.urlencode()), qd);
    }

    #[test]
    fn test_from_iter() {
        let qd: QueryDict = [("sort", "name"), ("sort", "date")].into_iter().collect();
        assert_eq!(qd.get("sort"), Some("date"));
    }

    #[test]
    fn test_keys() {
        let qd = QueryDict::parse("a=1&b=2&c=3");
        let mut keys: Vec<_> = qd.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}

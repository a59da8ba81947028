//! Integration tests for the navigation controller.
//!
//! Tests cover: subscriber delivery, guards with declined and confirmed
//! prompts, state round-trips, going back, queueing behind a pending
//! confirmation, cancellation, scoped guard release on panic, redirects and
//! the history limit.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use waypoint_core::WaypointError;
use waypoint_navigation::guard::prompt;
use waypoint_navigation::{
    GuardDecision, NavigationAction, NavigationOutcome, NavigationState, Navigator,
};
use waypoint_routing::Location;
use waypoint_test::fixtures::{protected_navigator, survey_router};
use waypoint_test::{init_test_logging, DeferredConfirm, EventRecorder, ScriptedConfirm};

// ═════════════════════════════════════════════════════════════════════
// 1. Subscribers: exactly one notification per commit, none retroactive
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_subscriber_registered_after_push_sees_nothing_earlier() {
    init_test_logging();
    let navigator = Navigator::new();
    let before = EventRecorder::attach(&navigator);

    navigator.push("/a", None).await.unwrap();
    let after = EventRecorder::attach(&navigator);
    navigator.push("/b", None).await.unwrap();

    assert_eq!(before.paths(), vec!["/a", "/b"]);
    assert_eq!(after.paths(), vec!["/b"]);
}

#[tokio::test]
async fn test_aborted_navigation_notifies_nobody() {
    let navigator = Navigator::new();
    let recorder = EventRecorder::attach(&navigator);
    let _guard = navigator.block(|_, _| GuardDecision::block("stay"));

    navigator.push("/a", None).await.unwrap();
    assert!(recorder.is_empty());
}

// ═════════════════════════════════════════════════════════════════════
// 2. Guards and confirmation
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_always_blocking_guard_with_declining_confirm() {
    let navigator = Navigator::builder()
        .confirm(ScriptedConfirm::always(false))
        .build();
    let _guard = navigator.block(|_, _| GuardDecision::block("unsaved changes"));

    let before = navigator.current_location();
    let outcome = navigator.push("/other", None).await.unwrap();

    assert!(outcome.is_aborted());
    assert_eq!(navigator.current_location(), before);
    assert_eq!(navigator.state(), NavigationState::Idle);
}

#[tokio::test]
async fn test_survey_prompt_message_names_destination() {
    let confirm = ScriptedConfirm::new([false, true]);
    let navigator = Navigator::builder()
        .initial_path("/survey")
        .confirm(confirm.clone())
        .build();
    let router = survey_router();

    let guard = navigator.block(prompt(|to| format!("Are you sure you want to go to {}", to.path())));

    assert!(navigator.push("/settings", None).await.unwrap().is_aborted());
    assert_eq!(
        router.resolve_first(navigator.current_location().path()).unwrap().handler,
        "survey"
    );

    assert!(navigator.push("/settings", None).await.unwrap().is_committed());
    assert_eq!(
        confirm.messages(),
        vec![
            "Are you sure you want to go to /settings",
            "Are you sure you want to go to /settings"
        ]
    );
    drop(guard);
}

#[tokio::test]
async fn test_first_blocking_guard_decides_and_confirmation_skips_the_rest() {
    let confirm = ScriptedConfirm::always(true);
    let navigator = Navigator::builder().confirm(confirm.clone()).build();

    let _allow = navigator.block(|_, _| GuardDecision::Allow);
    let _first = navigator.block(|_, _| GuardDecision::block("first"));
    let _second = navigator.block(|_, _| GuardDecision::block("second"));

    assert!(navigator.push("/x", None).await.unwrap().is_committed());
    assert_eq!(confirm.messages(), vec!["first"]);
}

#[tokio::test]
async fn test_guard_applies_to_go_back() {
    let navigator = Navigator::new();
    navigator.push("/form", None).await.unwrap();

    let guard = navigator.block(|current, _| {
        if current.path() == "/form" {
            GuardDecision::block("discard form?")
        } else {
            GuardDecision::Allow
        }
    });

    assert!(navigator.go_back().await.unwrap().is_aborted());
    assert_eq!(navigator.current_location().path(), "/form");
    assert_eq!(navigator.history_len(), 1);

    drop(guard);
    assert!(navigator.go_back().await.unwrap().is_committed());
    assert_eq!(navigator.current_location().path(), "/");
}

// ═════════════════════════════════════════════════════════════════════
// 3. Round-trips and history
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_push_state_round_trip() {
    let navigator = Navigator::new();
    let state = json!({"from": {"pathname": "/notifications"}, "count": 3});

    navigator.push("/login/", Some(state.clone())).await.unwrap();

    let current = navigator.current_location();
    assert_eq!(current.path(), "/login");
    assert_eq!(current.state(), Some(&state));
}

#[tokio::test]
async fn test_root_path_is_kept() {
    let navigator = Navigator::builder().initial_path("/a").build();
    navigator.push("/", None).await.unwrap();
    assert_eq!(navigator.current_location().path(), "/");
}

#[tokio::test]
async fn test_go_back_after_two_pushes() {
    let navigator = Navigator::new();
    navigator.push("/first", None).await.unwrap();
    let before_second = navigator.current_location();
    navigator.push("/second", None).await.unwrap();

    let outcome = navigator.go_back().await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Committed(before_second.clone()));
    assert_eq!(navigator.current_location(), before_second);
}

#[tokio::test]
async fn test_go_back_without_history_is_always_an_error() {
    let navigator = Navigator::new();
    for _ in 0..2 {
        assert!(matches!(navigator.go_back().await, Err(WaypointError::NoHistory)));
    }

    navigator.push("/a", None).await.unwrap();
    navigator.go_back().await.unwrap();
    assert!(matches!(navigator.go_back().await, Err(WaypointError::NoHistory)));
    assert!(!navigator.can_go_back());
}

#[tokio::test]
async fn test_history_limit_evicts_oldest() {
    let navigator = Navigator::builder().history_limit(2).build();
    for path in ["/a", "/b", "/c"] {
        navigator.push(path, None).await.unwrap();
    }
    assert_eq!(navigator.history_len(), 2);

    navigator.go_back().await.unwrap();
    assert_eq!(navigator.current_location().path(), "/b");
    navigator.go_back().await.unwrap();
    assert_eq!(navigator.current_location().path(), "/a");
    assert!(navigator.go_back().await.is_err());
}

// ═════════════════════════════════════════════════════════════════════
// 4. Queueing behind a pending confirmation
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_second_navigation_waits_for_pending_confirmation() {
    init_test_logging();
    let confirm = DeferredConfirm::new();
    let navigator = Navigator::builder().confirm(confirm.clone()).build();
    let recorder = EventRecorder::attach(&navigator);
    let _guard = navigator.block(|_, to| {
        if to.path() == "/slow" {
            GuardDecision::block("slow down")
        } else {
            GuardDecision::Allow
        }
    });

    let slow = {
        let navigator = navigator.clone();
        tokio::spawn(async move { navigator.push("/slow", None).await })
    };
    let pending = confirm.next_prompt().await;
    assert_eq!(navigator.state(), NavigationState::AwaitingConfirmation);

    let fast = {
        let navigator = navigator.clone();
        tokio::spawn(async move { navigator.push("/fast", None).await })
    };
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(navigator.current_location().path(), "/");
    assert!(recorder.is_empty());

    pending.answer(true);
    assert!(slow.await.unwrap().unwrap().is_committed());
    assert!(fast.await.unwrap().unwrap().is_committed());

    assert_eq!(recorder.paths(), vec!["/slow", "/fast"]);
    assert_eq!(navigator.current_location().path(), "/fast");
    assert_eq!(navigator.state(), NavigationState::Idle);
}

#[tokio::test]
async fn test_cancelled_navigation_releases_the_queue() {
    let confirm = DeferredConfirm::new();
    let navigator = Navigator::builder().confirm(confirm.clone()).build();
    let _guard = navigator.block(|_, to| {
        if to.path() == "/slow" {
            GuardDecision::block("slow down")
        } else {
            GuardDecision::Allow
        }
    });

    let slow = {
        let navigator = navigator.clone();
        tokio::spawn(async move { navigator.push("/slow", None).await })
    };
    let pending = confirm.next_prompt().await;

    slow.abort();
    assert!(slow.await.unwrap_err().is_cancelled());
    assert_eq!(navigator.state(), NavigationState::Idle);

    // Answering after cancellation changes nothing.
    pending.answer(true);
    assert_eq!(navigator.current_location().path(), "/");

    assert!(navigator.push("/next", None).await.unwrap().is_committed());
    assert_eq!(navigator.current_location().path(), "/next");
}

#[tokio::test]
async fn test_concurrent_pushes_are_all_delivered_in_commit_order() {
    let navigator = Navigator::new();
    let recorder = EventRecorder::attach(&navigator);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let navigator = navigator.clone();
            tokio::spawn(async move { navigator.push(&format!("/page/{i}"), None).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_committed());
    }

    let paths = recorder.paths();
    assert_eq!(paths.len(), 8);
    assert_eq!(navigator.history_len(), 8);
    assert_eq!(paths.last().map(String::as_str), Some(navigator.current_location().path()));
    assert!(recorder.actions().iter().all(|a| *a == NavigationAction::Push));
}

// ═════════════════════════════════════════════════════════════════════
// 5. Scoped guards survive panics in their owner
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_guard_released_when_owner_panics() {
    let navigator = Navigator::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _guard = navigator.block(|_, _| GuardDecision::block("never leave"));
        assert_eq!(navigator.guard_count(), 1);
        panic!("view crashed while mounted");
    }));

    assert!(result.is_err());
    assert_eq!(navigator.guard_count(), 0);
    assert!(navigator.push("/elsewhere", None).await.unwrap().is_committed());
}

// ═════════════════════════════════════════════════════════════════════
// 6. Redirects
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_protected_route_redirects_to_login_with_from_state() {
    let authenticated = Arc::new(AtomicBool::new(false));
    let navigator = protected_navigator(authenticated.clone());
    let recorder = EventRecorder::attach(&navigator);

    navigator.push("/notifications", None).await.unwrap();

    let current = navigator.current_location();
    assert_eq!(current.path(), "/login");
    assert_eq!(current.state(), Some(&json!({"from": "/notifications"})));
    assert_eq!(recorder.paths(), vec!["/login"]);

    // Logging in sends the user back to where they came from.
    authenticated.store(true, Ordering::SeqCst);
    let from = current.state().and_then(|s| s["from"].as_str()).unwrap_or("/").to_string();
    navigator.replace(&from, None).await.unwrap();
    assert_eq!(navigator.current_location().path(), "/notifications");
    assert_eq!(navigator.history_len(), 1);
}

#[tokio::test]
async fn test_redirect_loop_fails_without_state_change() {
    let navigator = Navigator::builder()
        .max_redirects(4)
        .redirect(|l| (l.path() == "/a").then(|| Location::parse("/b")))
        .redirect(|l| (l.path() == "/b").then(|| Location::parse("/a")))
        .build();
    let recorder = EventRecorder::attach(&navigator);

    let err = navigator.push("/a", None).await.unwrap_err();
    assert!(matches!(
        err,
        WaypointError::RedirectLimitExceeded { limit: 4, .. }
    ));
    assert_eq!(navigator.current_location().path(), "/");
    assert!(recorder.is_empty());
    assert_eq!(navigator.state(), NavigationState::Idle);
}

#[tokio::test]
async fn test_redirects_do_not_apply_to_go_back() {
    let navigator = Navigator::builder()
        .redirect(|l| (l.path() == "/").then(|| Location::parse("/home")))
        .build();

    navigator.push("/about", None).await.unwrap();
    navigator.go_back().await.unwrap();
    assert_eq!(navigator.current_location().path(), "/");
}

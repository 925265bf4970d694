// Watcher tests: edge-triggered alert semantics and keep-alive
// failure tolerance.

mod common;

use common::{Call, MockChat, MockDest};
use kindling::watch::{poll_notes_once, poll_session_once, NoteWatcher};

// ============================================================
// NoteWatcher: pure edge detection
// ============================================================

#[test]
fn alert_fires_only_on_rising_edges() {
    // [false, false, true, true, false, true] -> alerts at indices 2 and 5.
    let mut watcher = NoteWatcher::new();
    let fired: Vec<bool> = [false, false, true, true, false, true]
        .into_iter()
        .map(|flag| watcher.observe(flag))
        .collect();

    assert_eq!(fired, vec![false, false, true, false, false, true]);
    assert_eq!(fired.iter().filter(|f| **f).count(), 2);
}

#[test]
fn steady_true_fires_once() {
    let mut watcher = NoteWatcher::new();
    let fires = [true, true, true, true]
        .into_iter()
        .filter(|&f| watcher.observe(f))
        .count();
    assert_eq!(fires, 1);
}

#[test]
fn steady_false_never_fires() {
    let mut watcher = NoteWatcher::new();
    assert!([false, false, false]
        .into_iter()
        .all(|f| !watcher.observe(f)));
}

// ============================================================
// poll_notes_once: fetch failures hold the previous state
// ============================================================

#[tokio::test]
async fn fetch_failure_keeps_edge_state_unchanged() {
    // true is observed, then a fetch fails, then true again: the error
    // iteration must not reset `prev`, so no second alert fires.
    let dest = MockDest::new();
    *dest.notes_script.lock().unwrap() = vec![Some(true), None, Some(true)];
    let chat = MockChat::new();
    let mut watcher = NoteWatcher::new();

    for _ in 0..3 {
        poll_notes_once(&dest, &chat, &mut watcher).await;
    }

    assert_eq!(chat.embeds.lock().unwrap().len(), 1);
    assert_eq!(chat.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failure_then_first_true_still_alerts() {
    let dest = MockDest::new();
    *dest.notes_script.lock().unwrap() = vec![Some(false), None, Some(true)];
    let chat = MockChat::new();
    let mut watcher = NoteWatcher::new();

    for _ in 0..3 {
        poll_notes_once(&dest, &chat, &mut watcher).await;
    }

    let titles = chat.embed_titles();
    assert_eq!(titles, vec!["new notifications"]);
    assert_eq!(dest.calls().len(), 3);
    assert!(dest.calls().iter().all(|c| *c == Call::HasNewNotes));
}

// ============================================================
// poll_session_once: failed refreshes are reported, never fatal
// ============================================================

#[tokio::test]
async fn failed_refresh_is_reported_and_next_tick_still_refreshes() {
    let dest = MockDest::new();
    *dest.refresh_script.lock().unwrap() = vec![false, true];
    let chat = MockChat::new();

    poll_session_once(&dest, &chat).await;
    poll_session_once(&dest, &chat).await;

    // The failure reached the chat sink once and did not stop the
    // second refresh from going out.
    let refreshes = dest
        .calls()
        .iter()
        .filter(|c| **c == Call::RefreshSession)
        .count();
    assert_eq!(refreshes, 2);

    let errors = chat.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("session refresh failed"));
}

#[tokio::test]
async fn successful_refresh_stays_silent() {
    let dest = MockDest::new();
    let chat = MockChat::new();

    poll_session_once(&dest, &chat).await;

    assert_eq!(dest.calls(), vec![Call::RefreshSession]);
    assert!(chat.errors.lock().unwrap().is_empty());
    assert!(chat.embeds.lock().unwrap().is_empty());
}

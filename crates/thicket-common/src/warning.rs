//! Stderr reporting for recovered markup errors.
//!
//! Every `ParseIssue` the HTML parser records is echoed here as a yellow line.
//! A page with a thousand stray `</span>`s still prints a single line for them.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Messages already echoed, keyed by `[component] message`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Echo a recovered markup error to stderr unless the same component already
/// reported the same message.
///
/// Returns whether the line was printed. Issues are still recorded on the
/// document either way; only the terminal echo is deduplicated.
///
/// ```ignore
/// let printed = warn_once("HTML Parser", "orphan closing tag </span> at byte 12");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Thicket {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Forget which messages were echoed, so the next document reports its own
/// issues from scratch.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

//! Parser diagnostics with colored terminal output.
//!
//! Provides deduplication so a malformed document that repeats the same
//! mistake a thousand times reports it once. Used by the tokenizer, the
//! tree builder and the tag registry.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Master switch; library users embedding the parser can silence stderr.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Report a diagnostic (prints once per unique component/message pair).
///
/// Messages are still recorded while output is disabled, so re-enabling
/// does not replay them.
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "Unexpected token [EndTag div] when in state [InBody]");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .map(|mut guard| guard.get_or_insert_with(HashSet::new).insert(key))
        .unwrap_or(false);

    if first_time && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{YELLOW}[Brindle {component}] ⚠ {message}{RESET}");
    }
}

/// Enable or disable printing of diagnostics.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns whether diagnostics are currently printed.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    if let Ok(mut guard) = WARNED.lock()
        && let Some(set) = guard.as_mut()
    {
        set.clear();
    }
}

/// Returns true if this exact diagnostic has already been reported.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .map(|guard| guard.as_ref().is_some_and(|set| set.contains(&key)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        set_enabled(false);
        warn_once("Test", "recorded once");
        assert!(was_warned("Test", "recorded once"));
        assert!(!was_warned("Test", "never sent"));
    }
}

//! Process-wide identifier interning.
//!
//! The v2 strategy compares branch-tip identifiers by pointer rather than by
//! string content once they've been interned, the way the original C engine
//! compares `htab`-interned `const char *` values. `Arc<str>` plays the role
//! of the interned handle here; `Arc::ptr_eq` is the equality the algorithms
//! actually rely on.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock, RwLock};

fn table() -> &'static RwLock<HashSet<Arc<str>>> {
    static TABLE: OnceLock<RwLock<HashSet<Arc<str>>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashSet::new()))
}

/// Intern `s`, returning a shared handle equal (by `Arc::ptr_eq`) to every
/// other handle interned for the same string content.
pub fn intern(s: &str) -> Arc<str> {
    if let Some(existing) = table().read().unwrap().get(s) {
        return Arc::clone(existing);
    }

    let mut guard = table().write().unwrap();
    if let Some(existing) = guard.get(s) {
        return Arc::clone(existing);
    }
    let handle: Arc<str> = Arc::from(s);
    guard.insert(Arc::clone(&handle));
    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_yields_pointer_equal_handles() {
        let a = intern("deadbeef");
        let b = intern("deadbeef");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn interning_different_strings_yields_distinct_handles() {
        let a = intern("abc123");
        let b = intern("def456");
        assert!(!Arc::ptr_eq(&a, &b));
    }
}

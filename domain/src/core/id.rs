//! Identifier generation.
//!
//! Ids look like `<prefix>-<millis>` (e.g. `channel-1718000000123`). Within one
//! generator the numeric part is strictly increasing, so two entities created
//! in the same millisecond still get distinct ids.

use chrono::Utc;

/// Monotonic id source for one workspace.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id with the given prefix.
    pub fn next(&mut self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        format!("{}-{}", prefix, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_prefixed() {
        let mut ids = IdGenerator::new();
        assert!(ids.next("server").starts_with("server-"));
        assert!(ids.next("msg").starts_with("msg-"));
    }

    #[test]
    fn test_ids_never_repeat() {
        let mut ids = IdGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next("channel")));
        }
    }
}

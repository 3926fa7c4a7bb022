//! Marking visibility rule.

/// Whether questions show marking, and whether that is held back until the
/// learner runs out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marking {
    pub is_enabled: bool,
    pub is_suppressed: bool,
}

impl Marking {
    pub fn new(is_enabled: bool, is_suppressed: bool) -> Self {
        Self {
            is_enabled,
            is_suppressed,
        }
    }

    /// Suppressed marking stays hidden while attempts remain.
    pub fn is_visible(&self, has_remaining: bool) -> bool {
        self.is_enabled && !(self.is_suppressed && has_remaining)
    }
}

impl Default for Marking {
    fn default() -> Self {
        Self::new(true, false)
    }
}

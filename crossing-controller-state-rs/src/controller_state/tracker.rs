/// Remembers the last value a task successfully pushed to its peripheral.
///
/// Poll tasks ask [`is_changed()`](Self::is_changed) every cycle and call
/// [`commit()`](Self::commit) only after the peripheral accepted the update.
/// A failed bus write therefore leaves the tracker untouched and the next
/// poll retries.
#[derive(Debug, Clone, Copy)]
pub struct ChangeTracker<T> {
    last: Option<T>,
}

impl<T> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Copy + PartialEq> ChangeTracker<T> {
    /// A tracker that has shown nothing yet; the first value is a change.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// `true` if `value` differs from the last committed value.
    pub fn is_changed(&self, value: T) -> bool {
        self.last != Some(value)
    }

    /// Record `value` as shown.
    pub fn commit(&mut self, value: T) {
        self.last = Some(value);
    }

    /// Last committed value.
    pub fn last(&self) -> Option<T> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller_state::LightPhase;

    #[test]
    fn first_value_is_a_change() {
        let tracker: ChangeTracker<LightPhase> = ChangeTracker::new();
        assert!(tracker.is_changed(LightPhase::Green));
        assert_eq!(tracker.last(), None);
    }

    #[test]
    fn committed_value_is_not_a_change() {
        let mut tracker = ChangeTracker::new();
        tracker.commit(LightPhase::Red);
        assert!(!tracker.is_changed(LightPhase::Red));
        assert!(tracker.is_changed(LightPhase::Green));
    }

    #[test]
    fn uncommitted_change_stays_pending() {
        let mut tracker = ChangeTracker::new();
        tracker.commit(LightPhase::Green);
        // Peripheral write failed, nothing committed.
        assert!(tracker.is_changed(LightPhase::Yellow));
        assert!(tracker.is_changed(LightPhase::Yellow));
        tracker.commit(LightPhase::Yellow);
        assert!(!tracker.is_changed(LightPhase::Yellow));
    }
}

//! Debounce guard and configuration.

use embassy_time::{Duration, Instant};

/// Which events suppress each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceScope {
    /// One guard for every pin. A press on one button inside the guard
    /// window suppresses a press on any other button.
    #[default]
    Shared,
    /// Every pin has its own guard.
    PerPin,
}

/// Debounce settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Minimum time between two accepted events. Default: 200 ms.
    pub guard_interval_ms: u64,
    /// Default: [`DebounceScope::Shared`].
    pub scope: DebounceScope,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            guard_interval_ms: 200,
            scope: DebounceScope::Shared,
        }
    }
}

/// Last accepted event time plus the re-arm interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceGuard {
    last_accepted: Option<Instant>,
    interval: Duration,
}

impl DebounceGuard {
    /// A guard that accepts its first event unconditionally.
    pub const fn new(interval: Duration) -> Self {
        Self {
            last_accepted: None,
            interval,
        }
    }

    /// Accept `timestamp` if at least one interval has passed since the last
    /// accepted event.
    ///
    /// `last_accepted` only moves on acceptance, so a burst of bounces
    /// cannot keep pushing the window forward. A timestamp earlier than the
    /// last accepted one is rejected.
    pub fn accept(&mut self, timestamp: Instant) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => timestamp
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed >= self.interval),
        };
        if accepted {
            self.last_accepted = Some(timestamp);
        }
        accepted
    }

    /// Timestamp of the last accepted event.
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// The re-arm interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn default_config_values() {
        let c = DebounceConfig::default();
        assert_eq!(c.guard_interval_ms, 200);
        assert_eq!(c.scope, DebounceScope::Shared);
    }

    #[test]
    fn first_event_is_accepted() {
        let mut guard = DebounceGuard::new(Duration::from_millis(200));
        assert!(guard.accept(at(0)));
        assert_eq!(guard.last_accepted(), Some(at(0)));
    }

    #[test]
    fn event_inside_window_is_rejected() {
        let mut guard = DebounceGuard::new(Duration::from_millis(200));
        assert!(guard.accept(at(1000)));
        assert!(!guard.accept(at(1199)));
        assert_eq!(guard.last_accepted(), Some(at(1000)));
    }

    #[test]
    fn event_at_window_edge_is_accepted() {
        let mut guard = DebounceGuard::new(Duration::from_millis(200));
        assert!(guard.accept(at(1000)));
        assert!(guard.accept(at(1200)));
    }

    #[test]
    fn rejected_events_do_not_extend_window() {
        let mut guard = DebounceGuard::new(Duration::from_millis(200));
        assert!(guard.accept(at(0)));
        assert!(!guard.accept(at(100)));
        assert!(!guard.accept(at(190)));
        assert!(guard.accept(at(200)));
    }

    #[test]
    fn timestamp_before_last_is_rejected() {
        let mut guard = DebounceGuard::new(Duration::from_millis(200));
        assert!(guard.accept(at(5000)));
        assert!(!guard.accept(at(1000)));
    }
}

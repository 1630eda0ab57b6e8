use std::time::{Duration, Instant};

/// How the gap to the previous accepted event is compared against the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GapRule {
    /// Accept once `gap >= window`.
    AtLeast,
    /// Accept only once `gap > window`.
    Beyond,
}

/// Time gate that accepts an event only if enough time passed since the last
/// accepted one. Rejected events do not move the gate.
#[derive(Debug, Clone)]
pub(crate) struct Debounce {
    window: Duration,
    rule: GapRule,
    last_accepted: Option<Instant>,
}

impl Debounce {
    pub(crate) fn new(window: Duration, rule: GapRule) -> Self {
        Self {
            window,
            rule,
            last_accepted: None,
        }
    }

    /// Accept `now` and remember it, or reject and leave the gate untouched.
    ///
    /// An instant earlier than the last accepted one counts as a zero gap.
    pub(crate) fn try_accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            let gap = now.saturating_duration_since(last);
            let open = match self.rule {
                GapRule::AtLeast => gap >= self.window,
                GapRule::Beyond => gap > self.window,
            };
            if !open {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_event_is_always_accepted() {
        let mut gate = Debounce::new(5 * MS, GapRule::AtLeast);
        assert!(gate.try_accept(Instant::now()));
    }

    #[test]
    fn at_least_accepts_exact_window() {
        let t0 = Instant::now();
        let mut gate = Debounce::new(5 * MS, GapRule::AtLeast);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + 4 * MS));
        assert!(gate.try_accept(t0 + 5 * MS));
    }

    #[test]
    fn beyond_rejects_exact_window() {
        let t0 = Instant::now();
        let mut gate = Debounce::new(MS, GapRule::Beyond);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + MS));
        assert!(gate.try_accept(t0 + 2 * MS));
    }

    #[test]
    fn rejection_does_not_extend_window() {
        let t0 = Instant::now();
        let mut gate = Debounce::new(5 * MS, GapRule::AtLeast);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + 3 * MS));
        assert!(gate.try_accept(t0 + 6 * MS));
        assert!(!gate.try_accept(t0 + 9 * MS));
        assert!(gate.try_accept(t0 + 11 * MS));
    }

    #[test]
    fn earlier_instant_is_rejected() {
        let t0 = Instant::now() + 10 * MS;
        let mut gate = Debounce::new(5 * MS, GapRule::AtLeast);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 - 8 * MS));
    }
}

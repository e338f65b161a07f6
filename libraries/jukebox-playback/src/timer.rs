//! Deterministic periodic timers
//!
//! Timers never read a wall clock. The owner passes the current virtual time
//! in, which lets tests step time exactly and lets the desktop driver feed
//! measured elapsed time.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Periodic timer on a virtual clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    period: Duration,
    next_due: Option<Duration>,
}

impl Timer {
    /// Create a stopped timer (periods below 1ms are raised to 1ms)
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_due: None,
        }
    }

    /// Start (or restart) the timer; first firing is one period after `now`
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    /// Cancel the timer
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Check whether the timer is scheduled
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Virtual time of the next firing
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Timer period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fire once if the deadline has passed, scheduling the next deadline
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = Timer::new(ms(50));
        assert!(!timer.is_running());
        assert!(!timer.fire_if_due(ms(10_000)));
    }

    #[test]
    fn fires_once_per_period() {
        let mut timer = Timer::new(ms(50));
        timer.start(ms(100));

        assert!(!timer.fire_if_due(ms(149)));
        assert!(timer.fire_if_due(ms(150)));
        assert!(!timer.fire_if_due(ms(150)));
        assert_eq!(timer.next_due(), Some(ms(200)));
    }

    #[test]
    fn catches_up_one_firing_at_a_time() {
        let mut timer = Timer::new(ms(10));
        timer.start(ms(0));

        let mut fired = 0;
        while timer.fire_if_due(ms(35)) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn restart_resets_deadline() {
        let mut timer = Timer::new(ms(1000));
        timer.start(ms(0));
        timer.start(ms(700));

        assert_eq!(timer.next_due(), Some(ms(1700)));
    }

    #[test]
    fn stop_cancels() {
        let mut timer = Timer::new(ms(10));
        timer.start(ms(0));
        timer.stop();

        assert!(!timer.is_running());
        assert_eq!(timer.next_due(), None);
    }

    #[test]
    fn zero_period_is_raised() {
        let timer = Timer::new(Duration::ZERO);
        assert_eq!(timer.period(), ms(1));
    }
}

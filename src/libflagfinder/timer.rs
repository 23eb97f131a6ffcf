use std::time::{Duration, Instant};

/// Deadline-based countdown. The front ends poll it: the CLI through a
/// bounded receive on its input channel, the GUI once per repaint.
/// `poll` reports expiry exactly once per `start`.
#[derive(Debug)]
pub struct CountdownTimer {
    duration: Duration,
    deadline: Option<Instant>,
    fired: bool,
}

impl CountdownTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: Duration::from_secs(u64::from(duration_secs)),
            deadline: None,
            fired: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now())
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    fn start_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
        self.fired = false;
    }

    fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline && !self.fired => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_while_running() {
        let mut timer = CountdownTimer::new(30);
        assert!(!timer.running());
        assert_eq!(timer.remaining(), None);

        let start = Instant::now();
        timer.start_at(start);
        assert!(timer.running());
        let remaining = timer
            .remaining_at(start + Duration::from_secs(10))
            .unwrap();
        assert_eq!(remaining, Duration::from_secs(20));
    }

    #[test]
    fn fires_exactly_once() {
        let mut timer = CountdownTimer::new(5);
        let start = Instant::now();
        timer.start_at(start);

        assert!(!timer.poll_at(start + Duration::from_secs(4)));
        assert!(timer.poll_at(start + Duration::from_secs(5)));
        assert!(!timer.poll_at(start + Duration::from_secs(6)));
    }

    #[test]
    fn stop_pauses_and_restart_rearms() {
        let mut timer = CountdownTimer::new(5);
        let start = Instant::now();
        timer.start_at(start);
        timer.stop();
        assert!(!timer.running());
        assert!(!timer.poll_at(start + Duration::from_secs(10)));

        let restart = start + Duration::from_secs(20);
        timer.start_at(restart);
        assert!(timer.poll_at(restart + Duration::from_secs(5)));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let mut timer = CountdownTimer::new(1);
        let start = Instant::now();
        timer.start_at(start);
        let remaining = timer
            .remaining_at(start + Duration::from_secs(30))
            .unwrap();
        assert_eq!(remaining, Duration::ZERO);
    }
}

//! Activation delay of freshly spawned items.


/// Default delay before an item can be picked, one simulation time unit. This prevents
/// an item from being picked up on the very frame it was spawned.
pub const ACTIVATION_DELAY: f64 = 1.0;


/// A single-shot accumulator, once elapsed it no longer accumulates time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationTimer {
    /// Time accumulated since construction.
    elapsed: f64,
    /// Time to accumulate before being elapsed.
    threshold: f64,
}

impl ActivationTimer {

    pub fn new(threshold: f64) -> Self {
        Self {
            elapsed: 0.0,
            threshold,
        }
    }

    /// Get the time accumulated so far.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return true once enough time has been accumulated.
    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.elapsed >= self.threshold
    }

    /// Accumulate the given delta time, returning true only on the call that makes this
    /// timer elapse. Calls made after that are ignored.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.is_elapsed() {
            return false;
        }
        // Negative deltas never rewind the timer.
        self.elapsed += dt.max(0.0);
        self.is_elapsed()
    }

}

impl Default for ActivationTimer {
    fn default() -> Self {
        Self::new(ACTIVATION_DELAY)
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn single_shot() {

        let mut timer = ActivationTimer::new(1.0);
        assert!(!timer.is_elapsed());

        assert!(!timer.advance(0.25));
        assert!(!timer.advance(0.25));
        assert!(!timer.advance(0.25));
        assert!(!timer.is_elapsed());

        assert!(timer.advance(0.25));
        assert!(timer.is_elapsed());

        // Already elapsed, nothing accumulates anymore.
        assert!(!timer.advance(10.0));
        assert_eq!(timer.elapsed(), 1.0);

    }

    #[test]
    fn frame_rate_independent() {

        let mut slow = ActivationTimer::new(1.0);
        let mut fast = ActivationTimer::new(1.0);

        assert!(slow.advance(1.0));

        let mut ticks = 0;
        while !fast.advance(0.125) {
            ticks += 1;
        }
        assert_eq!(ticks, 7);

    }

    #[test]
    fn zero_threshold() {
        let mut timer = ActivationTimer::new(0.0);
        assert!(timer.is_elapsed());
        assert!(!timer.advance(1.0));
    }

    #[test]
    fn negative_delta() {
        let mut timer = ActivationTimer::default();
        assert!(!timer.advance(-5.0));
        assert_eq!(timer.elapsed(), 0.0);
    }

}

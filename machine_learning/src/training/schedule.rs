/// Shrink factor applied to the learning rate whenever the success count improves.
pub const DECAY: f64 = 0.85;

/// Growth factor applied to the learning rate when the success count stagnates.
pub const BOOST: f64 = 1.5;

/// The boosted learning rate never goes above `BOOST_CAP` times the base rate.
pub const BOOST_CAP: f64 = 2.;

/// Stagnant iterations between two boosts.
pub const BOOST_PERIOD: usize = 50;

/// Adapts the learning rate to the success count of every training iteration.
///
/// Improvements decay the rate back towards the base rate, long plateaus periodically
/// boost it to shake the network out of them.
#[derive(Debug, Clone)]
pub struct LearningRateSchedule {
    base: f64,
    current: f64,
    best_success: usize,
    stagnant: usize,
}

impl LearningRateSchedule {
    /// Creates a new `LearningRateSchedule` starting at `base`.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            current: base,
            best_success: 0,
            stagnant: 0,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.current
    }

    /// The amount of consecutive iterations without improvement.
    pub fn stagnant(&self) -> usize {
        self.stagnant
    }

    /// Feeds the success count of the last iteration.
    ///
    /// # Returns
    /// The learning rate for the next iteration.
    pub fn step(&mut self, success: usize) -> f64 {
        if success <= self.best_success {
            self.stagnant += 1;
        } else {
            self.best_success = success;
            self.stagnant = 0;
            self.current = (self.current * DECAY).max(self.base);
        }

        if self.should_boost() {
            self.current = (self.current * BOOST).min(self.base * BOOST_CAP);
        }

        self.current
    }

    #[inline]
    fn should_boost(&self) -> bool {
        self.stagnant > 1 && self.stagnant % BOOST_PERIOD == 1
    }
}

//! Result-screen feedback: tier selection and the animation clock.

/// Feedback shown on the result screen, chosen from the score percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTier {
    /// Every answer correct.
    Perfect,
    /// At least 70%.
    Good,
    Encourage,
}

impl FeedbackTier {
    pub const GOOD_THRESHOLD: f64 = 70.0;

    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            FeedbackTier::Perfect
        } else if percentage >= Self::GOOD_THRESHOLD {
            FeedbackTier::Good
        } else {
            FeedbackTier::Encourage
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "Perfect score, outstanding!",
            FeedbackTier::Good => "Great work, keep it up!",
            FeedbackTier::Encourage => "Keep practising, next time will be better!",
        }
    }
}

/// Percentage with one decimal, as shown on the result screen.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}", percentage)
}

/// Elapsed-time counter driving the looping result animations.
///
/// Advanced once per frame by `dt * speed`; at the default speed of 3.0 a
/// 60 fps frame advances it by 0.05.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    time: f32,
    speed: f32,
}

impl AnimationClock {
    pub const DEFAULT_SPEED: f32 = 3.0;

    pub fn new(speed: f32) -> Self {
        Self { time: 0.0, speed }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        self.time += dt_seconds.max(0.0) * self.speed;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED)
    }
}

use serde::{Deserialize, Serialize};

/// Point rules for human validations, shared by the API and review sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    pub points_per_validation: u32,
    pub accuracy_bonus: u32,
    pub streak_bonus: u32,
    /// Streak length that earns `streak_bonus`; zero disables streak rewards.
    pub streak_interval: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            points_per_validation: 5,
            accuracy_bonus: 5,
            streak_bonus: 10,
            streak_interval: 5,
        }
    }
}

impl RewardPolicy {
    /// Points for a single validation, ignoring streaks.
    pub fn points_for(&self, is_accurate: bool) -> u32 {
        if is_accurate {
            self.points_per_validation + self.accuracy_bonus
        } else {
            self.points_per_validation
        }
    }

    fn streak_reward(&self, streak: u32) -> u32 {
        if self.streak_interval > 0 && streak > 0 && streak % self.streak_interval == 0 {
            self.streak_bonus
        } else {
            0
        }
    }
}

/// Rep tier derived from accumulated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl RepLevel {
    pub fn for_points(points: u32) -> Self {
        match points {
            0..=499 => RepLevel::Bronze,
            500..=999 => RepLevel::Silver,
            1000..=1999 => RepLevel::Gold,
            _ => RepLevel::Platinum,
        }
    }

    /// Points needed to leave this tier; platinum reports its own display ceiling.
    pub fn next_threshold(self) -> u32 {
        match self {
            RepLevel::Bronze => 500,
            RepLevel::Silver => 1000,
            RepLevel::Gold => 2000,
            RepLevel::Platinum => 5000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepLevel::Bronze => "bronze",
            RepLevel::Silver => "silver",
            RepLevel::Gold => "gold",
            RepLevel::Platinum => "platinum",
        }
    }
}

/// Gamification state for one sales development rep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepProfile {
    pub name: String,
    pub points: u32,
    /// Share of validations where the AI score was judged accurate, in percent.
    pub accuracy: u8,
    pub streak: u32,
    pub level: RepLevel,
    pub total_validations: u32,
    pub correct_validations: u32,
}

impl RepProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0,
            accuracy: 0,
            streak: 0,
            level: RepLevel::Bronze,
            total_validations: 0,
            correct_validations: 0,
        }
    }

    /// Next profile after one validation, plus the points it earned.
    pub fn record_validation(&self, is_accurate: bool, policy: &RewardPolicy) -> (Self, u32) {
        let total_validations = self.total_validations + 1;
        let correct_validations = self.correct_validations + u32::from(is_accurate);
        let streak = if is_accurate { self.streak + 1 } else { 0 };

        let mut awarded = policy.points_for(is_accurate);
        if is_accurate {
            awarded += policy.streak_reward(streak);
        }

        let points = self.points + awarded;
        let accuracy =
            (f64::from(correct_validations) * 100.0 / f64::from(total_validations)).round() as u8;

        let next = Self {
            name: self.name.clone(),
            points,
            accuracy,
            streak,
            level: RepLevel::for_points(points),
            total_validations,
            correct_validations,
        };
        (next, awarded)
    }

    /// Fractional progress toward the next tier, capped at 1.0.
    pub fn level_progress(&self) -> f64 {
        (f64::from(self.points) / f64::from(self.level.next_threshold())).min(1.0)
    }
}

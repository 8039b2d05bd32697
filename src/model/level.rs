use std::fmt;

use serde::Serialize;

pub const EXCELLENT_MIN: f64 = 9.0;
pub const GOOD_MIN: f64 = 7.5;
pub const ADEQUATE_MIN: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    NeedsImprovement,
    Adequate,
    Good,
    Excellent,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Excellent => "excellent",
            Level::Good => "good",
            Level::Adequate => "adequate",
            Level::NeedsImprovement => "needs_improvement",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier for a score. Thresholds are checked highest-first and a boundary
/// value belongs to the higher tier. Out-of-range input lands in the nearest
/// end tier; NaN is treated as the lowest tier.
pub fn classify(score: f64) -> Level {
    if score >= EXCELLENT_MIN {
        Level::Excellent
    } else if score >= GOOD_MIN {
        Level::Good
    } else if score >= ADEQUATE_MIN {
        Level::Adequate
    } else {
        Level::NeedsImprovement
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/level.rs"]
mod tests;

//! Fixed display bands over backend-computed scores.
//!
//! The client never computes a score; these only decide how one is shown.
//! Every band has a closed lower bound (a score of exactly 85 is `Up`).

pub const UP_THRESHOLD: f64 = 85.0;
pub const FLAT_THRESHOLD: f64 = 70.0;
pub const AVERAGE_THRESHOLD: f64 = 50.0;

pub const GPA_MAX: f64 = 40.0;
pub const EXPERIENCE_MAX: f64 = 40.0;
pub const IMPACT_QUALITY_MAX: f64 = 20.0;

/// Trend arrow shown beside a score in the resume table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreIndicator {
    Up,
    Flat,
    Down,
}

impl ScoreIndicator {
    pub fn for_score(score: f64) -> Self {
        match score {
            s if s >= UP_THRESHOLD => ScoreIndicator::Up,
            s if s >= FLAT_THRESHOLD => ScoreIndicator::Flat,
            _ => ScoreIndicator::Down,
        }
    }

    /// Missing scores (still pending) are shown as 0.
    pub fn for_optional(score: Option<f64>) -> Self {
        Self::for_score(score.unwrap_or(0.0))
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ScoreIndicator::Up => "↑",
            ScoreIndicator::Flat => "→",
            ScoreIndicator::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Recommendation {
    pub fn for_score(score: f64) -> Self {
        match score {
            s if s >= UP_THRESHOLD => Recommendation::Excellent,
            s if s >= FLAT_THRESHOLD => Recommendation::Good,
            s if s >= AVERAGE_THRESHOLD => Recommendation::Average,
            _ => Recommendation::Poor,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Recommendation::Excellent => "Excellent candidate - Highly recommended",
            Recommendation::Good => "Good candidate - Recommended",
            Recommendation::Average => "Average candidate - Considerable",
            Recommendation::Poor => "Poor candidate - Not recommended",
        }
    }
}

/// One sub-score of the breakdown card, measured against its fixed maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionBar {
    pub label: &'static str,
    pub value: Option<f64>,
    pub max: f64,
}

impl ContributionBar {
    pub fn gpa(value: Option<f64>) -> Self {
        Self { label: "GPA", value, max: GPA_MAX }
    }

    pub fn experience(value: Option<f64>) -> Self {
        Self { label: "Experience", value, max: EXPERIENCE_MAX }
    }

    pub fn impact_quality(value: Option<f64>) -> Self {
        Self { label: "Impact Quality", value, max: IMPACT_QUALITY_MAX }
    }

    /// Fill ratio in [0, 1]; a missing value is an empty bar.
    pub fn fraction(&self) -> f64 {
        match self.value {
            Some(v) if self.max > 0.0 => (v / self.max).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

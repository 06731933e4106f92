//! Creator-to-campaign fit scores and their banding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How well one creator fits a campaign. Scores are fractions in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default)]
    pub behavioral: Option<f64>,
    #[serde(default)]
    pub emotional: Option<f64>,
    #[serde(default)]
    pub semantic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_views: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMetric {
    Overall,
    Behavioral,
    Emotional,
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FitLevel {
    Low,
    Medium,
    High,
}

impl FitLevel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            FitLevel::High
        } else if score >= 0.5 {
            FitLevel::Medium
        } else {
            FitLevel::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FitLevel::High => "High",
            FitLevel::Medium => "Medium",
            FitLevel::Low => "Low",
        }
    }
}

impl std::str::FromStr for FitLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(FitLevel::High),
            "medium" => Ok(FitLevel::Medium),
            "low" => Ok(FitLevel::Low),
            other => Err(format!("unknown fit level \"{other}\"")),
        }
    }
}

impl std::str::FromStr for FitMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overall" => Ok(FitMetric::Overall),
            "behavioral" => Ok(FitMetric::Behavioral),
            "emotional" => Ok(FitMetric::Emotional),
            "semantic" => Ok(FitMetric::Semantic),
            other => Err(format!("unknown fit metric \"{other}\"")),
        }
    }
}

impl CreatorMatch {
    /// Mean of the three scores, with missing scores counted as zero.
    #[must_use]
    pub fn overall(&self) -> f64 {
        let sum = self.behavioral.unwrap_or(0.0)
            + self.emotional.unwrap_or(0.0)
            + self.semantic.unwrap_or(0.0);
        sum / 3.0
    }

    #[must_use]
    pub fn score(&self, metric: FitMetric) -> f64 {
        match metric {
            FitMetric::Overall => self.overall(),
            FitMetric::Behavioral => self.behavioral.unwrap_or(0.0),
            FitMetric::Emotional => self.emotional.unwrap_or(0.0),
            FitMetric::Semantic => self.semantic.unwrap_or(0.0),
        }
    }

    #[must_use]
    pub fn level(&self, metric: FitMetric) -> FitLevel {
        FitLevel::from_score(self.score(metric))
    }
}

/// Score as a whole percentage, rounded half away from zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Creators whose `metric` band equals `level`; `None` keeps everyone.
#[must_use]
pub fn filter_creators(
    creators: &[CreatorMatch],
    metric: FitMetric,
    level: Option<FitLevel>,
) -> Vec<&CreatorMatch> {
    creators
        .iter()
        .filter(|c| level.is_none_or(|wanted| c.level(metric) == wanted))
        .collect()
}

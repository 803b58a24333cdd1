use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Bands are inclusive on their upper end; only an exact zero is `None`.
    pub fn from_score(score: f64) -> Self {
        if score <= 0.0 {
            Self::None
        } else if score <= 3.9 {
            Self::Low
        } else if score <= 6.9 {
            Self::Medium
        } else if score <= 8.9 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display token for each severity, plus the one used while unscored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub none: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    pub critical: String,
    pub unscored: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            none: "#53b1a0".to_string(),
            low: "#f5c542".to_string(),
            medium: "#f59b42".to_string(),
            high: "#e85d3a".to_string(),
            critical: "#cc2936".to_string(),
            unscored: "#8892a0".to_string(),
        }
    }
}

impl Palette {
    pub fn token_for(&self, severity: Option<Severity>) -> &str {
        match severity {
            Some(Severity::None) => &self.none,
            Some(Severity::Low) => &self.low,
            Some(Severity::Medium) => &self.medium,
            Some(Severity::High) => &self.high,
            Some(Severity::Critical) => &self.critical,
            None => &self.unscored,
        }
    }
}

use thiserror::Error;

/// Hard failures of the scoring engine.
///
/// An incomplete selection is not listed here: it is a normal state and is
/// reported as [`crate::core::score::Assessment::Unscored`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvssError {
    #[error("unknown metric key {0:?}")]
    UnknownMetricKey(String),

    #[error("invalid abbreviation {abbrev:?} for metric {metric}")]
    InvalidAbbreviation { metric: String, abbrev: String },

    #[error("malformed vector component {0:?}")]
    MalformedVector(String),

    #[error("unsupported CVSS version {0:?} (only 3.1 is supported)")]
    UnsupportedVersion(String),

    #[error("metric {0} appears more than once in the vector")]
    DuplicateMetric(String),
}

impl CvssError {
    pub fn invalid_abbreviation(metric: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Self::InvalidAbbreviation {
            metric: metric.into(),
            abbrev: abbrev.into(),
        }
    }
}

pub mod error;
pub mod metrics;
pub mod report;
pub mod score;
pub mod selection;
pub mod severity;
pub mod vector;

use crate::core::error::CvssError;
use crate::core::score::{Assessment, RoundingMode};
use tracing::debug;

/// Parses `input` and scores it from scratch.
pub fn assess_vector(input: &str, mode: RoundingMode) -> Result<Assessment, CvssError> {
    let selection = vector::parse_vector(input)?;
    let assessment = score::score_with(&selection, mode)?;
    if let Assessment::Unscored { missing, .. } = &assessment {
        debug!(?missing, "vector is incomplete");
    }
    Ok(assessment)
}

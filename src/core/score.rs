use crate::core::error::CvssError;
use crate::core::metrics::{self, MetricKey, SCOPE_CHANGED};
use crate::core::selection::Selection;
use crate::core::severity::Severity;
use crate::core::vector::format_vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round up to five decimals, then to one decimal (see [`round_up`]).
    #[default]
    Calculator,
    /// CVSS v3.1 Appendix A `Roundup` (see [`round_up_appendix_a`]).
    AppendixA,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calculator => write!(f, "calculator"),
            Self::AppendixA => write!(f, "appendix-a"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Breakdown {
    pub scope_changed: bool,
    pub impact_subscore: f64,
    pub impact: f64,
    /// Absent when the impact is not positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploitability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub severity: Severity,
    pub vector: String,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    Scored(ScoreResult),
    Unscored {
        vector: String,
        missing: Vec<MetricKey>,
    },
}

impl Assessment {
    pub fn vector(&self) -> &str {
        match self {
            Self::Scored(result) => &result.vector,
            Self::Unscored { vector, .. } => vector,
        }
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        match self {
            Self::Scored(result) => Some(result),
            Self::Unscored { .. } => None,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        self.result().map(|result| result.severity)
    }
}

/// Rounds `x` up to four decimals, snapping values already exact at five.
///
/// Works on the value scaled to an integer so representation error in the
/// weight products cannot push an exact value to the next step.
pub fn round_up(x: f64) -> f64 {
    let int_input = (x * 100_000.0).round() as i64;
    if int_input % 10 == 0 {
        int_input as f64 / 100_000.0
    } else {
        (int_input.div_euclid(10) + 1) as f64 / 10_000.0
    }
}

/// Smallest value with one decimal that is >= `x`, with the same integer
/// scaling as [`round_up`].
pub fn round_up_appendix_a(x: f64) -> f64 {
    let int_input = (x * 100_000.0).round() as i64;
    if int_input % 10_000 == 0 {
        int_input as f64 / 100_000.0
    } else {
        (int_input.div_euclid(10_000) + 1) as f64 / 10.0
    }
}

/// Half away from zero.
pub fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn score(selection: &Selection) -> Result<Assessment, CvssError> {
    score_with(selection, RoundingMode::default())
}

pub fn score_with(selection: &Selection, mode: RoundingMode) -> Result<Assessment, CvssError> {
    let scope_changed = selection.get(MetricKey::S) == Some(SCOPE_CHANGED);

    // bad abbreviations are caller bugs and win over incompleteness.
    let mut weights = [0.0_f64; 8];
    for (key, abbrev) in selection.iter() {
        if let Some(abbrev) = abbrev {
            weights[key.index()] = metrics::lookup_weight(key, abbrev, scope_changed)?;
        }
    }

    let vector = format_vector(selection);
    if !selection.is_complete() {
        return Ok(Assessment::Unscored {
            vector,
            missing: selection.missing(),
        });
    }

    let weight = |key: MetricKey| weights[key.index()];
    let impact_subscore = 1.0
        - (1.0 - weight(MetricKey::C))
            * (1.0 - weight(MetricKey::I))
            * (1.0 - weight(MetricKey::A));
    let impact = if scope_changed {
        7.52 * (impact_subscore - 0.029) - 3.25 * (impact_subscore - 0.02).powi(15)
    } else {
        6.42 * impact_subscore
    };

    if impact <= 0.0 {
        let breakdown = Breakdown {
            scope_changed,
            impact_subscore,
            impact,
            exploitability: None,
        };
        debug!(%vector, ?breakdown, "impact not positive, score is zero");
        return Ok(Assessment::Scored(ScoreResult {
            score: 0.0,
            severity: Severity::None,
            vector,
            breakdown,
        }));
    }

    let exploitability = 8.22
        * weight(MetricKey::AV)
        * weight(MetricKey::AC)
        * weight(MetricKey::PR)
        * weight(MetricKey::UI);

    let raw = if scope_changed {
        (1.08 * (impact + exploitability)).min(10.0)
    } else {
        (impact + exploitability).min(10.0)
    };

    let rounded = match mode {
        RoundingMode::Calculator => round_up(raw),
        RoundingMode::AppendixA => round_up_appendix_a(raw),
    };
    let score = round_one_decimal(rounded);
    let breakdown = Breakdown {
        scope_changed,
        impact_subscore,
        impact,
        exploitability: Some(exploitability),
    };
    debug!(%vector, ?breakdown, raw, score, %mode, "scored selection");

    Ok(Assessment::Scored(ScoreResult {
        score,
        severity: Severity::from_score(score),
        vector,
        breakdown,
    }))
}

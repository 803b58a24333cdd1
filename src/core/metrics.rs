//! Fixed CVSS v3.1 base metric table.

use crate::core::error::CvssError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKey {
    AV,
    AC,
    PR,
    UI,
    S,
    C,
    I,
    A,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MetricGroup {
    Exploitability,
    Scope,
    Impact,
}

impl MetricGroup {
    pub fn title(self) -> &'static str {
        match self {
            Self::Exploitability => "Exploitability Metrics",
            Self::Scope => "Scope",
            Self::Impact => "Impact Metrics",
        }
    }
}

impl MetricKey {
    /// Canonical vector order.
    pub const ALL: [MetricKey; 8] = [
        Self::AV,
        Self::AC,
        Self::PR,
        Self::UI,
        Self::S,
        Self::C,
        Self::I,
        Self::A,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AV => "AV",
            Self::AC => "AC",
            Self::PR => "PR",
            Self::UI => "UI",
            Self::S => "S",
            Self::C => "C",
            Self::I => "I",
            Self::A => "A",
        }
    }

    pub fn name(self) -> &'static str {
        self.metric().name
    }

    pub fn group(self) -> MetricGroup {
        match self {
            Self::AV | Self::AC | Self::PR | Self::UI => MetricGroup::Exploitability,
            Self::S => MetricGroup::Scope,
            Self::C | Self::I | Self::A => MetricGroup::Impact,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn metric(self) -> &'static Metric {
        &METRICS[self.index()]
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = CvssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CvssError::UnknownMetricKey(s.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct MetricOption {
    pub label: &'static str,
    pub abbrev: &'static str,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct Metric {
    pub key: MetricKey,
    pub name: &'static str,
    pub options: &'static [MetricOption],
}

impl Metric {
    pub fn option(&self, abbrev: &str) -> Result<&'static MetricOption, CvssError> {
        self.options
            .iter()
            .find(|option| option.abbrev == abbrev)
            .ok_or_else(|| CvssError::invalid_abbreviation(self.key.as_str(), abbrev))
    }
}

const fn opt(label: &'static str, abbrev: &'static str, weight: f64) -> MetricOption {
    MetricOption {
        label,
        abbrev,
        weight,
    }
}

const CIA_OPTIONS: &[MetricOption] = &[
    opt("None", "N", 0.0),
    opt("Low", "L", 0.22),
    opt("High", "H", 0.56),
];

/// Indexed by [`MetricKey::index`].
pub static METRICS: [Metric; 8] = [
    Metric {
        key: MetricKey::AV,
        name: "Attack Vector",
        options: &[
            opt("Network", "N", 0.85),
            opt("Adjacent", "A", 0.62),
            opt("Local", "L", 0.55),
            opt("Physical", "P", 0.2),
        ],
    },
    Metric {
        key: MetricKey::AC,
        name: "Attack Complexity",
        options: &[opt("Low", "L", 0.77), opt("High", "H", 0.44)],
    },
    // PR weights listed here are the scope-unchanged ones; scoring goes
    // through privileges_required_weight.
    Metric {
        key: MetricKey::PR,
        name: "Privileges Required",
        options: &[
            opt("None", "N", 0.85),
            opt("Low", "L", 0.62),
            opt("High", "H", 0.27),
        ],
    },
    Metric {
        key: MetricKey::UI,
        name: "User Interaction",
        options: &[opt("None", "N", 0.85), opt("Required", "R", 0.62)],
    },
    Metric {
        key: MetricKey::S,
        name: "Scope",
        options: &[opt("Unchanged", "U", 0.0), opt("Changed", "C", 1.0)],
    },
    Metric {
        key: MetricKey::C,
        name: "Confidentiality",
        options: CIA_OPTIONS,
    },
    Metric {
        key: MetricKey::I,
        name: "Integrity",
        options: CIA_OPTIONS,
    },
    Metric {
        key: MetricKey::A,
        name: "Availability",
        options: CIA_OPTIONS,
    },
];

pub const SCOPE_CHANGED: &str = "C";

pub fn option(key: MetricKey, abbrev: &str) -> Result<&'static MetricOption, CvssError> {
    key.metric().option(abbrev)
}

pub fn privileges_required_weight(abbrev: &str, scope_changed: bool) -> Result<f64, CvssError> {
    let weight = match (abbrev, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("H", false) => 0.27,
        ("L", true) => 0.68,
        ("H", true) => 0.5,
        _ => return Err(CvssError::invalid_abbreviation(MetricKey::PR.as_str(), abbrev)),
    };
    Ok(weight)
}

pub fn lookup_weight(key: MetricKey, abbrev: &str, scope_changed: bool) -> Result<f64, CvssError> {
    if key == MetricKey::PR {
        return privileges_required_weight(abbrev, scope_changed);
    }
    Ok(option(key, abbrev)?.weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_key() {
        for key in MetricKey::ALL {
            assert_eq!(key.metric().key, key);
        }
    }

    #[test]
    fn abbreviations_are_unique_per_metric() {
        for metric in &METRICS {
            for (idx, option) in metric.options.iter().enumerate() {
                assert!(
                    metric.options[idx + 1..]
                        .iter()
                        .all(|other| other.abbrev != option.abbrev),
                    "duplicate abbreviation {} in {}",
                    option.abbrev,
                    metric.key
                );
            }
        }
    }

    #[test]
    fn privileges_required_depends_on_scope() {
        assert_eq!(lookup_weight(MetricKey::PR, "N", false).unwrap(), 0.85);
        assert_eq!(lookup_weight(MetricKey::PR, "N", true).unwrap(), 0.85);
        assert_eq!(lookup_weight(MetricKey::PR, "L", false).unwrap(), 0.62);
        assert_eq!(lookup_weight(MetricKey::PR, "L", true).unwrap(), 0.68);
        assert_eq!(lookup_weight(MetricKey::PR, "H", false).unwrap(), 0.27);
        assert_eq!(lookup_weight(MetricKey::PR, "H", true).unwrap(), 0.5);
    }

    #[test]
    fn other_weights_ignore_scope() {
        assert_eq!(lookup_weight(MetricKey::AV, "P", true).unwrap(), 0.2);
        assert_eq!(lookup_weight(MetricKey::AV, "P", false).unwrap(), 0.2);
        assert_eq!(lookup_weight(MetricKey::C, "H", true).unwrap(), 0.56);
    }

    #[test]
    fn rejects_unknown_abbreviation() {
        let err = lookup_weight(MetricKey::AC, "X", false).unwrap_err();
        assert_eq!(err, CvssError::invalid_abbreviation("AC", "X"));
        assert!(matches!(
            lookup_weight(MetricKey::PR, "R", true),
            Err(CvssError::InvalidAbbreviation { .. })
        ));
    }

    #[test]
    fn parses_metric_keys() {
        assert_eq!("UI".parse::<MetricKey>().unwrap(), MetricKey::UI);
        assert_eq!(
            "E".parse::<MetricKey>().unwrap_err(),
            CvssError::UnknownMetricKey("E".to_string())
        );
    }
}

use crate::core::error::CvssError;
use crate::core::metrics::MetricKey;
use crate::core::selection::Selection;
use once_cell::sync::Lazy;
use regex::Regex;

pub const VECTOR_PREFIX: &str = "CVSS:3.1";
pub const UNSET_MARKER: &str = "X";

static VECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^CVSS:(?P<version>[^/]*)(?P<body>(?:/.*)?)$").expect("valid vector regex")
});
static COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<key>[A-Za-z]+):(?P<value>[A-Za-z]+)$").expect("valid component regex")
});

/// Renders the selection in canonical order, `X` for unset metrics.
pub fn format_vector(selection: &Selection) -> String {
    let mut vector = String::from(VECTOR_PREFIX);
    for (key, abbrev) in selection.iter() {
        vector.push('/');
        vector.push_str(key.as_str());
        vector.push(':');
        vector.push_str(abbrev.unwrap_or(UNSET_MARKER));
    }
    vector
}

/// Parses a `CVSS:3.1/...` vector.
///
/// Components may come in any order and may be omitted; omitted metrics and
/// `X` values are left unset.
pub fn parse_vector(input: &str) -> Result<Selection, CvssError> {
    let input = input.trim();
    let captures = VECTOR_RE
        .captures(input)
        .ok_or_else(|| CvssError::MalformedVector(input.to_string()))?;

    let version = &captures["version"];
    if version != "3.1" {
        return Err(CvssError::UnsupportedVersion(version.to_string()));
    }

    let mut selection = Selection::new();
    let mut seen = Vec::new();
    for component in captures["body"].split('/').skip(1) {
        let parts = COMPONENT_RE
            .captures(component)
            .ok_or_else(|| CvssError::MalformedVector(component.to_string()))?;

        let key: MetricKey = parts["key"].parse()?;
        if seen.contains(&key) {
            return Err(CvssError::DuplicateMetric(key.to_string()));
        }
        seen.push(key);

        let value = &parts["value"];
        if value != UNSET_MARKER {
            selection.set(key, value)?;
        }
    }

    Ok(selection)
}

use crate::core::metrics::{METRICS, Metric, MetricGroup, MetricKey};
use crate::core::score::{Assessment, Breakdown, RoundingMode};
use crate::core::selection::Selection;
use crate::core::severity::{Palette, Severity};
use colored::Colorize;
use serde::Serialize;

const UNSCORED_SCORE: &str = "—";
const UNSCORED_SEVERITY: &str = "N/A";

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub vector: String,
    pub scored: bool,
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub color: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MetricKey>,
    pub rounding: RoundingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

impl JsonReport {
    pub fn new(
        assessment: &Assessment,
        palette: &Palette,
        rounding: RoundingMode,
        explain: bool,
    ) -> Self {
        let result = assessment.result();
        let missing = match assessment {
            Assessment::Unscored { missing, .. } => missing.clone(),
            Assessment::Scored(_) => Vec::new(),
        };

        Self {
            vector: assessment.vector().to_string(),
            scored: result.is_some(),
            score: result.map(|result| result.score),
            severity: assessment.severity(),
            color: palette.token_for(assessment.severity()).to_string(),
            missing,
            rounding,
            breakdown: result.filter(|_| explain).map(|result| result.breakdown),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsJson {
    pub version: &'static str,
    pub metrics: &'static [Metric],
}

impl Default for MetricsJson {
    fn default() -> Self {
        Self {
            version: "3.1",
            metrics: &METRICS,
        }
    }
}

/// Colors `text` with a `#rrggbb` token; other tokens leave it plain.
pub fn paint(text: &str, token: &str) -> String {
    match parse_hex(token) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold().to_string(),
        None => text.to_string(),
    }
}

fn parse_hex(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Score and severity, or their placeholders while unscored.
pub fn headline(assessment: &Assessment) -> (String, String) {
    match assessment.result() {
        Some(result) => (format!("{:.1}", result.score), result.severity.to_string()),
        None => (UNSCORED_SCORE.to_string(), UNSCORED_SEVERITY.to_string()),
    }
}

pub fn render_assessment(assessment: &Assessment, palette: &Palette) -> String {
    let token = palette.token_for(assessment.severity());
    let (score, severity) = headline(assessment);
    format!(
        "{} ({})\nvector: {}",
        paint(&score, token),
        paint(&severity, token),
        assessment.vector()
    )
}

pub fn render_breakdown(breakdown: &Breakdown) -> String {
    let mut lines = vec![
        format!(
            "scope: {}",
            if breakdown.scope_changed {
                "changed"
            } else {
                "unchanged"
            }
        ),
        format!("impact sub-score: {:.4}", breakdown.impact_subscore),
        format!("impact: {:.4}", breakdown.impact),
    ];
    match breakdown.exploitability {
        Some(exploitability) => lines.push(format!("exploitability: {:.4}", exploitability)),
        None => lines.push("exploitability: skipped (no impact)".to_string()),
    }
    lines.join("\n")
}

pub fn print_human(assessment: &Assessment, palette: &Palette, explain: bool) {
    println!("{}", render_assessment(assessment, palette));

    match assessment {
        Assessment::Scored(result) if explain => {
            println!();
            println!("{}", render_breakdown(&result.breakdown));
        }
        Assessment::Scored(_) => {}
        Assessment::Unscored { missing, .. } => {
            let names: Vec<&str> = missing.iter().map(|key| key.as_str()).collect();
            println!("unscored: missing {}", names.join(", "));
        }
    }
}

/// Metric table grouped by section, marking the current selection.
pub fn render_metrics(selection: &Selection) -> String {
    let mut out = String::new();
    let mut group: Option<MetricGroup> = None;

    for metric in &METRICS {
        if group != Some(metric.key.group()) {
            group = Some(metric.key.group());
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&metric.key.group().title().to_uppercase().bold().to_string());
            out.push('\n');
        }

        let selected = selection.get(metric.key);
        let options: Vec<String> = metric
            .options
            .iter()
            .map(|option| {
                let item = format!("{}={}", option.abbrev, option.label);
                if selected == Some(option.abbrev) {
                    format!("[{}]", item).bold().to_string()
                } else {
                    item
                }
            })
            .collect();
        out.push_str(&format!(
            "  {:<3} {:<20} {}\n",
            metric.key.as_str(),
            metric.name,
            options.join("  ")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score::score;
    use crate::core::vector::parse_vector;

    fn assess(vector: &str) -> Assessment {
        score(&parse_vector(vector).unwrap()).unwrap()
    }

    #[test]
    fn parses_hex_tokens() {
        assert_eq!(parse_hex("#cc2936"), Some((0xcc, 0x29, 0x36)));
        assert_eq!(parse_hex("cc2936"), None);
        assert_eq!(parse_hex("#cc29"), None);
        assert_eq!(parse_hex("#zz2936"), None);
        assert_eq!(paint("x", "red-ish"), "x");
    }

    #[test]
    fn headline_uses_placeholders_until_scored() {
        let partial = assess("CVSS:3.1/AV:N");
        assert_eq!(
            headline(&partial),
            ("—".to_string(), "N/A".to_string())
        );

        let full = assess("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N");
        assert_eq!(headline(&full), ("0.0".to_string(), "None".to_string()));
    }

    #[test]
    fn json_report_for_scored_vector() {
        let assessment = assess("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
        let report = JsonReport::new(
            &assessment,
            &Palette::default(),
            RoundingMode::Calculator,
            false,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["score"], 9.8);
        assert_eq!(value["severity"], "Critical");
        assert_eq!(value["color"], "#cc2936");
        assert_eq!(value["rounding"], "calculator");
        assert!(value.get("missing").is_none());
        assert!(value.get("breakdown").is_none());
    }

    #[test]
    fn json_report_for_partial_vector() {
        let assessment = assess("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H");
        let report = JsonReport::new(
            &assessment,
            &Palette::default(),
            RoundingMode::AppendixA,
            true,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scored"], false);
        assert!(value["score"].is_null());
        assert!(value["severity"].is_null());
        assert_eq!(value["color"], "#8892a0");
        assert_eq!(value["missing"], serde_json::json!(["A"]));
        assert!(value.get("breakdown").is_none());
    }

    #[test]
    fn breakdown_mentions_skipped_exploitability() {
        let assessment = assess("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:N/I:N/A:N");
        let text = render_breakdown(&assessment.result().unwrap().breakdown);
        assert!(text.contains("scope: changed"));
        assert!(text.contains("exploitability: skipped"));
    }

    #[test]
    fn metrics_table_lists_every_metric() {
        let mut selection = Selection::new();
        selection.set(MetricKey::AV, "P").unwrap();
        let table = render_metrics(&selection);
        for metric in &METRICS {
            assert!(table.contains(metric.name), "{}", metric.name);
        }
        assert!(table.contains("[P=Physical]"));
        assert!(table.contains("EXPLOITABILITY METRICS"));
    }
}

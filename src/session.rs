//! Line-oriented terminal picker.
//!
//! The session owns the only mutable selection. Every change rescores the
//! whole snapshot; nothing is carried over between scores.

use crate::config::Config;
use crate::core::error::CvssError;
use crate::core::metrics::MetricKey;
use crate::core::report;
use crate::core::score::{self, Assessment, RoundingMode};
use crate::core::selection::Selection;
use crate::core::severity::Palette;
use crate::core::vector::parse_vector;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "\
commands:
  AV:N              select a value (selecting it again clears it)
  AV:-              clear a metric
  CVSS:3.1/...      load a whole vector (also: vector CVSS:3.1/...)
  reset             clear every metric
  show              print the current score
  metrics           list metrics and options
  help              print this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Selection changed or was requested; carries the rendered state.
    Updated(String),
    Info(String),
    Quit,
}

pub struct Session {
    selection: Selection,
    palette: Palette,
    rounding: RoundingMode,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            selection: Selection::new(),
            palette: config.palette.clone(),
            rounding: config.general.rounding,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn assessment(&self) -> Result<Assessment, CvssError> {
        score::score_with(&self.selection, self.rounding)
    }

    pub fn render(&self) -> Result<String, CvssError> {
        Ok(report::render_assessment(&self.assessment()?, &self.palette))
    }

    pub fn handle(&mut self, line: &str) -> Result<Outcome, CvssError> {
        let line = line.trim();
        let command = line.to_ascii_lowercase();

        match command.as_str() {
            "" => return Ok(Outcome::Info(String::new())),
            "quit" | "exit" | "q" => return Ok(Outcome::Quit),
            "help" | "?" => return Ok(Outcome::Info(HELP.to_string())),
            "metrics" => return Ok(Outcome::Info(report::render_metrics(&self.selection))),
            "show" => return Ok(Outcome::Updated(self.render()?)),
            "reset" => {
                self.selection.reset();
                return Ok(Outcome::Updated(self.render()?));
            }
            _ => {}
        }

        if let Some(vector) = strip_prefix_ignore_case(line, "vector ") {
            return self.load_vector(vector.trim());
        }
        if strip_prefix_ignore_case(line, "cvss:").is_some() {
            return self.load_vector(line);
        }

        let Some((key, value)) = line.split_once(':') else {
            return Ok(Outcome::Info(format!(
                "unknown command {line:?} (type `help`)"
            )));
        };

        let key: MetricKey = key.trim().to_ascii_uppercase().parse()?;
        let value = value.trim().to_ascii_uppercase();
        if value == "-" {
            self.selection.unset(key);
        } else {
            let now = self.selection.toggle(key, &value)?;
            debug!(%key, value = now.unwrap_or("unset"), "toggled metric");
        }

        Ok(Outcome::Updated(self.render()?))
    }

    fn load_vector(&mut self, vector: &str) -> Result<Outcome, CvssError> {
        self.selection = parse_vector(vector)?;
        Ok(Outcome::Updated(self.render()?))
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}

pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    writeln!(output, "CVSS 3.1 calculator (type `help` for commands)")?;
    writeln!(output, "{}", session.render()?)?;

    for line in input.lines() {
        let line = line.context("failed reading input")?;
        match session.handle(&line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Updated(text)) => writeln!(output, "{text}")?,
            Ok(Outcome::Info(text)) if text.is_empty() => {}
            Ok(Outcome::Info(text)) => writeln!(output, "{text}")?,
            Err(err) => {
                warn!(input = %line, "rejected input: {err}");
                writeln!(output, "error: {err}")?;
            }
        }
    }

    output.flush().context("failed flushing output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&Config::default())
    }

    #[test]
    fn toggles_and_rescores() {
        let mut session = session();
        for command in ["av:n", "AC:L", "PR:N", "UI:N", "S:U", "C:H", "I:H"] {
            let outcome = session.handle(command).unwrap();
            assert!(matches!(outcome, Outcome::Updated(_)), "{command}");
        }
        assert!(session.assessment().unwrap().result().is_none());

        let Outcome::Updated(text) = session.handle("A:H").unwrap() else {
            panic!("expected update");
        };
        assert!(text.contains("9.8"));
        assert!(text.contains("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"));

        let Outcome::Updated(text) = session.handle("A:H").unwrap() else {
            panic!("expected update");
        };
        assert!(text.contains("N/A"));
        assert!(text.contains("/A:X"));
        assert_eq!(session.selection().get(MetricKey::A), None);
    }

    #[test]
    fn clears_and_resets() {
        let mut session = session();
        session
            .handle("vector CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H")
            .unwrap();
        assert!(session.selection().is_complete());

        session.handle("PR:-").unwrap();
        assert_eq!(session.selection().missing(), vec![MetricKey::PR]);

        session.handle("reset").unwrap();
        assert_eq!(session.selection(), &Selection::new());
    }

    #[test]
    fn loads_bare_vectors() {
        let mut session = session();
        session.handle("CVSS:3.1/S:C/C:L").unwrap();
        assert_eq!(session.selection().get(MetricKey::S), Some("C"));
        assert_eq!(session.selection().get(MetricKey::C), Some("L"));
    }

    #[test]
    fn reports_bad_input_without_changing_state() {
        let mut session = session();
        session.handle("AV:N").unwrap();

        assert_eq!(
            session.handle("AV:Q").unwrap_err(),
            CvssError::invalid_abbreviation("AV", "Q")
        );
        assert_eq!(
            session.handle("RL:O").unwrap_err(),
            CvssError::UnknownMetricKey("RL".to_string())
        );
        assert_eq!(session.selection().get(MetricKey::AV), Some("N"));

        assert!(matches!(session.handle("hello"), Ok(Outcome::Info(_))));
        assert_eq!(session.handle("quit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn run_loop_renders_each_change() {
        let mut session = session();
        let input = "AV:N\nbogus:1\nAV:Z\nquit\nAC:L\n";
        let mut output = Vec::new();
        run(&mut session, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("CVSS:3.1/AV:X/AC:X"));
        assert!(text.contains("CVSS:3.1/AV:N/AC:X"));
        assert!(text.contains("error: unknown metric key \"BOGUS\""));
        assert!(text.contains("error: invalid abbreviation \"Z\" for metric AV"));
        assert_eq!(session.selection().get(MetricKey::AC), None);
    }
}

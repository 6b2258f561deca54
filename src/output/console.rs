//! Per-frame console output in text or JSON-lines form.

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::inference::{Classification, Decision, Recognition};
use crate::output::{DrinksResult, ResultSink};
use serde::Serialize;
use std::io::Write;

/// Render labels as `a, b or c`, or `no results` when empty.
pub fn format_recognitions(recognitions: &[Recognition]) -> String {
    match recognitions {
        [] => "no results".to_string(),
        [only] => only.label.clone(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|r| r.label.as_str()).collect();
            format!("{} or {}", head.join(", "), last.label)
        }
    }
}

/// Names of the flags that are set, joined with `+`.
fn flag_names(result: &DrinksResult) -> String {
    let names: Vec<&str> = [
        (result.coke, "coke"),
        (result.perrier, "perrier"),
        (result.diet_coke, "dietCoke"),
        (result.other, "other"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join("+")
    }
}

/// One line of JSON output.
#[derive(Debug, Serialize)]
struct JsonFrame<'a> {
    frame: usize,
    #[serde(flatten)]
    decision: &'a Decision,
    recognitions: &'a [Recognition],
}

/// Writes each classification as one line.
pub struct ConsoleWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> ConsoleWriter<W> {
    /// Create a writer in the given format.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for ConsoleWriter<W> {
    fn write_result(&mut self, frame: usize, classification: &Classification) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                let ranked: Vec<Recognition> =
                    classification.recognitions.iter().rev().cloned().collect();
                let scores: Vec<String> = ranked.iter().map(ToString::to_string).collect();
                writeln!(
                    self.writer,
                    "frame {frame}: {} ({}) [{}] seen: {}",
                    flag_names(&classification.decision.result),
                    classification.decision.rule,
                    scores.join(", "),
                    format_recognitions(&ranked)
                )?;
            }
            OutputFormat::Json => {
                let line = serde_json::to_string(&JsonFrame {
                    frame,
                    decision: &classification.decision,
                    recognitions: &classification.recognitions,
                })
                .map_err(|e| Error::OutputSerialize { source: e })?;
                writeln!(self.writer, "{line}")?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

use colored::*;

use crate::error::ProbeFailure;
use crate::models::Classification;

/// Receives per-candidate events from the enumeration loop.
pub trait Reporter {
    fn classified(&mut self, candidate: &str, classification: Classification);
    fn failed(&mut self, candidate: &str, failure: &ProbeFailure);
    fn finished(&mut self, valid: &[String]);
}

/// Plain-text line for a classified candidate, e.g. `[VALID] admin@enum.thm`.
pub fn classification_line(candidate: &str, classification: Classification) -> String {
    format!("[{}] {}", classification.tag(), candidate)
}

pub fn failure_line(candidate: &str, failure: &ProbeFailure) -> String {
    format!("[!] Request failed for {}: {}", candidate, failure)
}

/// Writes to stdout with colored tags.
#[derive(Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn classified(&mut self, candidate: &str, classification: Classification) {
        let tag = format!("[{}]", classification.tag());
        let tag = match classification {
            Classification::Valid => tag.as_str().green().bold(),
            Classification::Invalid => tag.as_str().red(),
            Classification::Inconclusive => tag.as_str().yellow(),
        };
        println!("{} {}", tag, candidate);
    }

    fn failed(&mut self, candidate: &str, failure: &ProbeFailure) {
        println!("{}", failure_line(candidate, failure).yellow());
    }

    fn finished(&mut self, valid: &[String]) {
        println!("\n{}", "Valid emails found:".bold().underline());
        for candidate in valid {
            println!("{}", candidate);
        }
    }
}

/// Keeps every line in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct BufferedReporter {
    pub lines: Vec<String>,
    pub summary: Option<Vec<String>>,
}

impl Reporter for BufferedReporter {
    fn classified(&mut self, candidate: &str, classification: Classification) {
        self.lines.push(classification_line(candidate, classification));
    }

    fn failed(&mut self, candidate: &str, failure: &ProbeFailure) {
        self.lines.push(failure_line(candidate, failure));
    }

    fn finished(&mut self, valid: &[String]) {
        self.summary = Some(valid.to_vec());
    }
}

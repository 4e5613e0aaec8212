//! The enumeration loop.
//!
//! Candidates are probed strictly one after another. A failed probe is
//! reported and skipped; it never ends the run.

use futures::stream::StreamExt;
use log::{debug, error, info, warn};

use crate::candidates::CandidateStream;
use crate::models::{classify, Classification};
use crate::oracle::Prober;
use crate::reporting::Reporter;

/// Outcome of a full pass over the candidate list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumerationReport {
    /// Candidates classified valid, in the order they were seen.
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
    /// `(candidate, reason)` for every probe that produced no reply.
    pub failures: Vec<(String, String)>,
    pub probes_issued: usize,
    /// Set when the candidate source failed before it was exhausted.
    pub read_error: Option<String>,
}

impl EnumerationReport {
    pub fn classified(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}

pub struct Enumerator<'a, P: Prober + ?Sized, R: Reporter + ?Sized> {
    prober: &'a P,
    reporter: &'a mut R,
    report: EnumerationReport,
}

impl<'a, P: Prober + ?Sized, R: Reporter + ?Sized> Enumerator<'a, P, R> {
    pub fn new(prober: &'a P, reporter: &'a mut R) -> Self {
        Enumerator {
            prober,
            reporter,
            report: EnumerationReport::default(),
        }
    }

    /// Probe one candidate and record its verdict.
    pub async fn check(&mut self, candidate: &str) -> Classification {
        self.report.probes_issued += 1;

        let response = match self.prober.probe(candidate).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Probe failed for {}: {}", candidate, e);
                self.reporter.failed(candidate, &e);
                self.report.failures.push((candidate.to_string(), e.to_string()));
                return Classification::Inconclusive;
            }
        };

        let verdict = classify(&response);
        debug!("{} classified {} (status={:?}, message={:?})", candidate, verdict, response.status, response.message);
        self.reporter.classified(candidate, verdict);

        match verdict {
            Classification::Valid => self.report.valid.push(candidate.to_string()),
            Classification::Invalid => self.report.invalid.push(candidate.to_string()),
            Classification::Inconclusive => {}
        }
        verdict
    }

    /// Drain the candidate stream, then emit the valid listing.
    ///
    /// A read error on the candidate source stops the input early; the
    /// listing is still emitted for everything classified so far.
    pub async fn run(mut self, mut candidates: CandidateStream) -> EnumerationReport {
        while let Some(next) = candidates.next().await {
            let candidate = match next {
                Ok(c) => c,
                Err(e) => {
                    error!("{:#}", e);
                    self.report.read_error = Some(format!("{:#}", e));
                    break;
                }
            };
            let candidate = candidate.trim();
            if candidate.is_empty() {
                continue;
            }
            self.check(candidate).await;
        }

        info!(
            "Enumeration complete: {} probes, {} valid, {} invalid, {} failed",
            self.report.probes_issued,
            self.report.valid.len(),
            self.report.invalid.len(),
            self.report.failures.len()
        );

        self.reporter.finished(&self.report.valid);
        self.report
    }
}

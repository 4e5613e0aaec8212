use async_trait::async_trait;
use rust_email_oracle::candidates::{candidates_from_lines, CandidateStream};
use rust_email_oracle::enumerator::Enumerator;
use rust_email_oracle::error::ProbeFailure;
use rust_email_oracle::models::{Classification, ProbeResponse};
use rust_email_oracle::oracle::Prober;
use rust_email_oracle::reporting::BufferedReporter;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers from a fixed table; unknown candidates get the "does not exist" error.
struct ScriptedOracle {
    replies: HashMap<&'static str, Result<serde_json::Value, ()>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    fn new(replies: Vec<(&'static str, Result<serde_json::Value, ()>)>) -> Self {
        ScriptedOracle {
            replies: replies.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prober for ScriptedOracle {
    async fn probe(&self, candidate: &str) -> Result<ProbeResponse, ProbeFailure> {
        self.calls.lock().unwrap().push(candidate.to_string());
        match self.replies.get(candidate) {
            Some(Ok(v)) => ProbeResponse::from_value(v.clone()).ok_or(ProbeFailure::NotAnObject),
            Some(Err(())) => Err(ProbeFailure::Timeout(Duration::from_secs(10))),
            None => Ok(ProbeResponse::new("error", "Email does not exist")),
        }
    }
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_mixed_verdicts() {
    let oracle = ScriptedOracle::new(vec![
        ("admin@enum.thm", Ok(json!({"status": "ok", "message": "welcome"}))),
        ("canary@enum.thm", Ok(json!({"status": "error", "message": "Something else"}))),
    ]);
    let mut reporter = BufferedReporter::default();

    let input = lines(&["nobody@enum.thm", "admin@enum.thm", "canary@enum.thm"]);
    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(input))
        .await;

    assert_eq!(report.valid, vec!["admin@enum.thm", "canary@enum.thm"]);
    assert_eq!(report.invalid, vec!["nobody@enum.thm"]);
    assert_eq!(report.probes_issued, 3);
    assert_eq!(reporter.lines, vec![
        "[INVALID] nobody@enum.thm",
        "[VALID] admin@enum.thm",
        "[VALID] canary@enum.thm",
    ]);
    assert_eq!(reporter.summary, Some(report.valid.clone()));
}

#[tokio::test]
async fn test_blank_lines_are_not_probed() {
    let oracle = ScriptedOracle::new(vec![]);
    let mut reporter = BufferedReporter::default();

    let input = lines(&["a@enum.thm", "   ", "b@enum.thm"]);
    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(input))
        .await;

    assert_eq!(oracle.calls(), vec!["a@enum.thm", "b@enum.thm"]);
    assert_eq!(report.probes_issued, 2);
    assert_eq!(reporter.lines.len(), 2);
}

#[tokio::test]
async fn test_timeout_skips_candidate_and_continues() {
    let oracle = ScriptedOracle::new(vec![
        ("slow@enum.thm", Err(())),
        ("admin@enum.thm", Ok(json!({"status": "success", "message": "Incorrect password"}))),
    ]);
    let mut reporter = BufferedReporter::default();

    let input = lines(&["slow@enum.thm", "admin@enum.thm"]);
    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(input))
        .await;

    assert_eq!(report.valid, vec!["admin@enum.thm"]);
    assert!(report.invalid.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "slow@enum.thm");
    assert_eq!(reporter.lines, vec![
        "[!] Request failed for slow@enum.thm: timed out after 10s",
        "[VALID] admin@enum.thm",
    ]);
    assert!(!reporter.lines.iter().any(|l| l.starts_with('[') && l.ends_with("] slow@enum.thm")));
}

#[tokio::test]
async fn test_non_object_reply_is_failure() {
    let oracle = ScriptedOracle::new(vec![("list@enum.thm", Ok(json!(["ok"])))]);
    let mut reporter = BufferedReporter::default();

    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(lines(&["list@enum.thm"])))
        .await;

    assert!(report.valid.is_empty());
    assert_eq!(report.failures, vec![("list@enum.thm".to_string(), "response JSON is not an object".to_string())]);
}

#[tokio::test]
async fn test_duplicates_are_kept() {
    let oracle = ScriptedOracle::new(vec![
        ("admin@enum.thm", Ok(json!({"status": "ok"}))),
    ]);
    let mut reporter = BufferedReporter::default();

    let input = lines(&["admin@enum.thm", "x@enum.thm", "admin@enum.thm"]);
    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(input))
        .await;

    assert_eq!(report.valid, vec!["admin@enum.thm", "admin@enum.thm"]);
    assert_eq!(oracle.calls().len(), 3);
}

#[tokio::test]
async fn test_empty_input() {
    let oracle = ScriptedOracle::new(vec![]);
    let mut reporter = BufferedReporter::default();

    let report = Enumerator::new(&oracle, &mut reporter)
        .run(candidates_from_lines(Vec::new()))
        .await;

    assert_eq!(report.probes_issued, 0);
    assert!(reporter.lines.is_empty());
    assert_eq!(reporter.summary, Some(vec![]));
}

#[tokio::test]
async fn test_check_single_candidate() {
    let oracle = ScriptedOracle::new(vec![("admin@enum.thm", Err(()))]);
    let mut reporter = BufferedReporter::default();
    let mut enumerator = Enumerator::new(&oracle, &mut reporter);

    assert_eq!(enumerator.check("admin@enum.thm").await, Classification::Inconclusive);
    assert_eq!(enumerator.check("ghost@enum.thm").await, Classification::Invalid);
}

#[tokio::test]
async fn test_read_error_keeps_partial_results() {
    let oracle = ScriptedOracle::new(vec![
        ("admin@enum.thm", Ok(json!({"status": "ok"}))),
    ]);
    let mut reporter = BufferedReporter::default();

    let items: Vec<Result<String, anyhow::Error>> = vec![
        Ok("admin@enum.thm".to_string()),
        Err(anyhow::anyhow!("disk went away")),
        Ok("never@enum.thm".to_string()),
    ];
    let stream: CandidateStream = Box::pin(futures::stream::iter(items));

    let report = Enumerator::new(&oracle, &mut reporter).run(stream).await;

    assert_eq!(report.valid, vec!["admin@enum.thm"]);
    assert_eq!(report.read_error.as_deref(), Some("disk went away"));
    assert_eq!(oracle.calls(), vec!["admin@enum.thm"]);
    assert_eq!(reporter.summary, Some(vec!["admin@enum.thm".to_string()]));
}

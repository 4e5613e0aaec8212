use anyhow::Context;
use futures::stream::{Stream, StreamExt};
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::SplitStream;

pub type CandidateStream = Pin<Box<dyn Stream<Item = Result<String, anyhow::Error>> + Send>>;

/// Trimmed candidate, or `None` for a blank line.
pub fn normalize(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Lines of the file, in order, trimmed, with blank lines removed.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 become U+FFFD
/// instead of ending the stream.
pub async fn candidate_stream(path: PathBuf) -> Result<CandidateStream, anyhow::Error> {
    let file = File::open(&path)
        .await
        .with_context(|| format!("Failed to open candidate list {}", path.display()))?;
    let reader = BufReader::new(file);
    let lines = SplitStream::new(reader.split(b'\n'));

    let s = lines.filter_map(|res: Result<Vec<u8>, std::io::Error>| async move {
        match res {
            Ok(bytes) => normalize(&String::from_utf8_lossy(&bytes)).map(|c| Ok(c.to_string())),
            Err(e) => Some(Err(anyhow::Error::from(e).context("Failed to read candidate list"))),
        }
    });

    Ok(Box::pin(s))
}

/// Stream over an in-memory list, same normalisation as the file reader.
pub fn candidates_from_lines<I>(lines: I) -> CandidateStream
where
    I: IntoIterator<Item = String>,
    I::IntoIter: Send + 'static,
{
    let s = futures::stream::iter(lines)
        .filter_map(|line| async move { normalize(&line).map(|c| Ok(c.to_string())) });
    Box::pin(s)
}

use anyhow::{Context, Result};
use chatcart_sync::Sender;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One line of a JSONL transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptLine {
    pub sender: Sender,
    pub text: String,
}

/// Read a transcript; blank lines are skipped, line numbers in errors are 1-based
pub fn read_transcript(path: &Path) -> Result<Vec<TranscriptLine>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    parse_transcript(&raw).with_context(|| format!("Invalid transcript {}", path.display()))
}

pub fn parse_transcript(raw: &str) -> Result<Vec<TranscriptLine>> {
    let mut lines = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: TranscriptLine =
            serde_json::from_str(line).with_context(|| format!("line {}", idx + 1))?;
        lines.push(parsed);
    }
    Ok(lines)
}

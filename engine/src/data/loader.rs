use anyhow::{anyhow, bail};
use csv::ReaderBuilder;
use shared::models::RawTable;
use std::fs;
use std::path::Path;

use crate::error::EngineError;

/// Delimiters considered when the separator has to be inferred.
const CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];
/// Non-blank lines inspected by the sniffer.
const SNIFF_LINES: usize = 20;

/// Strategies tried by `parse_table`, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Semicolon,
    Comma,
    Sniffed,
}

impl Delimiter {
    pub const STRATEGIES: [Delimiter; 3] = [Delimiter::Semicolon, Delimiter::Comma, Delimiter::Sniffed];
}

/// Reads a delimited file into a `RawTable`, every cell kept as text.
pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable, EngineError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let text = fs::read_to_string(path)
        .map_err(|e| EngineError::load(&source, format!("unreadable resource: {}", e)))?;
    parse_named(&text, &source)
}

/// Parses delimited text, trying `;`, then `,`, then an inferred delimiter.
pub fn parse_table(text: &str) -> Result<RawTable, EngineError> {
    parse_named(text, "<inline>")
}

/// Parses with a single strategy.
pub fn parse_with(text: &str, strategy: Delimiter) -> Result<RawTable, EngineError> {
    let text = strip_bom(text);
    try_strategy(text, strategy).map_err(|e| EngineError::load("<inline>", e.to_string()))
}

fn parse_named(text: &str, source: &str) -> Result<RawTable, EngineError> {
    let text = strip_bom(text);
    let mut failures = Vec::with_capacity(Delimiter::STRATEGIES.len());

    for strategy in Delimiter::STRATEGIES {
        match try_strategy(text, strategy) {
            Ok(table) => {
                tracing::debug!(
                    source,
                    ?strategy,
                    rows = table.len(),
                    columns = table.headers.len(),
                    "Parsed delimited table"
                );
                return Ok(table);
            }
            Err(e) => {
                tracing::debug!(source, ?strategy, error = %e, "Delimiter strategy rejected");
                failures.push(format!("{:?}: {}", strategy, e));
            }
        }
    }

    Err(EngineError::load(
        source,
        format!("no delimiter strategy succeeded ({})", failures.join("; ")),
    ))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn try_strategy(text: &str, strategy: Delimiter) -> anyhow::Result<RawTable> {
    let delimiter = match strategy {
        Delimiter::Semicolon => b';',
        Delimiter::Comma => b',',
        Delimiter::Sniffed => {
            sniff_delimiter(text).ok_or_else(|| anyhow!("could not infer a delimiter"))?
        }
    };

    let table = read_delimited(text, delimiter)?;

    // A fixed delimiter that never occurs collapses the file into one column.
    if strategy != Delimiter::Sniffed && table.headers.len() == 1 {
        let header = table.headers[0].as_bytes();
        if let Some(other) = CANDIDATES
            .iter()
            .find(|&&c| c != delimiter && header.contains(&c))
        {
            bail!(
                "single column whose header contains '{}'",
                (*other as char).escape_default()
            );
        }
    }

    Ok(table)
}

fn read_delimited(text: &str, delimiter: u8) -> anyhow::Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        bail!("missing header row");
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("Error reading record {}: {}", idx + 1, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Picks the candidate that occurs the same non-zero number of times on every
/// sampled line; the highest count wins, ties go to the earlier candidate.
fn sniff_delimiter(text: &str) -> Option<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return None;
    }

    CANDIDATES
        .iter()
        .rev()
        .filter_map(|&c| {
            let first = count_unquoted(lines[0], c);
            let consistent = lines.iter().all(|l| count_unquoted(l, c) == first);
            (first > 0 && consistent).then_some((c, first))
        })
        .max_by_key(|&(_, count)| count)
        .map(|(c, _)| c)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

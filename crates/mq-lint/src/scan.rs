//! Pattern-scanning helpers shared by the rules

use mq_core::MigrationRecord;
use regex::Regex;

/// Characters inspected after a structured call site for keyword arguments
pub(crate) const LOOKAHEAD_CHARS: usize = 300;

/// File path reported for violations about the whole graph
pub const GRAPH_FILE_PATH: &str = "<migration-graph>";

/// Longest excerpt of the matched line quoted in a message
const EXCERPT_CHARS: usize = 80;

/// 1-based line number of a byte offset
pub(crate) fn line_number(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Up to [`LOOKAHEAD_CHARS`] characters starting at `start`
pub(crate) fn lookahead(content: &str, start: usize) -> &str {
    let rest = &content[start..];
    match rest.char_indices().nth(LOOKAHEAD_CHARS) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}

/// The trimmed source line containing `offset`, shortened for messages
pub(crate) fn excerpt(content: &str, offset: usize) -> String {
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);
    let line = content[line_start..line_end].trim();

    if line.chars().count() > EXCERPT_CHARS {
        let cut: String = line.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

/// A single match found in a record's content
pub(crate) struct Hit {
    pub(crate) line: usize,
    pub(crate) message: String,
}

/// Every match of `pattern`, optionally filtered on the text from the match onwards.
///
/// `accept` receives the matched text and the lookahead window after the
/// match start.
pub(crate) fn scan<F>(
    record: &MigrationRecord,
    pattern: &Regex,
    label: &str,
    accept: F,
) -> Vec<Hit>
where
    F: Fn(&str, &str) -> bool,
{
    let content = record.raw_content.as_str();
    pattern
        .find_iter(content)
        .filter(|m| accept(m.as_str(), lookahead(content, m.start())))
        .map(|m| Hit {
            line: line_number(content, m.start()),
            message: format!("{label}: {}", excerpt(content, m.start())),
        })
        .collect()
}

/// Every match of `pattern`, unconditionally
pub(crate) fn scan_all(record: &MigrationRecord, pattern: &Regex, label: &str) -> Vec<Hit> {
    scan(record, pattern, label, |_, _| true)
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;

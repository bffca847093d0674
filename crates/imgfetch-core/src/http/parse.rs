//! Parse HTTP response header lines into HeadResult.

use super::HeadResult;

/// Parse collected header lines into HeadResult.
///
/// When redirects were followed the lines contain several responses; only the
/// block after the last status line is used.
pub fn parse_headers(lines: &[String]) -> HeadResult {
    let start = lines
        .iter()
        .rposition(|l| is_status_line(l))
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut result = HeadResult::default();
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-disposition") {
                result.content_disposition = Some(value.to_string());
            }
        }
    }
    result
}

/// Status code from an `HTTP/x.y NNN reason` line.
pub(crate) fn status_code(line: &str) -> Option<u32> {
    if !is_status_line(line) {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}

fn is_status_line(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("HTTP/"))
}

//! Filesystem-safe filename sanitization.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename so it names exactly one entry inside the
/// target directory.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Trims surrounding whitespace
/// - Limits length to 255 bytes on a char boundary
///
/// Returns `None` for empty results and for `.` / `..`.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim();
    let out = if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        &trimmed[..take]
    } else {
        trimmed
    };

    if out.is_empty() || out == "." || out == ".." {
        None
    } else {
        Some(out.to_string())
    }
}

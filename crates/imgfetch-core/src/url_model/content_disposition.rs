//! Content-Disposition header parsing (filename and filename*).

/// Extracts the filename from a raw Content-Disposition header value.
///
/// Supports:
/// - `filename="value"` (quoted; ends at the closing quote, backslash escapes decoded)
/// - `filename=value` (token; ends at `;` or whitespace)
/// - `filename*=UTF-8''percent-encoded` (RFC 5987; decoded)
///
/// If both `filename` and `filename*` exist, `filename*` takes precedence.
/// Returns `None` when no parameter yields a non-empty value.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut filename_from_token: Option<String> = None;

    for (name, value) in params(header_value) {
        if name.eq_ignore_ascii_case("filename*") {
            if let Some(decoded) = decode_ext_value(&value) {
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
        } else if name.eq_ignore_ascii_case("filename")
            && filename_from_token.is_none()
            && !value.is_empty()
        {
            filename_from_token = Some(value);
        }
    }

    filename_from_token
}

/// Splits a header value into `(name, value)` pairs. Segments without `=`
/// (the disposition type, bare flags) are skipped, so a value that is only
/// `filename=...` still yields its parameter.
/// Quoted values may contain `;` and whitespace; an unterminated quote drops that parameter.
fn params(header_value: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut chars = header_value.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if *c == ';' || c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ';' {
                break;
            }
            name.push(c);
            chars.next();
        }
        if chars.next() != Some('=') {
            // Disposition type or bare flag.
            continue;
        }
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }

        let value = if chars.peek() == Some(&'"') {
            chars.next();
            let mut v = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => match chars.next() {
                        Some(next) if next == '"' || next == '\\' => v.push(next),
                        Some(next) => {
                            v.push('\\');
                            v.push(next);
                        }
                        None => v.push('\\'),
                    },
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => v.push(c),
                }
            }
            if !closed {
                continue;
            }
            v
        } else {
            let mut v = String::new();
            while let Some(&c) = chars.peek() {
                if c == ';' || c.is_whitespace() {
                    break;
                }
                v.push(c);
                chars.next();
            }
            v
        };

        out.push((name.trim().to_string(), value));
    }

    out
}

/// Decode an RFC 5987 `charset'language'value` string. Only UTF-8 and ISO-8859-1 are understood.
fn decode_ext_value(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    let bytes = percent_decode(encoded);
    if charset.eq_ignore_ascii_case("utf-8") {
        Some(String::from_utf8_lossy(&bytes).into_owned())
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        Some(bytes.iter().map(|&b| b as char).collect())
    } else {
        None
    }
}

/// Simple percent-decode; malformed escapes are kept literally.
fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

//! Line-oriented `key=value` properties syntax.
//!
//! Supports the classic format: `#` and `!` comment lines, `=`, `:` or
//! whitespace separators, backslash line continuations and the usual escape
//! sequences including `\uXXXX`.

use thiserror::Error;

/// Errors raised by malformed properties content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesParseError {
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedUnicodeEscape { line: usize },

    #[error("unpaired surrogate \\u{code:04X} on line {line}")]
    UnpairedSurrogate { line: usize, code: u32 },
}

type Result<T> = std::result::Result<T, PropertiesParseError>;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Decode raw bytes, preferring UTF-8 and falling back to ISO-8859-1.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Parse properties text into `(key, value)` pairs in file order.
///
/// Duplicate keys are all returned; callers keep the last one.
pub fn parse(text: &str) -> Result<Vec<(String, String)>> {
    logical_lines(text)
        .into_iter()
        .map(|(line, content)| split_entry(&content, line))
        .collect()
}

/// Join continued natural lines, dropping comments and blank lines.
///
/// Each logical line is tagged with the number of its first natural line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut continuing = false;

    for (index, natural) in normalized.split('\n').enumerate() {
        let trimmed = natural.trim_start_matches(is_blank);
        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            start = index + 1;
        }

        let trailing_backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.push_str(trimmed);
            continuing = false;
            lines.push((start, std::mem::take(&mut current)));
        }
    }

    if continuing {
        lines.push((start, current));
    }
    lines
}

fn split_entry(line: &str, line_no: usize) -> Result<(String, String)> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut key_end = len;
    let mut value_start = len;
    let mut has_separator = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if !escaped && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    while value_start < len {
        let c = chars[value_start];
        if is_blank(c) {
            value_start += 1;
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            value_start += 1;
        } else {
            break;
        }
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[value_start..], line_no)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line: usize) -> Result<String> {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'u' => {
                let code = read_hex4(chars, i, line)?;
                i += 4;
                match char::from_u32(code) {
                    Some(decoded) => out.push(decoded),
                    None if (0xD800..0xDC00).contains(&code) => {
                        let low = chars
                            .get(i..i + 2)
                            .filter(|pair| *pair == ['\\', 'u'])
                            .and_then(|_| read_hex4(chars, i + 2, line).ok())
                            .filter(|low| (0xDC00..0xE000).contains(low))
                            .ok_or(PropertiesParseError::UnpairedSurrogate { line, code })?;
                        i += 6;
                        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        out.push(
                            char::from_u32(combined)
                                .ok_or(PropertiesParseError::UnpairedSurrogate { line, code })?,
                        );
                    }
                    None => return Err(PropertiesParseError::UnpairedSurrogate { line, code }),
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn read_hex4(chars: &[char], at: usize, line: usize) -> Result<u32> {
    let digits = chars
        .get(at..at + 4)
        .ok_or(PropertiesParseError::MalformedUnicodeEscape { line })?;
    digits.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16)
            .map(|d| (acc << 4) | d)
            .ok_or(PropertiesParseError::MalformedUnicodeEscape { line })
    })
}

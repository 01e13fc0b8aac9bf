//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP: Regex = Regex::new(
        r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>|<!--.*?-->|<[A-Za-z/!][^>]*>"
    )
    .unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]*);").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode numeric character references and common named entities
///
/// Unknown names and invalid code points are left as written.
pub fn html_unescape(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name.strip_prefix('#') {
                Some(num) => decode_numeric(num),
                None => named_entity(name),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_numeric(num: &str) -> Option<char> {
    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse().ok()?,
    };
    char::from_u32(code).filter(|c| *c != '\0')
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "middot" => '\u{00B7}',
        "bull" => '\u{2022}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        "times" => '\u{00D7}',
        "larr" => '\u{2190}',
        "rarr" => '\u{2192}',
        _ => return None,
    };
    Some(c)
}

/// Strip tags, comments and script/style blocks down to one line of text
///
/// # Examples
/// ```ignore
/// plain_text("<p>Hello\n<b>World</b> &amp; co</p>") // -> "Hello World & co"
/// ```
pub fn plain_text(s: &str) -> String {
    // Tags are separated by a space so adjacent blocks don't run together
    let stripped = MARKUP.replace_all(s, " ");
    let decoded = html_unescape(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Truncate a string to at most `length` characters, then append `omission`
///
/// Strings within budget come back unchanged. The result never exceeds
/// `length` characters plus the omission.
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Escape characters that would open Markdown link or emphasis syntax
pub fn markdown_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

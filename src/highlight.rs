//! HTML escaping and the display-only JSON syntax highlighter.

use regex::Regex;
use std::sync::OnceLock;

/// Five-entity escape for user-originated text interpolated into markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reserved-character escape used on the highlighter path. Quotes are left
/// alone here: the input comes from our own JSON serialization and the
/// tokenizer needs them intact.
fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

// One token per match: a quoted string (optionally followed by a colon,
// which marks an object key), a true/false/null literal, or a number.
static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| {
        Regex::new(r#""(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?\d+(\.\d+)?"#)
            .expect("json token pattern")
    })
}

/// Wrap each token of a pretty-printed JSON string in a classed span.
///
/// Assumes valid JSON produced by our own serializer; this is a lexer for
/// display, not a validator.
pub fn highlight_json(json: &str) -> String {
    let escaped = escape_markup(json);
    token_re()
        .replace_all(&escaped, |caps: &regex::Captures| {
            let m = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let class = if m.starts_with('"') {
                if m.ends_with(':') {
                    "key"
                } else {
                    "string"
                }
            } else if m == "true" || m == "false" {
                "boolean"
            } else if m == "null" {
                "null"
            } else {
                "number"
            };
            format!("<span class=\"{}\">{}</span>", class, m)
        })
        .into_owned()
}

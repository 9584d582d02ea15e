//! Escaping for text interpolated into HTML, XML and inline JSON-LD.

use serde_json::Value;

/// Escapes the five XML-significant characters. Safe for element text and
/// double- or single-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<script type="application/ld+json">` block. `<` is emitted as `\u003c` so
/// no string value can close the script element.
pub fn json_ld_script(value: &Value) -> String {
    let json = value.to_string().replace('<', "\\u003c");
    format!("<script type=\"application/ld+json\">{json}</script>")
}

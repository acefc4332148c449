use std::sync::LazyLock;

use regex::Regex;

static EMBEDDED_BLOCKS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    ["script", "iframe", "object"].map(|tag| {
        Regex::new(&format!(r"(?is)<{tag}\b.*?</{tag}\s*>")).expect("static regex")
    })
});
static DOUBLE_QUOTED_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\son\w+="[^"]*""#).expect("static regex"));
static SINGLE_QUOTED_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\son\w+='[^']*'").expect("static regex"));
static SCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("static regex"));

/// Strips embedded scripts, inline event handlers and `javascript:` URLs from
/// backend-supplied HTML.
pub fn sanitize_html(html: &str) -> String {
    let mut out = html.to_string();
    for block in EMBEDDED_BLOCKS.iter() {
        out = block.replace_all(&out, "").into_owned();
    }
    out = DOUBLE_QUOTED_HANDLER.replace_all(&out, "").into_owned();
    out = SINGLE_QUOTED_HANDLER.replace_all(&out, "").into_owned();
    SCRIPT_SCHEME.replace_all(&out, "").into_owned()
}

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

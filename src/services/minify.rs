//! Whitespace compaction for the embedded stylesheet and browser script.
//!
//! Both are line-based and deliberately naive: they only remove whitespace
//! that the sources in `static/` never rely on.

/// Compact JavaScript source.
///
/// Drops blank lines and whole-line `//` comments, strips indentation and
/// tightens `" {"` and `", "`. Line breaks are kept since the script relies
/// on automatic semicolon insertion.
pub fn minify_js(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        out.push_str(&line.replace(" {", "{").replace(", ", ","));
        out.push('\n');
    }
    out
}

/// Compact CSS source into a single line.
pub fn minify_css(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let line = line.trim_end();
        let line = match line.strip_suffix(" {") {
            Some(selector) => format!("{}{{", selector),
            None => line.to_string(),
        };
        out.push_str(&line.trim().replace(": ", ":").replace(", ", ","));
    }
    out
}

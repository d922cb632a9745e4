//! Page wrapper shared by every HTML page the bridge serves.
//!
//! The header is a constant. The footer differs in a single navigation link
//! (`/log`), which is only rendered when the websocket log is enabled.

/// Default port of the websocket log stream.
pub const WEBSOCKET_PORT: u16 = 81;

const HTML_START: &str = concat!(
    "<!DOCTYPE html>",
    "<html>",
    "<head>",
    r#"<meta name=viewport content="width=device-width, initial-scale=1">"#,
    "<title>NMEA-Bridge</title>",
    r#"<link rel="stylesheet" href="/style.css" />"#,
    "</head>",
    "<body>",
    r#"<header><div class="wrap">NMEA-Bridge</div></header>"#,
    "<content>",
    r#"<div class="wrap">"#,
);

const HTML_END_NAV: &str = concat!(
    "</div>",
    "</content>",
    "<footer>",
    r#"<div class="wrap">"#,
    r#"<a href="/">Info</a>"#,
    r#"<a href="/config">Config</a>"#,
);

const HTML_LOG_LINK: &str = r#"<a href="/log">Log</a>"#;

const HTML_END: &str = concat!("</div>", "</footer>", "</body>", "</html>");

/// Header/footer pair used to wrap page bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Whether the footer links to the log page.
    pub websocket_log: bool,
}

impl Layout {
    pub fn new(websocket_log: bool) -> Self {
        Self { websocket_log }
    }

    pub fn header(&self) -> &'static str {
        HTML_START
    }

    /// Footer including the navigation links.
    pub fn footer(&self) -> String {
        let mut footer = String::with_capacity(
            HTML_END_NAV.len() + HTML_LOG_LINK.len() + HTML_END.len(),
        );
        footer.push_str(HTML_END_NAV);
        if self.websocket_log {
            footer.push_str(HTML_LOG_LINK);
        }
        footer.push_str(HTML_END);
        footer
    }

    /// Wrap a page body into a complete HTML document.
    pub fn wrap(&self, body: &str) -> String {
        let footer = self.footer();
        let header = self.header();
        let mut page = String::with_capacity(header.len() + body.len() + footer.len());
        page.push_str(header);
        page.push_str(body);
        page.push_str(&footer);
        page
    }
}

/// Body of the log viewer page.
///
/// The browser script reads `data-port` to find the websocket endpoint, so
/// the attribute must carry the port the log socket actually listens on.
pub fn log_content(websocket_port: u16) -> String {
    format!(
        concat!(
            "<h1>Log</h1>",
            r#"<span id="indicator">disconnected</span>"#,
            r#"<div id="log" data-port="{}">"#,
            r#"<div id="empty">nothing received yet</div>"#,
            "</div>",
            r#"<form class="line">"#,
            r#"<input id="in" type="text" placeholder="Send NMEA sentence" />"#,
            r#"<button id="send" type="submit" disabled>Send</button>"#,
            "</form>",
            r#"<script src="/log_script.js"></script>"#
        ),
        websocket_port
    )
}

/// Escape text for use inside HTML element content or attribute values.
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Walks the tags of an HTML document and reports whether every element is
/// closed in order. Void elements and `<!...>` declarations are skipped.
#[cfg(test)]
pub(crate) fn is_balanced(html: &str) -> bool {
    const VOID: [&str; 5] = ["meta", "link", "input", "br", "hr"];

    let mut stack: Vec<String> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            return false;
        };
        let tag = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];

        if tag.starts_with('!') || tag.ends_with('/') {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            match stack.pop() {
                Some(open) if open == name.trim() => {}
                _ => return false,
            }
            continue;
        }
        let name = tag
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !VOID.contains(&name.as_str()) {
            stack.push(name);
        }
    }
    stack.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_HEADER: &str = "<!DOCTYPE html><html><head><meta name=viewport content=\"width=device-width, initial-scale=1\"><title>NMEA-Bridge</title><link rel=\"stylesheet\" href=\"/style.css\" /></head><body><header><div class=\"wrap\">NMEA-Bridge</div></header><content><div class=\"wrap\">";

    #[test]
    fn header_is_literal() {
        assert_eq!(Layout::new(true).header(), EXPECTED_HEADER);
        assert_eq!(Layout::new(false).header(), EXPECTED_HEADER);
    }

    #[test]
    fn footer_with_log_link() {
        assert_eq!(
            Layout::new(true).footer(),
            "</div></content><footer><div class=\"wrap\"><a href=\"/\">Info</a><a href=\"/config\">Config</a><a href=\"/log\">Log</a></div></footer></body></html>"
        );
    }

    #[test]
    fn footer_without_log_link() {
        let footer = Layout::new(false).footer();
        assert_eq!(
            footer,
            "</div></content><footer><div class=\"wrap\"><a href=\"/\">Info</a><a href=\"/config\">Config</a></div></footer></body></html>"
        );
        assert!(!footer.contains("/log"));
    }

    #[test]
    fn wrap_places_body_inside_content() {
        let page = Layout::new(true).wrap("<p>hi</p>");
        assert!(page.starts_with(EXPECTED_HEADER));
        assert!(page.contains("<div class=\"wrap\"><p>hi</p></div></content>"));
        assert!(page.ends_with("</html>"));
    }

    /// Every balanced body nested up to `depth` levels, built from text,
    /// void elements and `div`/`span`/`p`/`table` containers.
    fn balanced_bodies(depth: usize) -> Vec<String> {
        let mut bodies = vec![
            String::new(),
            "text".to_string(),
            "<br>".to_string(),
            r#"<input id="x" />"#.to_string(),
        ];
        if depth == 0 {
            return bodies;
        }
        let inner = balanced_bodies(depth - 1);
        let sibling = "<p>s</p>";
        for child in &inner {
            for content in [child.clone(), format!("{child}{sibling}")] {
                bodies.push(format!("<div>{content}</div>"));
                bodies.push(format!(r#"<span class="c">{content}</span>"#));
                bodies.push(format!("<p>{content}</p>"));
                bodies.push(format!("<table><tr><td>{content}</td></tr></table>"));
            }
        }
        bodies
    }

    #[test]
    fn wrapped_pages_are_balanced() {
        let mut bodies = balanced_bodies(3);
        bodies.push(log_content(WEBSOCKET_PORT));
        bodies.push(log_content(9000));
        assert!(bodies.len() > 2000);

        for flag in [true, false] {
            let layout = Layout::new(flag);
            for body in &bodies {
                assert!(is_balanced(&layout.wrap(body)), "unbalanced: {body}");
            }
        }
    }

    #[test]
    fn unbalanced_bodies_break_the_page() {
        let layout = Layout::new(true);
        for body in ["<div>", "</span>", "<p><span></p></span>"] {
            assert!(!is_balanced(&layout.wrap(body)), "accepted: {body}");
        }
    }

    #[test]
    fn balance_check_rejects_broken_markup() {
        assert!(!is_balanced("<div><span></div></span>"));
        assert!(!is_balanced("<div>"));
        assert!(!is_balanced("<div"));
        assert!(is_balanced("<p><input id=\"a\" /><br></p>"));
    }

    #[test]
    fn log_content_is_literal() {
        assert_eq!(
            log_content(81),
            "<h1>Log</h1><span id=\"indicator\">disconnected</span><div id=\"log\" data-port=\"81\"><div id=\"empty\">nothing received yet</div></div><form class=\"line\"><input id=\"in\" type=\"text\" placeholder=\"Send NMEA sentence\" /><button id=\"send\" type=\"submit\" disabled>Send</button></form><script src=\"/log_script.js\"></script>"
        );
    }

    #[test]
    fn log_content_carries_configured_port() {
        for port in [1, WEBSOCKET_PORT, 8081, u16::MAX] {
            assert!(log_content(port).contains(&format!("data-port=\"{port}\"")));
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}

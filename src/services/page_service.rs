//! PageService — every page and asset the web interface serves, assembled
//! once at startup.
//!
//! Pages are the constant layout wrapped around a page body. Nothing here is
//! rendered per request; handlers only clone an `Arc<str>`.

use std::sync::Arc;

use crate::{
    config::AppConfig,
    models::layout::{Layout, html_escape, log_content},
    services::minify::{minify_css, minify_js},
};

const STYLE_SOURCE: &str = include_str!("../../static/style.css");
const LOG_SCRIPT_SOURCE: &str = include_str!("../../static/log_script.js");

/// The pages reachable from the footer navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Info,
    Config,
    Log,
}

#[derive(Clone, Debug)]
pub struct PageService {
    layout: Layout,
    info: Arc<str>,
    config: Arc<str>,
    /// Absent when the websocket log is disabled.
    log: Option<Arc<str>>,
    style: Arc<str>,
    log_script: Arc<str>,
}

impl PageService {
    pub fn new(cfg: &AppConfig) -> Self {
        let layout = Layout::new(cfg.websocket_log);
        let log = cfg
            .websocket_log
            .then(|| layout.wrap(&log_content(cfg.websocket_port)).into());

        Self {
            layout,
            info: layout.wrap(&info_content(cfg)).into(),
            config: layout.wrap(&config_content(cfg)).into(),
            log,
            style: minify_css(STYLE_SOURCE).into(),
            log_script: minify_js(LOG_SCRIPT_SOURCE).into(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Rendered HTML of `page`, or `None` if the page is disabled.
    pub fn page(&self, page: Page) -> Option<Arc<str>> {
        match page {
            Page::Info => Some(self.info.clone()),
            Page::Config => Some(self.config.clone()),
            Page::Log => self.log.clone(),
        }
    }

    pub fn style(&self) -> Arc<str> {
        self.style.clone()
    }

    pub fn log_script(&self) -> Arc<str> {
        self.log_script.clone()
    }
}

fn info_content(cfg: &AppConfig) -> String {
    let websocket = if cfg.websocket_log {
        cfg.websocket_port.to_string()
    } else {
        "disabled".to_string()
    };
    let rows = [
        ("Name", env!("CARGO_PKG_NAME").to_string()),
        ("Version", env!("CARGO_PKG_VERSION").to_string()),
        ("HTTP port", cfg.port.to_string()),
        ("WebSocket port", websocket),
        ("UDP port", cfg.udp_port.to_string()),
        ("UDP target", udp_target(cfg)),
    ];
    format!("<h1>Info</h1>{}", table(&rows))
}

fn config_content(cfg: &AppConfig) -> String {
    let rows = [
        ("host", cfg.host.clone()),
        ("port", cfg.port.to_string()),
        ("websocket_port", cfg.websocket_port.to_string()),
        ("websocket_log", cfg.websocket_log.to_string()),
        ("udp_port", cfg.udp_port.to_string()),
        ("udp_target", udp_target(cfg)),
    ];
    format!("<h1>Config</h1>{}", table(&rows))
}

fn udp_target(cfg: &AppConfig) -> String {
    cfg.udp_target.clone().unwrap_or_else(|| "none".into())
}

fn table(rows: &[(&str, String)]) -> String {
    let mut html = String::from("<table>");
    for (name, value) in rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            html_escape(name),
            html_escape(value)
        ));
    }
    html.push_str("</table>");
    html
}

//! Scripted in-memory browser used by the integration tests.
//!
//! Each scroll advances to the next HTML snapshot; reads past the end keep
//! returning the last one.

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use ldsh_feed::renderer::{NavigationResult, RenderContext, Renderer};
use ldsh_feed::site;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a page whose announcement table holds `rows` of (date, title, href).
pub fn page(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(date, title, href)| {
            format!(
                "<tr><td>{date}</td><td>教務處</td><td><a href=\"{href}\">{title}</a></td></tr>"
            )
        })
        .collect();
    format!(
        "<html><body><table class=\"listTB\"><tr><th>日期</th><th>單位</th><th>標題</th></tr>{body}</table></body></html>"
    )
}

/// Counters shared between a page and the test that inspects it.
#[derive(Debug, Default)]
pub struct PageStats {
    pub scrolls: AtomicUsize,
    pub reads: AtomicUsize,
    pub closed: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    /// `snapshots[k]` is what the page shows after scroll `k + 1`.
    pub snapshots: Vec<String>,
    /// Shown before the first scroll; defaults to the first snapshot.
    pub initial: Option<String>,
    /// After each scroll, this many reads still see the previous content.
    pub lag_reads: usize,
    pub fail_navigation: bool,
    /// Scroll number (1-based) whose script call fails.
    pub fail_scroll_at: Option<usize>,
}

pub struct ScriptedPage {
    script: Script,
    stats: Arc<PageStats>,
    reads_since_scroll: AtomicUsize,
}

impl ScriptedPage {
    pub fn new(script: Script) -> (Self, Arc<PageStats>) {
        let stats = Arc::new(PageStats::default());
        (
            Self {
                script,
                stats: Arc::clone(&stats),
                reads_since_scroll: AtomicUsize::new(0),
            },
            stats,
        )
    }

    fn initial(&self) -> String {
        self.script
            .initial
            .clone()
            .or_else(|| self.script.snapshots.first().cloned())
            .unwrap_or_default()
    }

    fn after_scroll(&self, n: usize) -> String {
        if n == 0 {
            return self.initial();
        }
        let last = self.script.snapshots.len().saturating_sub(1);
        self.script
            .snapshots
            .get((n - 1).min(last))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RenderContext for ScriptedPage {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        if self.script.fail_navigation {
            bail!("net::ERR_NAME_NOT_RESOLVED");
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        if selector == site::TABLE_SELECTOR && self.initial().contains("listTB") {
            return Ok(());
        }
        bail!("timed out after {timeout_ms}ms waiting for selector `{selector}`")
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        if script != site::SCROLL_SCRIPT {
            bail!("unexpected script");
        }
        let n = self.stats.scrolls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.script.fail_scroll_at == Some(n) {
            bail!("Execution context was destroyed");
        }
        self.reads_since_scroll.store(0, Ordering::SeqCst);
        Ok(serde_json::json!(n * 1000))
    }

    async fn get_html(&self) -> Result<String> {
        self.stats.reads.fetch_add(1, Ordering::SeqCst);
        let n = self.stats.scrolls.load(Ordering::SeqCst);
        let reads = self.reads_since_scroll.fetch_add(1, Ordering::SeqCst);
        if n > 0 && reads < self.script.lag_reads {
            return Ok(self.after_scroll(n - 1));
        }
        Ok(self.after_scroll(n))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.stats.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Renderer handing out a single scripted page.
pub struct ScriptedRenderer {
    page: std::sync::Mutex<Option<ScriptedPage>>,
}

impl ScriptedRenderer {
    pub fn new(script: Script) -> (Self, Arc<PageStats>) {
        let (page, stats) = ScriptedPage::new(script);
        (
            Self {
                page: std::sync::Mutex::new(Some(page)),
            },
            stats,
        )
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self.page.lock().unwrap().take();
        match page {
            Some(page) => Ok(Box::new(page)),
            None => bail!("scripted renderer only has one page"),
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// (element name, text) pairs of an XML document, CDATA included. Panics on
/// malformed XML.
pub fn xml_text_elements(xml: &str) -> Vec<(String, String)> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    let mut current = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = String::from_utf8_lossy(e.name().as_ref()).to_string();
            }
            Ok(Event::Text(t)) => out.push((current.clone(), t.unescape().unwrap().to_string())),
            Ok(Event::CData(c)) => out.push((current.clone(), String::from_utf8_lossy(&c).to_string())),
            Ok(Event::Eof) => break,
            Err(e) => panic!("not well-formed XML: {e}"),
            _ => {}
        }
    }
    out
}

/// Text of every element named `name`, in document order.
pub fn xml_values(xml: &str, name: &str) -> Vec<String> {
    xml_text_elements(xml)
        .into_iter()
        .filter(|(n, _)| n == name)
        .map(|(_, t)| t)
        .collect()
}

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use tokio::task::JoinHandle;

use crate::api::models::ResultItem;
use crate::data_models::SearchSessionState;
use crate::emphasis::{ANSI_MARKERS, EmphasisMarkers, parse_emphasis_with};
use crate::pagination::PaginationWindow;
use crate::renderer::{PageSelector, Renderer};

const BOLD: &str = "\x1b[1m";
const RESET_BOLD: &str = "\x1b[22m";

/// Page strip as text: `1 ... 5 [6] 7 ... 13`. The active page is bracketed.
pub fn format_page_strip(window: &PaginationWindow) -> String {
    let mut parts = Vec::with_capacity(window.len() * 2);
    for control in window {
        if control.gap_before {
            parts.push("...".to_string());
        }
        if control.active {
            parts.push(format!("[{}]", control.label()));
        } else {
            parts.push(control.label().to_string());
        }
    }
    parts.join(" ")
}

/// Results table, one numbered row per hit.
pub fn format_results(results: &[ResultItem], markers: Option<EmphasisMarkers<'_>>) -> String {
    if results.is_empty() {
        return "No results.\n".to_string();
    }

    let work_width = results
        .iter()
        .map(|r| r.work.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!("    {:<work_width$}  Result\n", "Work");
    for (row, result) in results.iter().enumerate() {
        let excerpt = result.excerpt().replace('\n', " ");
        let excerpt = match markers {
            Some(markers) => parse_emphasis_with(&highlight_marks(&excerpt), markers),
            None => strip_marks(&excerpt),
        };
        out.push_str(&format!(
            "{:>3} {:<work_width$}  {}\n",
            row + 1,
            result.work,
            excerpt
        ));
    }
    out
}

// The service wraps query hits in <mark> tags.
fn highlight_marks(text: &str) -> String {
    text.replace("<mark>", BOLD).replace("</mark>", RESET_BOLD)
}

fn strip_marks(text: &str) -> String {
    text.replace("<mark>", "").replace("</mark>", "")
}

#[derive(Default)]
struct Screen {
    window: PaginationWindow,
    row_ids: Vec<String>,
    selector: Option<PageSelector>,
}

/// Renders to any writer; stands in for the browser page in the CLI.
pub struct TerminalRenderer<W> {
    out: Mutex<W>,
    screen: Mutex<Screen>,
    styled: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            screen: Mutex::new(Screen::default()),
            styled: true,
        }
    }

    /// Plain text output without escape codes.
    pub fn plain(out: W) -> Self {
        Self {
            styled: false,
            ..Self::new(out)
        }
    }

    /// Id of the 1-based `row` of the last rendered results.
    pub fn row_id(&self, row: usize) -> Option<String> {
        let screen = self.lock_screen();
        row.checked_sub(1)
            .and_then(|i| screen.row_ids.get(i))
            .cloned()
    }

    /// Activate the control labelled `label`, like clicking it.
    ///
    /// Only controls of the last rendered strip respond, and the active one is disabled.
    pub fn click_page(&self, label: u64) -> Option<JoinHandle<()>> {
        let (index, selector) = {
            let screen = self.lock_screen();
            let control = screen
                .window
                .controls()
                .iter()
                .find(|c| c.label() == label && !c.active)?;
            (control.index, screen.selector.clone()?)
        };
        selector.select(index)
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("failed to write to terminal, error: {:#}", e);
        }
    }

    fn lock_screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_results(&self, results: &[ResultItem], window: &PaginationWindow, active_page: u32) {
        {
            let mut screen = self.lock_screen();
            screen.window = window.clone();
            screen.row_ids = results.iter().map(|r| r.id.clone()).collect();
        }

        let markers = self.styled.then_some(ANSI_MARKERS);
        let mut text = format_results(results, markers);
        text.push_str(&format!(
            "Page {}: {}\n",
            u64::from(active_page) + 1,
            format_page_strip(window)
        ));
        self.write(&text);
    }

    fn render_preview(&self, markup: &str) {
        self.write(&format!("{markup}\n"));
    }

    fn search_started(&self, session: &SearchSessionState) {
        log::debug!("searching {:?} page {}", session.query, session.page + 1);
    }

    fn subscribe_page_clicks(&self, selector: PageSelector) {
        self.lock_screen().selector = Some(selector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, work: &str, fragments: &[&str]) -> ResultItem {
        ResultItem {
            id: id.to_string(),
            work: work.to_string(),
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            text: None,
        }
    }

    #[test]
    fn page_strip_marks_gaps_and_active_page() {
        let window = PaginationWindow::compute(100, 8, 5);
        assert_eq!(format_page_strip(&window), "1 ... 5 [6] 7 ... 13");

        let window = PaginationWindow::compute(0, 8, 0);
        assert_eq!(format_page_strip(&window), "[1]");
    }

    #[test]
    fn plain_results_table() {
        let results = vec![
            item("HAMLET-1", "HAMLET", &["to <mark>be</mark>", "or not"]),
            item("LEAR-2", "KING LEAR", &["_nothing_ will come"]),
        ];
        let table = format_results(&results, None);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Work"));
        assert!(lines[1].starts_with("  1 HAMLET"));
        assert!(lines[1].ends_with("to be ... or not"));
        assert!(lines[2].contains("_nothing_ will come"));
    }

    #[test]
    fn styled_results_apply_emphasis() {
        let results = vec![item("1", "LEAR", &["_nothing_ will come"])];
        let table = format_results(&results, Some(ANSI_MARKERS));
        assert!(table.contains("\x1b[3mnothing\x1b[23m will come"));
    }

    #[test]
    fn empty_results() {
        assert_eq!(format_results(&[], None), "No results.\n");
    }

    #[test]
    fn renders_preview_and_remembers_rows() {
        let renderer = TerminalRenderer::plain(Vec::new());
        let window = PaginationWindow::compute(3, 8, 0);
        renderer.render_results(&[item("A-1", "A", &["x"])], &window, 0);
        renderer.render_preview("full <em>text</em>");

        assert_eq!(renderer.row_id(1).as_deref(), Some("A-1"));
        assert_eq!(renderer.row_id(0), None);
        assert_eq!(renderer.row_id(2), None);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("Page 1: [1]"));
        assert!(out.ends_with("full <em>text</em>\n"));
    }

    #[test]
    fn clicking_without_a_subscription_does_nothing() {
        let renderer = TerminalRenderer::plain(Vec::new());
        let window = PaginationWindow::compute(100, 8, 0);
        renderer.render_results(&[], &window, 0);
        assert!(renderer.click_page(2).is_none());
    }
}

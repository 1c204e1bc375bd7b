use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ops::cache::HierarchyCache;
use crate::tui::page::{Page, PageKind};
use crate::tui::theme::Theme;
use crate::tui::wrap::wrap_text;
use crate::util::unicode::{expand_tabs, pad_to_width, truncate_to_width};

use super::help_view::help_lines;

/// What a page shows: breadcrumb header lines, then one row per child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub headers: Vec<String>,
    pub rows: Vec<String>,
    /// Shown dimmed in place of the rows when there are none
    pub empty_text: &'static str,
}

/// Resolve a page's header and rows from the cache. Rows on a Card page are
/// the description wrapped to `width`.
pub fn page_content(page: &Page, cache: &HierarchyCache, width: u16) -> PageContent {
    let board = page.board.and_then(|b| cache.board(b));
    let list = page
        .board
        .zip(page.list)
        .and_then(|(b, l)| cache.list(b, l));
    let card = match (page.board, page.list, page.card) {
        (Some(b), Some(l), Some(c)) => cache.card(b, l, c),
        _ => None,
    };
    let board_name = expand_tabs(board.map_or("", |b| b.name()));
    let list_name = expand_tabs(list.map_or("", |l| l.name()));

    match page.kind {
        PageKind::Collection => PageContent {
            headers: vec!["BOARDS".to_string()],
            rows: cache.boards().iter().map(|b| expand_tabs(b.name())).collect(),
            empty_text: "No open boards",
        },
        PageKind::Board => PageContent {
            headers: vec![format!("BOARD: {}", board_name)],
            rows: board
                .map(|b| b.children().iter().map(|l| expand_tabs(l.name())).collect())
                .unwrap_or_default(),
            empty_text: "No open lists",
        },
        PageKind::List => PageContent {
            headers: vec![
                format!("BOARD: {}", board_name),
                format!("  LIST: {}", list_name),
            ],
            rows: list
                .map(|l| l.children().iter().map(|c| expand_tabs(c.name())).collect())
                .unwrap_or_default(),
            empty_text: "No open cards",
        },
        PageKind::Card => PageContent {
            headers: vec![
                format!("BOARD: {}", board_name),
                format!("  LIST: {}", list_name),
                format!("    CARD: {}", expand_tabs(card.map_or("", |c| c.name()))),
            ],
            rows: card
                .map(|c| wrap_text(c.record.description(), usize::from(width)))
                .unwrap_or_default(),
            empty_text: "No description",
        },
        PageKind::Help => PageContent {
            headers: vec!["HELP".to_string()],
            rows: help_lines(),
            empty_text: "",
        },
    }
}

/// Draw headers and rows into `area` (the grid minus the status row).
/// The cursor row is not highlighted here.
pub fn render_page_body(
    buf: &mut Buffer,
    area: Rect,
    page: &Page,
    content: &PageContent,
    theme: &Theme,
) {
    let width = usize::from(area.width);
    let mut lines: Vec<Line> = Vec::new();

    for header in content.headers.iter().take(usize::from(page.start_line)) {
        let text = pad_to_width(&truncate_to_width(header, width), width);
        lines.push(Line::from(Span::styled(text, theme.header_style())));
    }
    // A header-less slot still occupies its line
    while lines.len() < usize::from(page.start_line) {
        lines.push(Line::from(Span::styled(" ".repeat(width), theme.header_style())));
    }

    if content.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(content.empty_text, width),
            theme.dim_style(),
        )));
    } else {
        for row in &content.rows {
            lines.push(Line::from(Span::styled(
                truncate_to_width(row, width),
                theme.text_style(),
            )));
        }
    }

    Paragraph::new(lines)
        .style(theme.text_style())
        .render(area, buf);
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ops::cache::HierarchyCache;
use crate::tui::page::{Page, PageKind};
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

const HINT: &str = "enter open  q back  ? help";

/// Render the status row: a hint (or the card's link) on the left and the
/// cursor position on the right, filled to the full width.
pub fn render_status_row(
    buf: &mut Buffer,
    area: Rect,
    page: &Page,
    row_count: usize,
    cache: &HierarchyCache,
    theme: &Theme,
) {
    let width = usize::from(area.width);
    let position = if row_count == 0 {
        "(0/0)".to_string()
    } else {
        format!("({}/{})", page.selected_index() + 1, row_count)
    };

    let left = match page.kind {
        PageKind::Card => card_link(page, cache).unwrap_or(HINT),
        _ => HINT,
    };

    let position_width = display_width(&position);
    let left = truncate_to_width(left, width.saturating_sub(position_width + 1));
    let padding = width.saturating_sub(display_width(&left) + position_width);

    let line = Line::from(vec![
        Span::styled(left, theme.status_style()),
        Span::styled(" ".repeat(padding), theme.status_style()),
        Span::styled(position, theme.status_style()),
    ]);
    Paragraph::new(line)
        .style(theme.status_style())
        .render(area, buf);
}

fn card_link<'a>(page: &Page, cache: &'a HierarchyCache) -> Option<&'a str> {
    let card = cache.card(page.board?, page.list?, page.card?)?;
    card.record.short_url.as_deref()
}

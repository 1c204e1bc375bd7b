pub mod help_view;
pub mod page_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::ops::cache::HierarchyCache;
use crate::tui::page::Page;
use crate::tui::theme::Theme;

use page_view::{page_content, render_page_body};
use status_row::render_status_row;

/// Number of selectable rows below the header of `page` on a grid `width`
/// cells wide
pub fn row_count(page: &Page, cache: &HierarchyCache, width: u16) -> usize {
    page_content(page, cache, width).rows.len()
}

/// Draw `page` into a fresh grid covering `area`, with the row under the
/// cursor highlighted.
pub fn render_page(area: Rect, page: &Page, cache: &HierarchyCache, theme: &Theme) -> Buffer {
    let mut buf = Buffer::empty(area);
    let content = page_content(page, cache, area.width);
    let (body, status) = split_status_row(area);

    render_page_body(&mut buf, body, page, &content, theme);
    if !content.rows.is_empty() {
        restyle_line(&mut buf, body, page.cursor.line, theme.cursor_style());
    }
    if let Some(status) = status {
        render_status_row(&mut buf, status, page, content.rows.len(), cache, theme);
    }
    buf
}

/// Move the highlight from `old_line` to the page's cursor line and redraw
/// the status row. Nothing else in the grid is touched.
pub fn move_highlight(
    buf: &mut Buffer,
    page: &Page,
    old_line: u16,
    cache: &HierarchyCache,
    theme: &Theme,
) {
    let area = buf.area;
    let (body, status) = split_status_row(area);
    restyle_line(buf, body, old_line, theme.text_style());
    restyle_line(buf, body, page.cursor.line, theme.cursor_style());
    if let Some(status) = status {
        let rows = row_count(page, cache, area.width);
        render_status_row(buf, status, page, rows, cache, theme);
    }
}

/// Copy the session grid onto a frame's buffer, clipped to `area`.
pub fn blit(screen: &Buffer, target: &mut Buffer, area: Rect) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src), Some(dst)) = (screen.cell((x, y)), target.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

/// Split off the bottom line for the status row when there is room.
fn split_status_row(area: Rect) -> (Rect, Option<Rect>) {
    if area.height < 2 {
        return (area, None);
    }
    let body = Rect {
        height: area.height - 1,
        ..area
    };
    let status = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };
    (body, Some(status))
}

/// Restyle a full-width line of `area`. Lines outside the area are ignored.
fn restyle_line(buf: &mut Buffer, area: Rect, line: u16, style: Style) {
    let Some(y) = area.top().checked_add(line) else {
        return;
    };
    if y >= area.bottom() {
        return;
    }
    for x in area.left()..area.right() {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.modifier = Modifier::empty();
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::page::PageKind;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;
    use ratatui::style::Color;

    #[test]
    fn collection_page() {
        let cache = sample_cache();
        let buf = render_page(area(40, 6), &Page::collection(), &cache, &Theme::default());
        assert_snapshot!(buffer_to_string(&buf), @r"
BOARDS
Alpha
Beta


enter open  q back  ? help         (1/2)
");
    }

    #[test]
    fn list_page_breadcrumb() {
        let mut cache = sample_cache();
        cache.lists_of(1).unwrap();
        cache.cards_of(1, 0).unwrap();
        let mut page = Page::new(PageKind::List);
        page.board = Some(1);
        page.list = Some(0);
        let buf = render_page(area(40, 6), &page, &cache, &Theme::default());
        assert_snapshot!(buffer_to_string(&buf), @r"
BOARD: Beta
  LIST: Todo
Write docs
Ship it

enter open  q back  ? help         (1/2)
");
    }

    #[test]
    fn card_page_wraps_description_and_shows_link() {
        let mut cache = sample_cache();
        cache.lists_of(1).unwrap();
        cache.cards_of(1, 0).unwrap();
        let mut page = Page::new(PageKind::Card);
        page.board = Some(1);
        page.list = Some(0);
        page.card = Some(0);
        let buf = render_page(area(24, 8), &page, &cache, &Theme::default());
        assert_snapshot!(buffer_to_string(&buf), @r"
BOARD: Beta
  LIST: Todo
    CARD: Write docs
Document every public
function.


https://trello.co… (1/2)
");
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut cache = sample_cache();
        cache.lists_of(1).unwrap();
        cache.cards_of(1, 1).unwrap();
        let mut page = Page::new(PageKind::List);
        page.board = Some(1);
        page.list = Some(1);
        let buf = render_page(area(40, 4), &page, &cache, &Theme::default());
        assert_snapshot!(buffer_to_string(&buf), @r"
BOARD: Beta
  LIST: Done
No open cards
enter open  q back  ? help         (0/0)
");
    }

    #[test]
    fn headers_fill_the_full_width() {
        let cache = sample_cache();
        let buf = render_page(area(20, 4), &Page::collection(), &cache, &Theme::default());
        for x in 0..20 {
            let cell = buf.cell((x, 0)).unwrap();
            assert!(cell.modifier.contains(Modifier::REVERSED), "column {}", x);
        }
    }

    #[test]
    fn names_with_tabs_keep_header_full_width() {
        use crate::ops::cache::BOARDS_PATH;
        use crate::ops::test_gateway::FakeGateway;
        use serde_json::json;

        let gw = FakeGateway::new()
            .with(BOARDS_PATH, json!([{ "id": "b1", "name": "Q3\tplans" }]))
            .with("/boards/b1/lists", json!([{ "id": "l1", "name": "to\tdo" }]));
        let mut cache = HierarchyCache::load(Box::new(gw)).unwrap();
        cache.lists_of(0).unwrap();
        let mut page = Page::new(PageKind::Board);
        page.board = Some(0);

        let buf = render_page(area(24, 4), &page, &cache, &Theme::default());
        for x in 0..24 {
            let cell = buf.cell((x, 0)).unwrap();
            assert!(cell.modifier.contains(Modifier::REVERSED), "column {}", x);
            assert_ne!(cell.symbol(), "\t");
        }
        let text = buffer_to_string(&buf);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("BOARD: Q3    plans"));
        assert_eq!(lines.next(), Some("to    do"));
    }

    #[test]
    fn only_cursor_row_is_highlighted() {
        let cache = sample_cache();
        let theme = Theme::default();
        let buf = render_page(area(20, 5), &Page::collection(), &cache, &theme);
        assert_eq!(highlighted_lines(&buf, &theme), vec![1]);
        // The highlight spans the whole row, past the end of the name
        assert_eq!(buf.cell((19, 1)).unwrap().fg, Color::Yellow);
    }

    #[test]
    fn move_highlight_restyles_two_lines() {
        let cache = sample_cache();
        let theme = Theme::default();
        let mut page = Page::collection();
        let mut buf = render_page(area(20, 5), &page, &cache, &theme);

        page.cursor.line = 2;
        move_highlight(&mut buf, &page, 1, &cache, &theme);
        assert_eq!(highlighted_lines(&buf, &theme), vec![2]);

        // Same grid as drawing the page from scratch
        assert_eq!(buf, render_page(area(20, 5), &page, &cache, &theme));
    }

    #[test]
    fn blit_copies_grid_to_terminal() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let cache = sample_cache();
        let screen = render_page(area(20, 4), &Page::collection(), &cache, &Theme::default());
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                blit(&screen, frame.buffer_mut(), area);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer(), &screen);
    }

    #[test]
    fn tiny_grid_has_no_status_row() {
        let cache = sample_cache();
        let buf = render_page(area(10, 1), &Page::collection(), &cache, &Theme::default());
        assert_eq!(buffer_to_string(&buf), "BOARDS");
    }
}

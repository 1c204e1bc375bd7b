use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use serde_json::json;

use crate::ops::cache::{BOARDS_PATH, HierarchyCache};
use crate::ops::test_gateway::FakeGateway;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 40;
pub const TERM_H: u16 = 12;

pub fn area(w: u16, h: u16) -> Rect {
    Rect::new(0, 0, w, h)
}

/// Plain text of a grid (no styles), trailing spaces and blank lines trimmed.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Grid rows drawn with the cursor style across their full width
pub fn highlighted_lines(buf: &Buffer, theme: &Theme) -> Vec<u16> {
    let area = buf.area;
    (area.top()..area.bottom())
        .filter(|&y| {
            (area.left()..area.right()).all(|x| {
                buf.cell((x, y)).is_some_and(|c| {
                    c.fg == theme.highlight && c.modifier.contains(Modifier::BOLD)
                })
            })
        })
        .collect()
}

/// Two boards. Beta has lists Todo (two cards) and Done (no cards);
/// Alpha has no lists. Closed records are mixed in at every level.
pub fn sample_gateway() -> FakeGateway {
    FakeGateway::new()
        .with(
            BOARDS_PATH,
            json!([
                { "id": "b1", "name": "Alpha" },
                { "id": "b0", "name": "Retired", "closed": true },
                { "id": "b2", "name": "Beta" }
            ]),
        )
        .with("/boards/b1/lists", json!([]))
        .with(
            "/boards/b2/lists",
            json!([
                { "id": "l1", "name": "Todo" },
                { "id": "l9", "name": "Archived", "closed": true },
                { "id": "l2", "name": "Done" }
            ]),
        )
        .with(
            "/lists/l1/cards",
            json!([
                {
                    "id": "c1",
                    "name": "Write docs",
                    "desc": "Document every public function.",
                    "shortUrl": "https://trello.com/c/abc123"
                },
                { "id": "c8", "name": "Abandoned", "closed": true },
                { "id": "c2", "name": "Ship it", "desc": "" }
            ]),
        )
        .with(
            "/lists/l2/cards",
            json!([{ "id": "c7", "name": "Old news", "closed": true }]),
        )
}

pub fn sample_cache() -> HierarchyCache {
    HierarchyCache::load(Box::new(sample_gateway())).unwrap()
}

use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode::{expand_tabs, grapheme_display_width};

/// Word-wrap free text into screen lines of at most `width` cells.
///
/// Each `\n`-separated line wraps on its own; blank lines are kept, but
/// trailing blank lines are dropped. Whitespace at a wrap point is
/// swallowed and words wider than `width` are split between graphemes.
/// Tabs expand to four spaces. Empty text produces no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let expanded = expand_tabs(&text.replace('\r', ""));
    let mut lines: Vec<String> = Vec::new();
    for logical in expanded.split('\n') {
        wrap_line(logical, width, &mut lines);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    if width == 0 {
        out.push(line.to_string());
        return;
    }

    let mut current = String::new();
    let mut col = 0usize;
    for token in tokens(line) {
        let is_ws = token.chars().all(char::is_whitespace);
        let token_w: usize = token.graphemes(true).map(grapheme_display_width).sum();

        if col + token_w <= width {
            current.push_str(token);
            col += token_w;
        } else if is_ws {
            // Break here and drop the whitespace
            if col > 0 {
                out.push(std::mem::take(&mut current));
                col = 0;
            }
        } else {
            if col > 0 {
                out.push(std::mem::take(&mut current).trim_end().to_string());
                col = 0;
            }
            for g in token.graphemes(true) {
                let gw = grapheme_display_width(g);
                if col + gw > width && col > 0 {
                    out.push(std::mem::take(&mut current));
                    col = 0;
                }
                current.push_str(g);
                col += gw;
            }
        }
    }
    out.push(current);
}

/// Split into alternating runs of whitespace and non-whitespace.
fn tokens(line: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut prev_ws: Option<bool> = None;
    for (i, c) in line.char_indices() {
        let ws = c.is_whitespace();
        if prev_ws.is_some_and(|p| p != ws) {
            result.push(&line[start..i]);
            start = i;
        }
        prev_ws = Some(ws);
    }
    if start < line.len() {
        result.push(&line[start..]);
    }
    result
}

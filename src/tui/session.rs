use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::ops::cache::{FetchError, HierarchyCache};

use super::page::{Page, PageKind};
use super::render;
use super::theme::Theme;

/// A navigation request, already decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    DrillIn,
    Back,
    CursorDown,
    CursorUp,
    Help,
    Quit,
}

/// Everything one browsing session owns: the hierarchy cache, the page on
/// screen, the back-stack of earlier pages and the rendered grid.
///
/// Events are applied one at a time; a fetch triggered by drilling in
/// blocks until it completes.
pub struct Session {
    cache: HierarchyCache,
    theme: Theme,
    current: Page,
    stack: Vec<Page>,
    screen: Buffer,
    pub should_quit: bool,
}

impl Session {
    /// Start on the board collection with the cursor on the first board.
    pub fn new(cache: HierarchyCache, theme: Theme, area: Rect) -> Self {
        let current = Page::collection();
        let screen = render::render_page(area, &current, &cache, &theme);
        Session {
            cache,
            theme,
            current,
            stack: Vec::new(),
            screen,
            should_quit: false,
        }
    }

    pub fn current_page(&self) -> &Page {
        &self.current
    }

    /// Number of pages on the back-stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The rendered grid for the current page
    pub fn screen(&self) -> &Buffer {
        &self.screen
    }

    pub fn cache(&self) -> &HierarchyCache {
        &self.cache
    }

    /// Selectable rows on the current page
    pub fn row_count(&self) -> usize {
        render::row_count(&self.current, &self.cache, self.screen.area.width)
    }

    /// Apply one event. Only a failed fetch is an error.
    pub fn handle(&mut self, event: NavEvent) -> Result<(), FetchError> {
        match event {
            NavEvent::DrillIn => self.drill_in()?,
            NavEvent::Back => self.go_back(),
            NavEvent::CursorDown => self.cursor_down(),
            NavEvent::CursorUp => self.cursor_up(),
            NavEvent::Help => self.show_help(),
            NavEvent::Quit => self.force_quit(),
        }
        Ok(())
    }

    /// Open the child under the cursor, fetching its children first if the
    /// new page lists them. No-op on Card and Help pages and when there is
    /// nothing to select.
    pub fn drill_in(&mut self) -> Result<(), FetchError> {
        let idx = self.current.selected_index();
        let next = match self.current.kind {
            PageKind::Collection => {
                if self.cache.lists_of(idx)?.is_none() {
                    return Ok(());
                }
                let mut page = Page::new(PageKind::Board);
                page.board = Some(idx);
                page
            }
            PageKind::Board => {
                let Some(board) = self.current.board else {
                    return Ok(());
                };
                if self.cache.cards_of(board, idx)?.is_none() {
                    return Ok(());
                }
                let mut page = Page::new(PageKind::List);
                page.board = Some(board);
                page.list = Some(idx);
                page
            }
            PageKind::List => {
                let (Some(board), Some(list)) = (self.current.board, self.current.list) else {
                    return Ok(());
                };
                if self.cache.card(board, list, idx).is_none() {
                    return Ok(());
                }
                let mut page = Page::new(PageKind::Card);
                page.board = Some(board);
                page.list = Some(list);
                page.card = Some(idx);
                page
            }
            PageKind::Card | PageKind::Help => return Ok(()),
        };

        tracing::debug!(from = ?self.current.kind, to = ?next.kind, index = idx, "drill in");
        self.push(next);
        Ok(())
    }

    /// Return to the previous page exactly as it was left. With an empty
    /// stack this ends the session.
    pub fn go_back(&mut self) {
        let Some(mut page) = self.stack.pop() else {
            tracing::debug!("back on root page, quitting");
            self.should_quit = true;
            return;
        };
        let snapshot = page.snapshot.take();
        tracing::debug!(to = ?page.kind, depth = self.stack.len(), "back");
        self.current = page;
        match snapshot {
            Some(grid) if grid.area == self.screen.area => self.screen = grid,
            // The terminal changed size since the page was pushed
            _ => self.redraw(),
        }
    }

    pub fn cursor_down(&mut self) {
        let rows = self.row_count();
        let line = self.current.cursor.line;
        let last = usize::from(self.current.start_line) + rows.saturating_sub(1);
        if rows == 0 || usize::from(line) >= last {
            return;
        }
        self.move_cursor_to(line + 1);
    }

    pub fn cursor_up(&mut self) {
        let line = self.current.cursor.line;
        if line <= self.current.start_line {
            return;
        }
        self.move_cursor_to(line - 1);
    }

    /// Push the key bindings page. Ignored when it is already showing.
    pub fn show_help(&mut self) {
        if self.current.kind == PageKind::Help {
            return;
        }
        self.push(Page::new(PageKind::Help));
    }

    /// End the session regardless of stack depth.
    pub fn force_quit(&mut self) {
        self.should_quit = true;
    }

    /// Re-render the current page for a new grid size.
    pub fn resize(&mut self, area: Rect) {
        if area == self.screen.area {
            return;
        }
        self.screen = Buffer::empty(area);
        self.redraw();
    }

    fn move_cursor_to(&mut self, line: u16) {
        let old = self.current.cursor.line;
        self.current.cursor.line = line;
        render::move_highlight(&mut self.screen, &self.current, old, &self.cache, &self.theme);
    }

    /// Freeze the current page with its grid onto the stack and show `next`.
    fn push(&mut self, next: Page) {
        let mut prev = std::mem::replace(&mut self.current, next);
        prev.snapshot = Some(self.screen.clone());
        self.stack.push(prev);
        self.redraw();
    }

    /// Draw the current page from cache data, keeping the cursor in range.
    fn redraw(&mut self) {
        let rows = self.row_count();
        let last = usize::from(self.current.start_line) + rows.saturating_sub(1);
        if usize::from(self.current.cursor.line) > last {
            self.current.cursor.line = u16::try_from(last).unwrap_or(u16::MAX);
        }
        self.screen = render::render_page(self.screen.area, &self.current, &self.cache, &self.theme);
    }
}

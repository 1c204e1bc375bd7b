use ratatui::buffer::Buffer;

/// Which screen a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// All boards of the signed-in member
    Collection,
    /// The lists of one board
    Board,
    /// The cards of one list
    List,
    /// One card's description
    Card,
    /// Key bindings
    Help,
}

impl PageKind {
    /// Number of header lines above the first content row
    pub fn start_line(self) -> u16 {
        match self {
            PageKind::Collection => 1,
            PageKind::Board => 1,
            PageKind::List => 2,
            PageKind::Card => 3,
            PageKind::Help => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: u16,
    pub column: u16,
}

/// A navigation-visible screen.
///
/// `board`/`list`/`card` index into the hierarchy cache, which owns the
/// nodes. `snapshot` is only set while the page sits on the back-stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    pub board: Option<usize>,
    pub list: Option<usize>,
    pub card: Option<usize>,
    pub cursor: Cursor,
    pub start_line: u16,
    pub snapshot: Option<Buffer>,
}

impl Page {
    /// A page of `kind` with the cursor on its first content row
    pub fn new(kind: PageKind) -> Self {
        let start_line = kind.start_line();
        Page {
            kind,
            board: None,
            list: None,
            card: None,
            cursor: Cursor {
                line: start_line,
                column: 0,
            },
            start_line,
            snapshot: None,
        }
    }

    pub fn collection() -> Self {
        Page::new(PageKind::Collection)
    }

    /// Zero-based child index of the row under the cursor
    pub fn selected_index(&self) -> usize {
        usize::from(self.cursor.line.saturating_sub(self.start_line))
    }
}

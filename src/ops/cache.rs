use serde_json::Value;

use crate::io::gateway::{Gateway, GatewayError};
use crate::model::{Board, Card, List, Node, Record};

/// Resource path for the signed-in member's boards
pub const BOARDS_PATH: &str = "/members/me/boards";

/// Error type for cache fetches
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("unexpected response from {path}: expected a JSON array")]
    NotAnArray { path: String },
    #[error("could not parse record from {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

pub fn lists_path(board_id: &str) -> String {
    format!("/boards/{}/lists", board_id)
}

pub fn cards_path(list_id: &str) -> String {
    format!("/lists/{}/cards", list_id)
}

/// In-memory Board → List → Card tree, filled lazily from the gateway.
///
/// The board collection is fetched once when the cache is created; each
/// board's lists and each list's cards are fetched the first time they are
/// asked for and never again.
pub struct HierarchyCache {
    gateway: Box<dyn Gateway>,
    boards: Vec<Board>,
}

impl HierarchyCache {
    /// Fetch the board collection and build the cache around it.
    pub fn load(gateway: Box<dyn Gateway>) -> Result<Self, FetchError> {
        let boards = fetch_nodes(gateway.as_ref(), BOARDS_PATH)?;
        Ok(HierarchyCache { gateway, boards })
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_idx: usize) -> Option<&Board> {
        self.boards.get(board_idx)
    }

    pub fn list(&self, board_idx: usize, list_idx: usize) -> Option<&List> {
        self.board(board_idx)?.child(list_idx)
    }

    pub fn card(&self, board_idx: usize, list_idx: usize, card_idx: usize) -> Option<&Card> {
        self.list(board_idx, list_idx)?.child(card_idx)
    }

    /// Lists of a board, fetching them on first use.
    /// Returns `Ok(None)` if `board_idx` is out of range.
    pub fn lists_of(&mut self, board_idx: usize) -> Result<Option<&[List]>, FetchError> {
        let Some(board) = self.boards.get_mut(board_idx) else {
            return Ok(None);
        };
        fill_children(self.gateway.as_ref(), board, lists_path)?;
        Ok(Some(board.children()))
    }

    /// Cards of a list, fetching them on first use.
    /// Returns `Ok(None)` if either index is out of range.
    pub fn cards_of(
        &mut self,
        board_idx: usize,
        list_idx: usize,
    ) -> Result<Option<&[Card]>, FetchError> {
        let Some(list) = self
            .boards
            .get_mut(board_idx)
            .and_then(|b| b.children_mut().get_mut(list_idx))
        else {
            return Ok(None);
        };
        fill_children(self.gateway.as_ref(), list, cards_path)?;
        Ok(Some(list.children()))
    }
}

/// Fetch a node's children unless they are already cached.
fn fill_children<C: From<Record>>(
    gateway: &dyn Gateway,
    node: &mut Node<C>,
    path_for: fn(&str) -> String,
) -> Result<(), FetchError> {
    if node.children_fetched() {
        tracing::debug!(id = node.id(), "cache hit");
        return Ok(());
    }
    let children = fetch_nodes(gateway, &path_for(node.id()))?;
    node.store_children(children);
    Ok(())
}

/// GET `path`, parse the array of records and drop closed ones.
fn fetch_nodes<C: From<Record>>(gateway: &dyn Gateway, path: &str) -> Result<Vec<C>, FetchError> {
    let value = gateway.get_json(path)?;
    let Value::Array(items) = value else {
        return Err(FetchError::NotAnArray {
            path: path.to_string(),
        });
    };

    let total = items.len();
    let mut nodes = Vec::with_capacity(total);
    for item in items {
        let record = Record::from_value(item).map_err(|e| FetchError::Parse {
            path: path.to_string(),
            source: e,
        })?;
        if record.closed {
            continue;
        }
        nodes.push(C::from(record));
    }
    tracing::info!(%path, total, open = nodes.len(), "fetched");
    Ok(nodes)
}

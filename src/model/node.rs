use super::record::Record;

/// A record plus its lazily fetched children.
///
/// `children_fetched` starts false and flips to true exactly once, when
/// the first (and only) fetch for this node is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<C> {
    pub record: Record,
    children: Vec<C>,
    children_fetched: bool,
}

/// A board and its lists
pub type Board = Node<List>;
/// A list and its cards
pub type List = Node<Card>;
/// A card and its checklists (never fetched: cards are navigation leaves)
pub type Card = Node<Checklist>;
/// A checklist and its items (never fetched)
pub type Checklist = Node<CheckItem>;
/// A single checklist item
pub type CheckItem = Record;

impl<C> Node<C> {
    pub fn new(record: Record) -> Self {
        Node {
            record,
            children: Vec::new(),
            children_fetched: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn children_fetched(&self) -> bool {
        self.children_fetched
    }

    /// Cached children. Empty until the node has been fetched.
    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn child(&self, idx: usize) -> Option<&C> {
        self.children.get(idx)
    }

    pub(crate) fn children_mut(&mut self) -> &mut [C] {
        &mut self.children
    }

    /// Store the result of the node's single fetch. Ignored if children
    /// were already stored.
    pub(crate) fn store_children(&mut self, children: Vec<C>) {
        if self.children_fetched {
            return;
        }
        self.children = children;
        self.children_fetched = true;
    }
}

impl<C> From<Record> for Node<C> {
    fn from(record: Record) -> Self {
        Node::new(record)
    }
}

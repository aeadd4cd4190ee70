//! Arena cells of the toroidal linked structure
//!
//! Nodes are addressed by their index in a single `Vec`. Index 0 is the
//! sentinel root of the header ring, indices `1..=width` are the column
//! headers (header of column `c` is node `c + 1`), and every node after
//! that is a cell belonging to one input row.

/// Index of a node in the arena
pub(crate) type NodeId = usize;

/// The sentinel heading the ring of active column headers
pub(crate) const ROOT: NodeId = 0;

/// One cell of the sparse matrix with its four ring neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub left: NodeId,
    pub right: NodeId,
    pub up: NodeId,
    pub down: NodeId,
    /// Owning column; meaningless for the root
    pub column: usize,
    /// Input row this cell was built from; `None` for the root and headers
    pub row: Option<usize>,
}

impl Node {
    pub fn root(width: usize) -> Self {
        Self {
            left: width,
            right: 1,
            up: ROOT,
            down: ROOT,
            column: 0,
            row: None,
        }
    }

    /// Header for `column`, linked into the header ring between its
    /// neighbors in declaration order and heading an empty vertical ring
    pub fn header(column: usize, width: usize) -> Self {
        let id = column + 1;
        Self {
            left: column,
            right: (column + 2) % (width + 1),
            up: id,
            down: id,
            column,
            row: None,
        }
    }

    /// A row cell, initially a ring of one horizontally
    pub fn cell(id: NodeId, column: usize, row: usize, up: NodeId, down: NodeId) -> Self {
        Self {
            left: id,
            right: id,
            up,
            down,
            column,
            row: Some(row),
        }
    }
}

/// Header-only data, stored in a table parallel to the header nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Column {
    /// Item id, `0..width`
    pub id: usize,
    /// Arena index of this column's header node
    pub header: NodeId,
    /// Live-count: currently uncovered rows intersecting this column
    pub size: usize,
}

impl Column {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            header: id + 1,
            size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_ring_wraps_through_root() {
        let width = 3;
        let headers: Vec<Node> = (0..width).map(|c| Node::header(c, width)).collect();
        let root = Node::root(width);

        assert_eq!(root.right, 1);
        assert_eq!(root.left, 3);
        assert_eq!(headers[0].left, ROOT);
        assert_eq!(headers[0].right, 2);
        assert_eq!(headers[2].left, 2);
        assert_eq!(headers[2].right, ROOT);
    }

    #[test]
    fn test_single_column_ring() {
        let header = Node::header(0, 1);
        assert_eq!(header.left, ROOT);
        assert_eq!(header.right, ROOT);
        assert_eq!(header.up, 1);
        assert_eq!(header.down, 1);
    }

    #[test]
    fn test_column_header_index() {
        let column = Column::new(4);
        assert_eq!(column.header, 5);
        assert_eq!(column.size, 0);
    }
}

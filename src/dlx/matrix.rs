//! The toroidal dancing-links matrix and its cover/uncover primitives

use super::error::DlxError;
use super::node::{Column, Node, NodeId, ROOT};
use crate::relation::Relation;

/// Sparse, circularly linked representation of an incidence relation.
///
/// All nodes are allocated once by [`DancingMatrix::new`]. Searching only
/// relinks them and adjusts live-counts, and every search leaves the
/// structure exactly as it found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DancingMatrix {
    nodes: Vec<Node>,
    columns: Vec<Column>,
    /// First cell of each input row, `None` for rows with no items
    row_heads: Vec<Option<NodeId>>,
}

impl DancingMatrix {
    /// Build the linked structure from a relation in one pass.
    ///
    /// A relation with no candidate rows is rejected.
    pub fn new(relation: &Relation) -> Result<Self, DlxError> {
        if relation.row_count() == 0 {
            return Err(DlxError::invalid_shape("relation has no rows"));
        }
        let width = relation.width();
        let mut nodes = Vec::with_capacity(1 + width + relation.set_count());
        nodes.push(Node::root(width));
        nodes.extend((0..width).map(|column| Node::header(column, width)));
        let mut columns: Vec<Column> = (0..width).map(Column::new).collect();
        let mut row_heads = Vec::with_capacity(relation.row_count());

        for row in 0..relation.row_count() {
            let first = nodes.len();
            for column in relation.items(row) {
                let id = nodes.len();
                let header = columns[column].header;
                let bottom = nodes[header].up;
                nodes.push(Node::cell(id, column, row, bottom, header));
                nodes[bottom].down = id;
                nodes[header].up = id;
                columns[column].size += 1;
            }
            let end = nodes.len();

            if first == end {
                row_heads.push(None);
                continue;
            }
            for id in first..end {
                nodes[id].left = if id == first { end - 1 } else { id - 1 };
                nodes[id].right = if id + 1 == end { first } else { id + 1 };
            }
            row_heads.push(Some(first));
        }

        log::debug!(
            "built dancing matrix: {} columns, {} rows, {} nodes",
            width,
            relation.row_count(),
            nodes.len()
        );

        Ok(Self {
            nodes,
            columns,
            row_heads,
        })
    }

    /// Number of items (columns) the matrix was built with
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of input rows, including rows that contributed no nodes
    pub fn row_count(&self) -> usize {
        self.row_heads.len()
    }

    /// Total arena size, including the root and the column headers
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the header ring is empty, i.e. every column is covered
    pub fn is_fully_covered(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Ids of the currently uncovered columns in declaration order
    pub fn active_columns(&self) -> ActiveColumns<'_> {
        ActiveColumns {
            matrix: self,
            cursor: self.nodes[ROOT].right,
        }
    }

    /// Live-count of a column, `None` when out of range
    pub fn column_size(&self, column: usize) -> Option<usize> {
        self.columns.get(column).map(|c| c.size)
    }

    /// Column ids covered by an input row, found by walking its ring.
    ///
    /// Returns `None` for rows that are out of range or contain no items.
    pub fn row_columns(&self, row: usize) -> Option<Vec<usize>> {
        let head = (*self.row_heads.get(row)?)?;
        let mut columns = vec![self.columns[self.nodes[head].column].id];
        let mut node = self.nodes[head].right;
        while node != head {
            columns.push(self.columns[self.nodes[node].column].id);
            node = self.nodes[node].right;
        }
        Some(columns)
    }

    pub(super) fn live_count(&self, column: usize) -> usize {
        self.columns[column].size
    }

    pub(super) fn header(&self, column: usize) -> NodeId {
        self.columns[column].header
    }

    pub(super) fn up(&self, node: NodeId) -> NodeId {
        self.nodes[node].up
    }

    pub(super) fn down(&self, node: NodeId) -> NodeId {
        self.nodes[node].down
    }

    pub(super) fn left(&self, node: NodeId) -> NodeId {
        self.nodes[node].left
    }

    pub(super) fn right(&self, node: NodeId) -> NodeId {
        self.nodes[node].right
    }

    pub(super) fn column_of(&self, node: NodeId) -> usize {
        self.nodes[node].column
    }

    pub(super) fn row_of(&self, node: NodeId) -> Option<usize> {
        self.nodes[node].row
    }

    /// Remove `column` from the header ring and hide every row intersecting
    /// it from the other columns. Returns the number of nodes unlinked.
    ///
    /// Calls must be undone by [`uncover`](Self::uncover) in strict LIFO
    /// order; nothing checks this.
    pub(super) fn cover(&mut self, column: usize) -> usize {
        let header = self.columns[column].header;
        let Node { left, right, .. } = self.nodes[header];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut unlinked = 0;
        let mut i = self.nodes[header].down;
        while i != header {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, column, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.columns[column].size -= 1;
                unlinked += 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
        unlinked
    }

    /// Exact inverse of [`cover`](Self::cover): walks the column upwards and
    /// each row leftwards, the mirror of the forward traversal.
    pub(super) fn uncover(&mut self, column: usize) {
        let header = self.columns[column].header;

        let mut i = self.nodes[header].up;
        while i != header {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, column, .. } = self.nodes[j];
                self.columns[column].size += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[header];
        self.nodes[right].left = header;
        self.nodes[left].right = header;
    }
}

/// Iterator over uncovered column ids, created by [`DancingMatrix::active_columns`]
pub struct ActiveColumns<'a> {
    matrix: &'a DancingMatrix,
    cursor: NodeId,
}

impl Iterator for ActiveColumns<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == ROOT {
            return None;
        }
        let column = self.matrix.nodes[self.cursor].column;
        self.cursor = self.matrix.nodes[self.cursor].right;
        Some(column)
    }
}

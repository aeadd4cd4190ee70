//! Column selection: branch on the most constrained item

use super::matrix::DancingMatrix;

/// Column picked for branching together with its live-count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ColumnChoice {
    pub column: usize,
    pub size: usize,
}

/// Return an active column of minimum live-count, earliest-declared on ties.
///
/// A choice with `size == 0` means no remaining row can cover that item and
/// the current branch is a dead end. Returns `None` when every column is
/// covered.
pub(super) fn choose_column(matrix: &DancingMatrix) -> Option<ColumnChoice> {
    let mut best: Option<ColumnChoice> = None;
    for column in matrix.active_columns() {
        let size = matrix.live_count(column);
        if best.map_or(true, |b| size < b.size) {
            best = Some(ColumnChoice { column, size });
            if size == 0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relation;

    #[test]
    fn test_minimum_live_count_wins() {
        let relation = Relation::from_bits(&[[1, 1, 1], [1, 0, 1], [0, 0, 1]]).unwrap();
        let matrix = DancingMatrix::new(&relation).unwrap();
        assert_eq!(
            choose_column(&matrix),
            Some(ColumnChoice { column: 1, size: 1 })
        );
    }

    #[test]
    fn test_ties_go_to_earliest_column() {
        let relation = Relation::from_bits(&[[1, 1, 0], [0, 1, 1], [1, 0, 1]]).unwrap();
        let matrix = DancingMatrix::new(&relation).unwrap();
        assert_eq!(
            choose_column(&matrix),
            Some(ColumnChoice { column: 0, size: 2 })
        );
    }

    #[test]
    fn test_zero_count_column_detected() {
        let relation = Relation::from_bits(&[[1, 0, 1], [1, 0, 0]]).unwrap();
        let matrix = DancingMatrix::new(&relation).unwrap();
        assert_eq!(
            choose_column(&matrix),
            Some(ColumnChoice { column: 1, size: 0 })
        );
    }

    #[test]
    fn test_skips_covered_columns() {
        let relation = Relation::from_bits(&[[1, 0, 1], [0, 1, 1], [0, 1, 0]]).unwrap();
        let mut matrix = DancingMatrix::new(&relation).unwrap();
        assert_eq!(choose_column(&matrix).map(|c| c.column), Some(0));

        matrix.cover(0);
        // row 0 is hidden, leaving column 1 with 2 rows and column 2 with 1
        assert_eq!(
            choose_column(&matrix),
            Some(ColumnChoice { column: 2, size: 1 })
        );
        matrix.uncover(0);
    }

    #[test]
    fn test_none_when_fully_covered() {
        let relation = Relation::from_bits(&[[1]]).unwrap();
        let mut matrix = DancingMatrix::new(&relation).unwrap();
        matrix.cover(0);
        assert_eq!(choose_column(&matrix), None);
        matrix.uncover(0);
    }
}

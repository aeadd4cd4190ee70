//! Recursive backtracking over the dancing matrix (Algorithm X)

use super::error::DlxError;
use super::heuristic::choose_column;
use super::matrix::DancingMatrix;
use super::node::NodeId;
use super::result::{Controller, EnumerationPolicy, SearchOptions, SearchResult};
use crate::relation::Relation;

/// Exact cover solver owning one linked structure.
///
/// The structure is restored after every call to [`solve`](Self::solve),
/// including runs cut short by the enumeration policy or a deadline, so the
/// same solver may be searched again. Independent solves on several threads
/// need one `DlxSolver` each.
#[derive(Debug, Clone)]
pub struct DlxSolver {
    matrix: DancingMatrix,
}

impl DlxSolver {
    /// Build a solver for `relation`
    pub fn new(relation: &Relation) -> Result<Self, DlxError> {
        Ok(Self {
            matrix: DancingMatrix::new(relation)?,
        })
    }

    /// Read-only view of the linked structure
    pub fn matrix(&self) -> &DancingMatrix {
        &self.matrix
    }

    /// Search under `policy` with no deadline
    pub fn solve(&mut self, policy: EnumerationPolicy) -> SearchResult {
        self.solve_with(policy.into())
    }

    /// Search with full options
    pub fn solve_with(&mut self, options: SearchOptions) -> SearchResult {
        let mut search = Search {
            matrix: &mut self.matrix,
            stack: Vec::new(),
            controller: Controller::new(options),
        };
        search.run();
        let result = search.controller.finish();

        log::debug!(
            "search finished: {} solution(s), {} calls, {} dead ends, depth {}",
            result.solution_count(),
            result.stats().calls,
            result.stats().dead_ends,
            result.stats().max_depth
        );
        if result.timed_out() {
            log::warn!("search hit its deadline after {} solution(s)", result.solution_count());
        }
        result
    }

    /// Find the first solution only
    pub fn solve_first(&mut self) -> SearchResult {
        self.solve(EnumerationPolicy::FirstSolution)
    }

    /// Enumerate every solution
    pub fn solve_all(&mut self) -> SearchResult {
        self.solve(EnumerationPolicy::Exhaustive)
    }
}

/// State of one in-flight search
struct Search<'m> {
    matrix: &'m mut DancingMatrix,
    /// Row nodes chosen on the current branch
    stack: Vec<NodeId>,
    controller: Controller,
}

impl Search<'_> {
    fn run(&mut self) {
        self.search();
    }

    fn search(&mut self) {
        if self.controller.poll() {
            return;
        }
        self.controller.stats.calls += 1;

        if self.matrix.is_fully_covered() {
            let rows: Vec<usize> = self
                .stack
                .iter()
                .filter_map(|&node| self.matrix.row_of(node))
                .collect();
            self.controller.record(rows);
            return;
        }

        let Some(choice) = choose_column(&*self.matrix) else {
            return;
        };
        if choice.size == 0 {
            self.controller.stats.dead_ends += 1;
            return;
        }

        self.cover(choice.column);
        let header = self.matrix.header(choice.column);
        let mut row = self.matrix.down(header);
        while row != header {
            self.stack.push(row);
            self.controller.stats.max_depth = self.controller.stats.max_depth.max(self.stack.len());

            let mut j = self.matrix.right(row);
            while j != row {
                let column = self.matrix.column_of(j);
                self.cover(column);
                j = self.matrix.right(j);
            }

            self.search();

            let mut j = self.matrix.left(row);
            while j != row {
                let column = self.matrix.column_of(j);
                self.matrix.uncover(column);
                j = self.matrix.left(j);
            }
            self.stack.pop();

            if self.controller.is_stopped() {
                break;
            }
            row = self.matrix.down(row);
        }
        self.matrix.uncover(choice.column);
    }

    fn cover(&mut self, column: usize) {
        let unlinked = self.matrix.cover(column);
        self.controller.stats.link_updates += unlinked as u64;
    }
}

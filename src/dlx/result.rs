//! Search results and the controller that decides when to stop

use crate::relation::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// How many solutions a search should enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationPolicy {
    /// Stop as soon as one solution is found
    FirstSolution,
    /// Stop after this many solutions; `AtMost(0)` searches nothing
    AtMost(usize),
    /// Walk the whole search tree
    Exhaustive,
}

impl EnumerationPolicy {
    /// Whether `found` solutions are enough to stop
    fn is_satisfied(self, found: usize) -> bool {
        match self {
            EnumerationPolicy::FirstSolution => found >= 1,
            EnumerationPolicy::AtMost(limit) => found >= limit,
            EnumerationPolicy::Exhaustive => false,
        }
    }
}

/// Caller-supplied search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub policy: EnumerationPolicy,
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    pub fn new(policy: EnumerationPolicy) -> Self {
        Self {
            policy,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<EnumerationPolicy> for SearchOptions {
    fn from(policy: EnumerationPolicy) -> Self {
        Self::new(policy)
    }
}

/// One exact cover: the chosen input rows, in the order they were chosen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoverSolution {
    rows: Vec<usize>,
}

impl CoverSolution {
    pub fn new(rows: Vec<usize>) -> Self {
        Self { rows }
    }

    /// Row indices in selection order
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Row indices in ascending order
    pub fn sorted_rows(&self) -> Vec<usize> {
        let mut rows = self.rows.clone();
        rows.sort_unstable();
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the chosen rows cover every item of `relation` exactly once
    pub fn is_exact_cover(&self, relation: &Relation) -> bool {
        let mut covered = vec![0usize; relation.width()];
        for &row in &self.rows {
            if row >= relation.row_count() {
                return false;
            }
            for item in relation.items(row) {
                covered[item] += 1;
            }
        }
        covered.iter().all(|&count| count == 1)
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Entries into the recursive search
    pub calls: u64,
    /// Branches cut because the chosen column had live-count 0
    pub dead_ends: u64,
    /// Deepest selection stack reached
    pub max_depth: usize,
    /// Nodes unlinked by cover operations
    pub link_updates: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Ordered solutions of one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    solutions: Vec<CoverSolution>,
    stats: SearchStats,
    stopped_early: bool,
    timed_out: bool,
}

impl SearchResult {
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn solutions(&self) -> &[CoverSolution] {
        &self.solutions
    }

    pub fn first(&self) -> Option<&CoverSolution> {
        self.solutions.first()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Whether the search stopped before the tree was exhausted
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// Whether the stop was caused by the deadline
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Check every solution against the relation it was found for
    pub fn verify(&self, relation: &Relation) -> bool {
        self.solutions.iter().all(|s| s.is_exact_cover(relation))
    }
}

/// Owns the enumeration policy and the stop flag polled by the search engine
pub(super) struct Controller {
    policy: EnumerationPolicy,
    deadline: Option<Instant>,
    started: Instant,
    stopped: bool,
    timed_out: bool,
    solutions: Vec<CoverSolution>,
    pub stats: SearchStats,
}

impl Controller {
    pub fn new(options: SearchOptions) -> Self {
        let started = Instant::now();
        Self {
            policy: options.policy,
            deadline: options.timeout.map(|timeout| started + timeout),
            started,
            stopped: options.policy.is_satisfied(0),
            timed_out: false,
            solutions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Check the stop flag, raising it first if the deadline has passed
    pub fn poll(&mut self) -> bool {
        if !self.stopped {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                    self.timed_out = true;
                }
            }
        }
        self.stopped
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Accept a complete cover and apply the policy
    pub fn record(&mut self, rows: Vec<usize>) {
        self.solutions.push(CoverSolution::new(rows));
        if self.policy.is_satisfied(self.solutions.len()) {
            self.stopped = true;
        }
    }

    pub fn finish(mut self) -> SearchResult {
        self.stats.elapsed = self.started.elapsed();
        SearchResult {
            solutions: self.solutions,
            stats: self.stats,
            stopped_early: self.stopped,
            timed_out: self.timed_out,
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Calls: {}", self.calls)?;
        writeln!(f, "  Dead ends: {}", self.dead_ends)?;
        writeln!(f, "  Max depth: {}", self.max_depth)?;
        writeln!(f, "  Link updates: {}", self.link_updates)?;
        writeln!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())?;
        Ok(())
    }
}

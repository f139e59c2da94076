//! Job dependency graph and ready frontier.
//!
//! Jobs form a DAG through their finish-to-start dependencies. The
//! graph tracks each job's unmet-dependency count and adjacency; the
//! ready frontier is a min-heap keyed by input index, which fixes every
//! tie-break in the scheduling order.
//!
//! Cycles are not searched for up front: a cyclic instance simply never
//! releases the jobs on the cycle, which the driver detects as
//! incomplete progress.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
//! (Kahn-style topological ordering)

use std::cmp::Ordering;

use crate::heap::MinHeap;
use crate::models::Job;

/// Comparator for the ready frontier: ascending input index.
fn input_order(a: &usize, b: &usize) -> Ordering {
    a.cmp(b)
}

/// The ready frontier: jobs whose dependencies are all fully scheduled.
pub(crate) type ReadyFrontier = MinHeap<usize, fn(&usize, &usize) -> Ordering>;

struct JobGraphNode {
    remaining_deps: usize,
    dependents: Vec<usize>,
}

/// Dependency graph over the input jobs.
pub(crate) struct JobGraph {
    nodes: Vec<JobGraphNode>,
}

impl JobGraph {
    /// Builds adjacency lists and in-degree counters.
    ///
    /// Dependency indices must already be validated as in-range.
    pub(crate) fn new(jobs: &[Job]) -> Self {
        let mut nodes: Vec<JobGraphNode> = jobs
            .iter()
            .map(|job| JobGraphNode {
                remaining_deps: job.dependencies.len(),
                dependents: Vec::new(),
            })
            .collect();
        for (idx, job) in jobs.iter().enumerate() {
            for &dep in &job.dependencies {
                nodes[dep].dependents.push(idx);
            }
        }
        Self { nodes }
    }

    /// Seeds the frontier with every job that has no dependencies.
    pub(crate) fn ready_frontier(&self) -> ReadyFrontier {
        let ready: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.remaining_deps == 0)
            .map(|(idx, _)| idx)
            .collect();
        MinHeap::from_vec(ready, input_order)
    }

    /// Records that `job` is fully scheduled, releasing any dependents
    /// whose last unmet dependency it was.
    pub(crate) fn mark_scheduled(&mut self, job: usize, frontier: &mut ReadyFrontier) {
        debug_assert_eq!(
            self.nodes[job].remaining_deps, 0,
            "scheduled a job with unmet dependencies"
        );
        for i in 0..self.nodes[job].dependents.len() {
            let dependent = self.nodes[job].dependents[i];
            self.nodes[dependent].remaining_deps -= 1;
            if self.nodes[dependent].remaining_deps == 0 {
                frontier.add(dependent);
            }
        }
    }
}

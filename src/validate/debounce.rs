// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Debounced revalidation.
//!
//! Every store mutation submits the new graph; recomputation runs once the
//! submissions go quiet for the configured window. Only eventual consistency
//! is guaranteed: the last submission before a quiet period always wins.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::model::WorkflowGraph;

use super::{validate, ValidationReport};

pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct DebouncedValidator {
    graph_tx: mpsc::UnboundedSender<WorkflowGraph>,
    report_rx: watch::Receiver<ValidationReport>,
}

impl DebouncedValidator {
    /// Spawns the debounce task on the current tokio runtime.
    pub fn spawn(quiet_window: Duration) -> Self {
        let (graph_tx, graph_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = watch::channel(ValidationReport::default());

        tokio::spawn(run(graph_rx, report_tx, quiet_window));

        Self {
            graph_tx,
            report_rx,
        }
    }

    /// Submits the post-mutation graph. Cheap; never blocks the mutator.
    pub fn submit(&self, graph: WorkflowGraph) {
        // A closed channel means the runtime is shutting down; dropping the
        // submission is the correct behavior then.
        let _ = self.graph_tx.send(graph);
    }

    /// The most recently published report.
    pub fn latest(&self) -> ValidationReport {
        self.report_rx.borrow().clone()
    }

    /// A receiver observers can await change notifications on.
    pub fn subscribe(&self) -> watch::Receiver<ValidationReport> {
        self.report_rx.clone()
    }
}

async fn run(
    mut graph_rx: mpsc::UnboundedReceiver<WorkflowGraph>,
    report_tx: watch::Sender<ValidationReport>,
    quiet_window: Duration,
) {
    while let Some(mut latest) = graph_rx.recv().await {
        // Coalesce the burst: each newer submission restarts the window.
        loop {
            tokio::select! {
                next = graph_rx.recv() => match next {
                    Some(graph) => latest = graph,
                    None => {
                        let _ = report_tx.send(validate(&latest));
                        return;
                    }
                },
                () = tokio::time::sleep(quiet_window) => break,
            }
        }

        let _ = report_tx.send(validate(&latest));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DebouncedValidator, DEFAULT_QUIET_WINDOW};
    use crate::model::{factory, NodeId, NodeKind, Position, WorkflowGraph};
    use crate::validate::{MISSING_END, MISSING_START};

    fn lone_task_graph() -> WorkflowGraph {
        WorkflowGraph::new(
            vec![factory::create(
                NodeId::new("task-1").expect("id"),
                NodeKind::Task,
                Position::default(),
            )],
            Vec::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_after_quiet_window() {
        let validator = DebouncedValidator::spawn(DEFAULT_QUIET_WINDOW);
        let mut reports = validator.subscribe();

        validator.submit(lone_task_graph());

        reports.changed().await.expect("report published");
        let report = reports.borrow().clone();
        assert_eq!(report.global_issues(), [MISSING_START, MISSING_END]);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_coalesces_to_last_submission() {
        let validator = DebouncedValidator::spawn(Duration::from_millis(300));
        let mut reports = validator.subscribe();

        // Earlier submissions within the window are superseded.
        validator.submit(lone_task_graph());
        validator.submit(WorkflowGraph::seeded());

        reports.changed().await.expect("report published");
        let report = reports.borrow().clone();
        assert!(report.global_issues().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn later_submission_supersedes_published_report() {
        let validator = DebouncedValidator::spawn(Duration::from_millis(300));
        let mut reports = validator.subscribe();

        validator.submit(WorkflowGraph::seeded());
        reports.changed().await.expect("first report");
        assert!(reports.borrow().global_issues().is_empty());

        validator.submit(lone_task_graph());
        reports.changed().await.expect("second report");
        let report = reports.borrow().clone();
        assert_eq!(report.global_issues(), [MISSING_START, MISSING_END]);
    }
}

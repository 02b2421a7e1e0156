//! Runs one operation over every manifest entry.

use crate::manifest::{Manifest, Operation, Outcome};
use futures::StreamExt;
use futures::stream;
use itemsync_client::ItemApi;
use itemsync_engine::{ReadOutcome, ReconcileAction};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Default number of records processed at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Per-outcome counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub updated: usize,
    pub recreated: usize,
    pub refreshed: usize,
    pub vanished: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Reconciled(ReconcileAction::Created) => self.created += 1,
            Outcome::Reconciled(ReconcileAction::Updated) => self.updated += 1,
            Outcome::Reconciled(ReconcileAction::Recreated) => self.recreated += 1,
            Outcome::Refreshed(ReadOutcome::Present) => self.refreshed += 1,
            Outcome::Refreshed(ReadOutcome::Vanished) => self.vanished += 1,
            Outcome::Deleted => self.deleted += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = [
            ("created", self.created),
            ("updated", self.updated),
            ("recreated", self.recreated),
            ("refreshed", self.refreshed),
            ("vanished", self.vanished),
            ("deleted", self.deleted),
            ("skipped", self.skipped),
            ("failed", self.failed),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(label, n)| format!("{n} {label}"))
            .collect();
        if parts.is_empty() {
            f.write_str("nothing to do")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Runs `operation` on every entry, at most `concurrency` at a time.
///
/// A failing entry is logged and counted; the others still run. Each entry
/// is borrowed mutably by exactly one task.
pub async fn run(
    manifest: &mut Manifest,
    api: Arc<dyn ItemApi>,
    operation: Operation,
    concurrency: usize,
) -> Summary {
    let results: Vec<_> = stream::iter(manifest.items.iter_mut().enumerate())
        .map(|(index, item)| {
            let api = api.clone();
            async move {
                let label = format!("items[{index}] {} {:?}", item.kind(), item.config().key);
                let result = item.run(api, operation).await;
                (label, result)
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut summary = Summary::default();
    for (label, result) in results {
        match result {
            Ok(outcome) => {
                debug!("{}: {:?}", label, outcome);
                summary.record(outcome);
            }
            Err(e) => {
                error!("{}: {}", label, e);
                summary.failed += 1;
            }
        }
    }
    summary
}

//! Validation-queue state machine.
//!
//! Each queue item moves `pending -> approved` or `pending -> flagged` and
//! never leaves a terminal state. The queue is an append-only ledger: a
//! metric may accumulate several resolved items over time, and lookups by
//! metric id resolve to the most recent one.
//!
//! Transitions never error. Requests that cannot apply (unknown id, item
//! already resolved, missing flag reason) come back as a [`Transition`]
//! variant describing why nothing changed.

use prisma_catalog::{QueueStatus, ValidationQueueItem};
use serde::Serialize;
use tracing::{debug, info};

// ──────────────────────────────────────────────
// Outcomes
// ──────────────────────────────────────────────

/// Result of an approve or flag request.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// The item moved from `from` to `to`.
    Applied {
        metric_id: String,
        from: QueueStatus,
        to: QueueStatus,
    },
    /// The item is already terminal; nothing changed.
    AlreadyResolved {
        metric_id: String,
        status: QueueStatus,
    },
    /// A flag was requested with an empty reason; nothing changed.
    ReasonRequired { metric_id: String },
    /// No queue item exists for the metric id.
    NotFound { metric_id: String },
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }

    pub fn metric_id(&self) -> &str {
        match self {
            Transition::Applied { metric_id, .. }
            | Transition::AlreadyResolved { metric_id, .. }
            | Transition::ReasonRequired { metric_id }
            | Transition::NotFound { metric_id } => metric_id,
        }
    }
}

/// Whether a flag request would apply, without mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCheck {
    Ready,
    ReasonRequired,
    AlreadyResolved(QueueStatus),
    NotFound,
}

/// Per-status item counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub pending: usize,
    pub approved: usize,
    pub flagged: usize,
}

impl QueueSummary {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.flagged
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The latest item for this metric has not been resolved yet.
    #[error("metric '{metric_id}' already has a pending review")]
    AlreadyPending { metric_id: String },

    /// Submissions always enter the queue as pending.
    #[error("submission for '{metric_id}' must be pending, got {status}")]
    NotPending {
        metric_id: String,
        status: QueueStatus,
    },
}

// ──────────────────────────────────────────────
// Queue
// ──────────────────────────────────────────────

/// Ordered review ledger with approve/flag transitions.
///
/// `&mut self` on every transition means two transitions on one queue
/// cannot interleave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationQueue {
    items: Vec<ValidationQueueItem>,
}

impl ValidationQueue {
    pub fn new(items: Vec<ValidationQueueItem>) -> Self {
        ValidationQueue { items }
    }

    pub fn items(&self) -> &[ValidationQueueItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ValidationQueueItem> {
        self.items
    }

    /// The most recent item for `metric_id`.
    pub fn get(&self, metric_id: &str) -> Option<&ValidationQueueItem> {
        self.items.iter().rev().find(|i| i.metric_id == metric_id)
    }

    fn latest_mut(&mut self, metric_id: &str) -> Option<&mut ValidationQueueItem> {
        self.items.iter_mut().rev().find(|i| i.metric_id == metric_id)
    }

    /// Items still awaiting review, in queue order.
    pub fn pending(&self) -> impl Iterator<Item = &ValidationQueueItem> {
        self.items
            .iter()
            .filter(|i| i.status == QueueStatus::Pending)
    }

    pub fn summary(&self) -> QueueSummary {
        self.items
            .iter()
            .fold(QueueSummary::default(), |mut acc, item| {
                match item.status {
                    QueueStatus::Pending => acc.pending += 1,
                    QueueStatus::Approved => acc.approved += 1,
                    QueueStatus::Flagged => acc.flagged += 1,
                }
                acc
            })
    }

    /// Append a new pending item.
    ///
    /// Rejected while the metric's latest item is still pending, so at most
    /// one open review exists per metric.
    pub fn submit(&mut self, item: ValidationQueueItem) -> Result<(), SubmitError> {
        if item.status != QueueStatus::Pending {
            return Err(SubmitError::NotPending {
                metric_id: item.metric_id,
                status: item.status,
            });
        }
        if self
            .get(&item.metric_id)
            .is_some_and(|existing| existing.status == QueueStatus::Pending)
        {
            return Err(SubmitError::AlreadyPending {
                metric_id: item.metric_id,
            });
        }
        info!(metric = %item.metric_id, change = %item.change_type, "queued for review");
        self.items.push(item);
        Ok(())
    }

    /// Move the metric's latest item from `pending` to `approved`.
    ///
    /// Approval does NOT require `autoChecks` to pass. Failing checks are
    /// shown to reviewers; the decision to approve anyway stays with them.
    pub fn approve(&mut self, metric_id: &str) -> Transition {
        let Some(item) = self.latest_mut(metric_id) else {
            debug!(metric = metric_id, "approve ignored: not in queue");
            return Transition::NotFound {
                metric_id: metric_id.to_string(),
            };
        };
        if item.status.is_terminal() {
            debug!(metric = metric_id, status = %item.status, "approve ignored: already resolved");
            return Transition::AlreadyResolved {
                metric_id: metric_id.to_string(),
                status: item.status,
            };
        }

        item.status = QueueStatus::Approved;
        info!(metric = metric_id, checks_pass = item.auto_checks.all_pass(), "approved");
        Transition::Applied {
            metric_id: metric_id.to_string(),
            from: QueueStatus::Pending,
            to: QueueStatus::Approved,
        }
    }

    /// Check a flag request without applying it. Any non-empty reason is
    /// accepted, whitespace included.
    pub fn can_flag(&self, metric_id: &str, reason: &str) -> FlagCheck {
        match self.get(metric_id) {
            None => FlagCheck::NotFound,
            Some(item) if item.status.is_terminal() => FlagCheck::AlreadyResolved(item.status),
            Some(_) if reason.is_empty() => FlagCheck::ReasonRequired,
            Some(_) => FlagCheck::Ready,
        }
    }

    /// Move the metric's latest item from `pending` to `flagged`, storing
    /// `reason` as given.
    pub fn flag(&mut self, metric_id: &str, reason: &str) -> Transition {
        let metric = metric_id.to_string();
        match self.can_flag(metric_id, reason) {
            FlagCheck::NotFound => {
                debug!(metric = metric_id, "flag ignored: not in queue");
                Transition::NotFound { metric_id: metric }
            }
            FlagCheck::AlreadyResolved(status) => {
                debug!(metric = metric_id, %status, "flag ignored: already resolved");
                Transition::AlreadyResolved {
                    metric_id: metric,
                    status,
                }
            }
            FlagCheck::ReasonRequired => {
                debug!(metric = metric_id, "flag ignored: reason required");
                Transition::ReasonRequired { metric_id: metric }
            }
            FlagCheck::Ready => {
                if let Some(item) = self.latest_mut(metric_id) {
                    item.status = QueueStatus::Flagged;
                    item.flag_reason = Some(reason.to_string());
                }
                info!(metric = metric_id, reason, "flagged");
                Transition::Applied {
                    metric_id: metric,
                    from: QueueStatus::Pending,
                    to: QueueStatus::Flagged,
                }
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

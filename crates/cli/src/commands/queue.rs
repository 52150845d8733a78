use std::process;

use prisma_catalog::{ChangeType, Metric, ValidationQueueItem};
use prisma_engine::timestamp::today;
use prisma_engine::{QueueSummary, Transition};
use serde::Serialize;

use crate::session::Session;
use crate::{exit_with_error, print_json, report_error, OutputFormat};

#[derive(Serialize)]
struct QueueListing<'a> {
    items: &'a [ValidationQueueItem],
    summary: QueueSummary,
}

#[derive(Serialize)]
struct TransitionReport<'a> {
    transition: &'a Transition,
    #[serde(skip_serializing_if = "Option::is_none")]
    promoted: Option<&'a Metric>,
}

pub(crate) fn cmd_list(session: &Session, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    let listing = QueueListing {
        items: session.queue.items(),
        summary: session.queue.summary(),
    };
    match output {
        OutputFormat::Json => print_json(&listing),
        OutputFormat::Text => {
            for item in listing.items {
                print_item(item);
            }
            let s = listing.summary;
            println!(
                "{} pending, {} approved, {} flagged",
                s.pending, s.approved, s.flagged
            );
        }
    }
}

fn print_item(item: &ValidationQueueItem) {
    println!(
        "[{}] {} ({}) {}",
        item.status.as_str(),
        item.metric_id,
        item.change_type.as_str(),
        item.metric_name
    );
    println!("    submitted by {} at {}", item.submitted_by, item.submitted_at);

    let c = &item.auto_checks;
    let mark = |ok: bool| if ok { "pass" } else { "FAIL" };
    println!(
        "    checks: lint {} unit {} slo {} lineage {}{}",
        mark(c.lint),
        mark(c.unit),
        mark(c.slo),
        mark(c.lineage),
        if c.cross_bu_impact { ", cross-BU impact" } else { "" }
    );
    for change in &item.diff {
        println!(
            "    {}: {} -> {}",
            change.field, change.old_value, change.new_value
        );
    }
    if let Some(reason) = &item.flag_reason {
        println!("    flagged: {}", reason);
    }
}

pub(crate) fn cmd_approve(
    session: &mut Session,
    id: &str,
    promote: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let transition = session.queue.approve(id);

    let mut promoted = None;
    if promote && transition.is_applied() {
        if let Some(item) = session.queue.get(id) {
            match session.store.promote(item, today()) {
                Ok(next) => {
                    if item.change_type != ChangeType::New {
                        promoted = next.get(id).cloned();
                    }
                    session.store = next;
                }
                Err(e) => exit_with_error(&e.to_string(), output, quiet),
            }
        }
    }

    finish(&transition, promoted.as_ref(), output, quiet);
}

pub(crate) fn cmd_flag(
    session: &mut Session,
    id: &str,
    reason: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let transition = session.queue.flag(id, reason);
    finish(&transition, None, output, quiet);
}

/// Print the outcome; exit 1 when nothing changed.
fn finish(transition: &Transition, promoted: Option<&Metric>, output: OutputFormat, quiet: bool) {
    if !transition.is_applied() {
        match output {
            OutputFormat::Json if !quiet => print_json(&TransitionReport {
                transition,
                promoted: None,
            }),
            _ => report_error(&describe(transition), output, quiet),
        }
        process::exit(1);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&TransitionReport {
            transition,
            promoted,
        }),
        OutputFormat::Text => {
            println!("{}", describe(transition));
            if let Some(metric) = promoted {
                println!(
                    "{} is now v{} ({}), updated {}",
                    metric.id,
                    metric.version,
                    metric.status.as_str(),
                    metric.updated_at
                );
            }
        }
    }
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Applied { metric_id, from, to } => {
            format!("{}: {} -> {}", metric_id, from.as_str(), to.as_str())
        }
        Transition::AlreadyResolved { metric_id, status } => {
            format!("{} is already {}", metric_id, status.as_str())
        }
        Transition::ReasonRequired { metric_id } => {
            format!("a non-empty --reason is required to flag {}", metric_id)
        }
        Transition::NotFound { metric_id } => format!("no queue item for '{}'", metric_id),
    }
}

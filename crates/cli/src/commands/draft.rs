use std::path::Path;
use std::process;

use prisma_catalog::{MetricChecks, ValidationQueueItem};
use prisma_engine::timestamp::now_timestamp;
use prisma_engine::{suggest, MetricDraft, SuggestedDescription};
use serde::Serialize;

use crate::session::Session;
use crate::{exit_with_error, print_json, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftReport {
    checks: MetricChecks,
    missing_fields: Vec<&'static str>,
    suggestion: SuggestedDescription,
    queue_item: ValidationQueueItem,
    /// Why the queue would refuse this submission, if it would.
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<String>,
}

impl DraftReport {
    fn submittable(&self) -> bool {
        self.missing_fields.is_empty() && self.rejection.is_none()
    }
}

/// Run the create-form checks over a draft file and preview the review
/// it would open. Exits 1 when the draft could not be submitted.
pub(crate) fn cmd_draft(
    session: &Session,
    file: &Path,
    accept_suggestion: bool,
    submitted_by: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let content = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            exit_with_error(&msg, output, quiet);
        }
    };
    let mut draft: MetricDraft = match serde_json::from_str(&content) {
        Ok(d) => d,
        Err(e) => {
            let msg = format!("error parsing draft JSON in '{}': {}", file.display(), e);
            exit_with_error(&msg, output, quiet);
        }
    };

    let suggestion = suggest(&draft.description_request());
    if accept_suggestion {
        draft.accept_suggestion(&suggestion);
    }

    let queue_item = draft.submit(submitted_by, &now_timestamp());
    let rejection = session
        .queue
        .clone()
        .submit(queue_item.clone())
        .err()
        .map(|e| e.to_string());

    let report = DraftReport {
        checks: draft.checks(),
        missing_fields: draft.missing_fields(),
        suggestion,
        queue_item,
        rejection,
    };

    if !quiet {
        match output {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => print_report(&report),
        }
    }
    if !report.submittable() {
        process::exit(1);
    }
}

fn print_report(report: &DraftReport) {
    let c = &report.checks;
    let mark = |ok: bool| if ok { "pass" } else { "FAIL" };
    println!("Auto-checks");
    println!("  lint     {}", mark(c.lint));
    println!("  unit     {}", mark(c.unit));
    println!("  slo      {}", mark(c.slo));
    println!("  lineage  {}", mark(c.lineage));
    println!();

    let s = &report.suggestion;
    println!("Suggested description");
    println!("  {}", s.business_summary);
    println!("  {}", s.when_to_use);
    println!("  {}", s.when_not_to_use);
    for guardrail in &s.guardrails {
        println!("  {}", guardrail);
    }
    println!();

    if !report.missing_fields.is_empty() {
        println!("Missing required fields: {}", report.missing_fields.join(", "));
    }
    if let Some(reason) = &report.rejection {
        println!("Queue would reject this submission: {}", reason);
    }
    if report.submittable() {
        let item = &report.queue_item;
        println!(
            "Ready to submit: {} ({}) as a new metric, cross-BU impact: {}",
            item.metric_id,
            item.metric_name,
            if item.auto_checks.cross_bu_impact { "yes" } else { "no" }
        );
    }
}

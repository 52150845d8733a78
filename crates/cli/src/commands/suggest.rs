use prisma_engine::{suggest, DescriptionRequest};

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_suggest(request: &DescriptionRequest, output: OutputFormat, quiet: bool) {
    let suggestion = suggest(request);
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&suggestion),
        OutputFormat::Text => {
            println!("Business summary: {}", suggestion.business_summary);
            println!("When to use:      {}", suggestion.when_to_use);
            println!("When not to use:  {}", suggestion.when_not_to_use);
            println!("Guardrails:");
            for guardrail in &suggestion.guardrails {
                println!("  {}", guardrail);
            }
        }
    }
}

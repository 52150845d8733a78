use prisma_engine::{snippets_for, AdapterMode};

use super::adapters::disable_all;
use crate::session::Session;
use crate::{exit_with_error, print_json, OutputFormat};

pub(crate) fn cmd_snippet(
    session: &mut Session,
    id: &str,
    disable_write: &[String],
    output: OutputFormat,
    quiet: bool,
) {
    disable_all(&mut session.registry, disable_write, AdapterMode::Write, output, quiet);

    let Some(metric) = session.store.get(id) else {
        exit_with_error(&format!("metric not found: {}", id), output, quiet);
    };
    let snippets = snippets_for(metric, &session.registry);

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&snippets),
        OutputFormat::Text => {
            println!("-- SQL");
            println!("{}", snippets.sql);
            println!();
            println!("# Python");
            println!("{}", snippets.python);
            for warning in &snippets.warnings {
                println!();
                println!("{}", warning);
            }
        }
    }
}

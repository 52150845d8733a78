use prisma_catalog::FilterSpec;
use prisma_storage::{FilterSetStore, SavedFilterSet};

use super::query::{describe_spec, FilterArgs};
use crate::session::Session;
use crate::{exit_with_error, print_json, OutputFormat};

pub(crate) fn cmd_save(
    session: &Session,
    name: &str,
    args: FilterArgs,
    output: OutputFormat,
    quiet: bool,
) {
    let set = SavedFilterSet::new(name, args.apply(FilterSpec::default()));
    let mut store = session.filter_store();
    if let Err(e) = store.save(set.clone()) {
        exit_with_error(&e.to_string(), output, quiet);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&set),
        OutputFormat::Text => {
            println!("Saved filter set '{}': {}", set.name, describe_spec(&set.filters));
        }
    }
}

pub(crate) fn cmd_list(session: &Session, output: OutputFormat, quiet: bool) {
    let sets = match session.filter_store().list() {
        Ok(sets) => sets,
        Err(e) => exit_with_error(&e.to_string(), output, quiet),
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&sets),
        OutputFormat::Text => {
            if sets.is_empty() {
                println!("No saved filter sets.");
                return;
            }
            for set in &sets {
                println!("{}: {}", set.name, describe_spec(&set.filters));
            }
        }
    }
}

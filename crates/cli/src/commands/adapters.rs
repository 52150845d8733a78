use prisma_catalog::Adapter;
use prisma_engine::{AdapterMode, AdapterRegistry};
use serde::Serialize;

use crate::session::Session;
use crate::{exit_with_error, print_json, OutputFormat};

#[derive(Serialize)]
struct AdapterListing<'a> {
    adapters: &'a [Adapter],
    active: usize,
}

/// Turn off `mode` for each listed adapter id. Unknown ids end the run.
pub(crate) fn disable_all(
    registry: &mut AdapterRegistry,
    ids: &[String],
    mode: AdapterMode,
    output: OutputFormat,
    quiet: bool,
) {
    for id in ids {
        if let Err(e) = registry.set(id, mode, false) {
            exit_with_error(&e.to_string(), output, quiet);
        }
    }
}

pub(crate) fn cmd_adapters(
    session: &mut Session,
    disable_read: &[String],
    disable_write: &[String],
    output: OutputFormat,
    quiet: bool,
) {
    disable_all(&mut session.registry, disable_read, AdapterMode::Read, output, quiet);
    disable_all(&mut session.registry, disable_write, AdapterMode::Write, output, quiet);

    if quiet {
        return;
    }
    let listing = AdapterListing {
        adapters: session.registry.adapters(),
        active: session.registry.active().count(),
    };
    match output {
        OutputFormat::Json => print_json(&listing),
        OutputFormat::Text => {
            println!("{:<12} {:<12} {:<5} {:<5}  DESCRIPTION", "ID", "NAME", "READ", "WRITE");
            for a in listing.adapters {
                println!(
                    "{:<12} {:<12} {:<5} {:<5}  {}",
                    a.id,
                    a.name,
                    on_off(a.read),
                    on_off(a.write),
                    a.description
                );
            }
            println!();
            println!(
                "{} of {} adapters active",
                listing.active,
                listing.adapters.len()
            );
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

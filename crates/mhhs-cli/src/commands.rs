use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use mhhs_cli::context::{AppContext, Locations, open_session, read_values};
use mhhs_core::SessionParams;
use mhhs_form::export;

use crate::cli::{ExportArgs, ListArgs};
use crate::summary::{
    print_codes, print_composition, print_form, print_interface_header, print_interfaces,
    print_suggestions, print_validation,
};

pub fn run_list(locations: &Locations, args: &ListArgs) -> Result<()> {
    let params = SessionParams {
        search: args.search.clone(),
        filter: args.filter,
        selected: None,
    };
    let context = open_session(locations, params)?;
    let session = &context.session;

    if args.suggest {
        print_suggestions(&session.suggestions());
        println!();
    }

    let mut results = session.results();
    if args.favorites_only {
        results.retain(|interface| session.is_favorite(&interface.id));
    }
    debug!(
        query = %args.search,
        filter = %args.filter,
        results = results.len(),
        "listing interfaces"
    );
    print_interfaces(&results, |id| session.is_favorite(id));
    Ok(())
}

pub fn run_show(locations: &Locations, id: &str) -> Result<()> {
    let context = open_selected(locations, id)?;
    let session = &context.session;
    let interface = session.selected().context("no interface selected")?;

    print_interface_header(interface, session.is_favorite(&interface.id));
    println!();
    let resolved = session.resolved_selected()?;
    print_composition(&resolved);

    let codes = session.selected_rejection_codes()?;
    if !codes.is_empty() {
        println!();
        print_codes(&codes);
    }
    Ok(())
}

pub fn run_codes(locations: &Locations, term: Option<&str>) -> Result<()> {
    let context = open_session(locations, SessionParams::default())?;
    let codes = context.session.search_rejection_codes(term.unwrap_or_default());
    print_codes(&codes);
    Ok(())
}

pub fn run_suggest(locations: &Locations, partial: &str) -> Result<()> {
    let params = SessionParams {
        search: partial.to_string(),
        ..SessionParams::default()
    };
    let context = open_session(locations, params)?;
    print_suggestions(&context.session.suggestions());
    Ok(())
}

pub fn run_form(locations: &Locations, id: &str) -> Result<()> {
    let context = open_selected(locations, id)?;
    let form = context.session.form_for_selected()?;
    print_form(&form);
    Ok(())
}

/// Validate and write a payload. Returns false when mandatory values are missing.
pub fn run_export(locations: &Locations, args: &ExportArgs) -> Result<bool> {
    let span = info_span!("export", interface = %args.id);
    let _guard = span.enter();

    let context = open_selected(locations, &args.id)?;
    let form = context.session.form_for_selected()?;
    let values = read_values(&args.values)?;

    let payload = match export(&form, &values) {
        Ok(payload) => payload,
        Err(report) => {
            print_validation(&report);
            return Ok(false);
        }
    };

    if args.dry_run {
        println!("{}", payload.to_json().context("serialize payload")?);
        return Ok(true);
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output dir {}", args.output_dir.display()))?;
    let path = payload
        .write_to(&args.output_dir)
        .context("write payload")?;
    println!("Wrote {}", path.display());
    Ok(true)
}

pub fn run_favorite(locations: &Locations, id: &str) -> Result<()> {
    let mut context = open_session(locations, SessionParams::default())?;
    let AppContext { session, store, .. } = &mut context;
    let now_favorite = session
        .toggle_favorite(id, store)
        .with_context(|| format!("toggle favorite {id}"))?;
    if now_favorite {
        println!("Added {id} to favorites");
    } else {
        println!("Removed {id} from favorites");
    }
    info!(favorites = session.favorites().len(), "favorites saved");
    Ok(())
}

fn open_selected(locations: &Locations, id: &str) -> Result<AppContext> {
    let mut context = open_session(locations, SessionParams::default())?;
    context
        .session
        .select(id)
        .with_context(|| format!("select {id}"))?;
    Ok(context)
}

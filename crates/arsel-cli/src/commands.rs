use std::fs;

use anyhow::{Context, Result, bail};
use arsel_cli::script::{execute, parse_script};
use arsel_cli::summary::{StateSnapshot, print_state};
use arsel_core::{SelectionSession, SessionOptions};
use arsel_io::{CsvPairStore, is_valid_pair_file, read_catalog, read_pairs};
use arsel_model::ListMode;
use tracing::{info, info_span};

use crate::cli::{RunArgs, SessionArgs};

/// Build a session from the catalog, mask and optional selection flags.
fn open_session(args: &SessionArgs) -> Result<SelectionSession> {
    let catalog = read_catalog(&args.catalog)
        .with_context(|| format!("read catalog {}", args.catalog.display()))?;
    let options = SessionOptions::default()
        .with_strict_names(args.strict)
        .with_mode(args.full.then_some(ListMode::Full));

    let mut session = SelectionSession::new(options);
    session.load_catalog_with_mask(catalog.names, catalog.tooltips, args.mask.iter().copied());
    if let Some(path) = &args.selection {
        session
            .load_pairs(&CsvPairStore, path)
            .with_context(|| format!("load selection {}", path.display()))?;
    }
    Ok(session)
}

fn emit(session: &SelectionSession, log: Vec<String>, json: bool) -> Result<()> {
    let snapshot = StateSnapshot::capture(session, log);
    if json {
        let text = serde_json::to_string_pretty(&snapshot).context("serialize state")?;
        println!("{text}");
    } else {
        print_state(&snapshot);
    }
    Ok(())
}

pub fn run_show(args: &SessionArgs) -> Result<()> {
    let span = info_span!("show", catalog = %args.catalog.display());
    let _guard = span.enter();
    let session = open_session(args)?;
    emit(&session, Vec::new(), args.json)
}

pub fn run_script(args: &RunArgs) -> Result<()> {
    let span = info_span!("run", script = %args.script.display());
    let _guard = span.enter();

    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let commands = parse_script(&source)?;
    let mut session = open_session(&args.session)?;
    let log = execute(&mut session, &commands)?;
    info!(commands = commands.len(), "script finished");

    if let Some(path) = &args.save {
        session
            .save_pairs(&CsvPairStore, path)
            .with_context(|| format!("save selection {}", path.display()))?;
    }
    emit(&session, log, args.session.json)
}

pub fn run_check(file: &std::path::Path) -> Result<()> {
    if !is_valid_pair_file(file) {
        bail!("{} is not a raw,alias pair file", file.display());
    }
    let pairs = read_pairs(file).with_context(|| format!("read {}", file.display()))?;
    println!("{}: {} pairs", file.display(), pairs.len());
    Ok(())
}

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::cli::Cli;
use crate::config::{self, Mode, Overrides, Settings};
use crate::plan::{self, Plan};
use crate::walker::{self, LeafRead};

/// Run the pipeline and return the process exit status.
pub fn run(cli: Cli) -> Result<u8> {
    let plan = match plan::build(&cli.selection()) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("VALUE ERROR: {err}");
            return Ok(1);
        }
    };

    let settings = resolve_settings(&cli)?;
    info!(
        "{} leaves under {} ({:?}, {:?})",
        plan.len(),
        settings.root,
        settings.mode,
        settings.format
    );

    let handled = match settings.mode {
        Mode::Write => handle_write(&settings, &plan),
        Mode::Read => handle_read(&settings, &plan),
    };
    handled.map(|()| 0)
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let file = cli.file.as_ref().map(|path| to_utf8(path.clone())).transpose()?;
    let file_config = config::load(file.as_deref())?;
    let root = cli.root.as_ref().map(|path| to_utf8(path.clone())).transpose()?;
    let cwd = config::current_working_dir()?;

    Ok(Settings::resolve(
        &cwd,
        &file_config,
        Overrides {
            root,
            model: cli.model,
            read: cli.read,
            json: cli.json,
            assume_yes: cli.yes,
        },
    ))
}

fn to_utf8(path: std::path::PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| anyhow!("path {} is not valid UTF-8", p.display()))
}

fn handle_write(settings: &Settings, plan: &Plan) -> Result<()> {
    let mut rng = rand::thread_rng();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let summary = walker::write_tree(settings, plan, &mut rng, |path: &Utf8Path| {
        ask_overwrite(&mut input, &mut output, path)
    })?;
    info!(
        "wrote {} files, kept {} existing",
        summary.written, summary.skipped
    );
    Ok(())
}

fn handle_read(settings: &Settings, plan: &Plan) -> Result<()> {
    let mut out = io::stdout().lock();
    let summary = walker::read_tree(settings, plan, |event| print_leaf(&mut out, event))?;
    print_total(&mut out, settings, summary.total())?;
    info!(
        "read {} files, {} missing",
        summary.totals.len(),
        summary.missing.len()
    );
    Ok(())
}

fn print_leaf<W: Write>(out: &mut W, event: LeafRead<'_>) -> Result<()> {
    match event {
        LeafRead::Missing(path) => writeln!(out, "Podany plik {} nie istnieje.", path)?,
        LeafRead::Total(path, total) => writeln!(out, "{}: {}", path, total)?,
    }
    out.flush().context("writing read report")
}

fn print_total<W: Write>(out: &mut W, settings: &Settings, total: i64) -> Result<()> {
    writeln!(
        out,
        "Suma czasu obliczeń dla modelu {}: {}",
        settings.model.as_str(),
        total
    )?;
    Ok(())
}

/// Ask on `output` whether `path` may be replaced; only an exact `y` agrees.
fn ask_overwrite<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: &Utf8Path,
) -> Result<bool> {
    writeln!(output, "Podany plik {} istnieje.", path)?;
    writeln!(output, "Jeśli chcesz go nadpisać wpisz: y")?;
    writeln!(output, "Jeśli nie, wciśnij dowolny przycisk")?;
    output
        .flush()
        .with_context(|| format!("writing prompt for {path}"))?;

    let mut buf = String::new();
    input
        .read_line(&mut buf)
        .with_context(|| format!("reading answer for {path}"))?;
    Ok(buf.trim_end_matches(['\n', '\r']) == "y")
}

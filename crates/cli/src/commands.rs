//! `crosscheck run` and `crosscheck validate`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crosscheck_recon::config::CrossCheckConfig;
use crosscheck_recon::engine::{run, CrossCheckInput};
use crosscheck_recon::model::{CrossCheckResult, RawTable, Source};
use crosscheck_recon::report::{row_cells, COLUMNS};

use crate::CliError;

pub const DEFAULT_OUTPUT: &str = "cross_check_report.xlsx";

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub shipment: Option<PathBuf>,
    pub rw: Option<PathBuf>,
    pub csp: Option<PathBuf>,
    pub output: PathBuf,
    pub json: bool,
    pub preview: Option<usize>,
    pub quiet: bool,
}

impl RunArgs {
    fn flag(&self, source: Source) -> Option<&PathBuf> {
        match source {
            Source::Shipment => self.shipment.as_ref(),
            Source::Rw => self.rw.as_ref(),
            Source::Csp => self.csp.as_ref(),
        }
    }
}

// ============================================================================
// run
// ============================================================================

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = match args.config {
        Some(ref path) => load_config(path)?,
        None => CrossCheckConfig::default(),
    };

    let paths = input_paths(&args, &config)?;

    let [shipment, rw, csp] = paths.map(|(source, path)| load_source(&config, source, &path));
    let input = CrossCheckInput { shipment: shipment?, rw: rw?, csp: csp? };

    let result = run(&config, &input).map_err(|e| {
        CliError::schema(e.to_string()).with_hint(format!(
            "headers must contain one of [{}] and one of [{}], or set product_column/destination_column",
            config.keywords.product.join(", "),
            config.keywords.destination.join(", "),
        ))
    })?;

    let export = crosscheck_io::xlsx::export_report(&result.rows, &result.layout, &args.output)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", args.output.display())))?;

    if args.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if let Some(n) = args.preview {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_preview(&mut handle, &result, n).map_err(|e| CliError::io(e.to_string()))?;
    }

    if !args.quiet {
        let s = &result.summary;
        eprintln!(
            "cross-check: {} rows, {} missing from Shipment, {} missing from RW, {} missing from CSP, {} in all sources",
            s.total_rows, s.missing_from_shipment, s.missing_from_rw, s.missing_from_csp, s.in_all_sources,
        );
        eprintln!(
            "wrote {} ({}, {} ms)",
            args.output.display(),
            export.summary(),
            export.export_duration_ms
        );
    }

    Ok(())
}

/// Read and validate a config file.
fn load_config(path: &Path) -> Result<CrossCheckConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    CrossCheckConfig::from_toml(&config_str)
        .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
}

/// Pick each source's input file: flag first, then the config entry
/// (relative to the config file's directory).
fn input_paths(args: &RunArgs, config: &CrossCheckConfig) -> Result<[(Source, PathBuf); 3], CliError> {
    let base_dir = args
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));

    let picked = Source::ALL.map(|source| {
        let path = args
            .flag(source)
            .cloned()
            .or_else(|| config.sources.get(source).file.as_ref().map(|f| base_dir.join(f)));
        (source, path)
    });

    let missing: Vec<&str> = picked
        .iter()
        .filter(|(_, path)| path.is_none())
        .map(|(source, _)| source.label())
        .collect();
    if !missing.is_empty() {
        return Err(CliError::usage(format!("no input file for {}", missing.join(", ")))
            .with_hint("pass --shipment/--rw/--csp or set `file` under [sources.<name>] in --config"));
    }

    let [a, b, c] = picked;
    match (a, b, c) {
        ((sa, Some(pa)), (sb, Some(pb)), (sc, Some(pc))) => Ok([(sa, pa), (sb, pb), (sc, pc)]),
        _ => Err(CliError::usage("no input file for one or more sources")),
    }
}

fn load_source(config: &CrossCheckConfig, source: Source, path: &Path) -> Result<RawTable, CliError> {
    let sheet = config.sources.get(source).sheet.as_deref();
    let table = crosscheck_io::load_table(path, sheet)
        .map_err(|e| CliError::io(format!("{} ({}): {e}", source.label(), path.display())))?;
    log::info!(
        "{}: {} rows x {} columns from {}",
        source.label(),
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Aligned text table of the first `limit` report rows.
fn write_preview(out: &mut impl Write, result: &CrossCheckResult, limit: usize) -> io::Result<()> {
    let rows: Vec<[String; 5]> = result.rows.iter().take(limit).map(row_cells).collect();

    let mut widths: [usize; 5] = COLUMNS.map(|c| c.chars().count());
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header: [String; 5] = COLUMNS.map(String::from);
    write_preview_line(out, &header, &widths)?;
    for cells in &rows {
        write_preview_line(out, cells, &widths)?;
    }

    let hidden = result.rows.len().saturating_sub(rows.len());
    if hidden > 0 {
        writeln!(out, "... {hidden} more row{}", if hidden == 1 { "" } else { "s" })?;
    }
    Ok(())
}

fn write_preview_line(out: &mut impl Write, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    let files: Vec<String> = Source::ALL
        .iter()
        .filter_map(|&source| {
            config
                .sources
                .get(source)
                .file
                .as_ref()
                .map(|f| format!("{}={f}", source.label()))
        })
        .collect();

    eprintln!(
        "valid: sheet '{}', {} of 3 source file(s) set{}",
        config.output.sheet_name,
        files.len(),
        if files.is_empty() { String::new() } else { format!(" ({})", files.join(", ")) },
    );
    Ok(())
}

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing::{info, warn};

use sortable_table::logging::init_logging;
use sortable_table::{
    Controller, Diagnostic, Model, Reporter, Severity, SortPolicy, TableConfig, TableError,
    TableEvent, TableInput, TableUI, TracingReporter,
};

/// Render a JSON dataset as a sortable HTML table.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(
    ArgGroup::new("header_source")
        .required(true)
        .args(["headers", "headers_file"])
))]
#[command(group(
    ArgGroup::new("item_source")
        .required(true)
        .args(["items", "items_file"])
))]
struct Cli {
    /// Header descriptors as a JSON array
    #[arg(long)]
    headers: Option<String>,

    /// File containing the header descriptors
    #[arg(long)]
    headers_file: Option<String>,

    /// Rows as a JSON array of objects
    #[arg(long)]
    items: Option<String>,

    /// File containing the rows
    #[arg(long)]
    items_file: Option<String>,

    /// Key of the column to sort by
    #[arg(long)]
    sort_column: Option<String>,

    /// Sort in descending order
    #[arg(long)]
    descending: bool,

    /// Activate the header with this key, as if it was clicked. Repeatable.
    #[arg(long = "click", value_name = "KEY")]
    clicks: Vec<String>,

    /// How descending order is produced
    #[arg(long, value_enum, default_value_t = SortPolicy::ReverseAscending)]
    policy: SortPolicy,

    /// Write the markup to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

/// Passes warnings on and drops errors. Every error the model raises during a
/// run is returned from `run` and printed once by `main`.
struct WarningsOnly<R>(R);

impl<R: Reporter> Reporter for WarningsOnly<R> {
    fn report(&self, diagnostic: &Diagnostic) {
        if diagnostic.severity == Severity::Warning {
            self.0.report(diagnostic);
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run(cli: Cli) -> Result<(), TableError> {
    let cfg = TableConfig::default().policy(cli.policy);
    let ui = TableUI::new(&cfg);
    let controller = Controller::new();
    let mut model = Model::with_reporter(cfg, WarningsOnly(TracingReporter));

    model.set_headers(load_source(cli.headers, cli.headers_file)?)?;
    model.set_items(load_source(cli.items, cli.items_file)?)?;
    info!(
        "Loaded {} columns and {} rows",
        model.column_count(),
        model.row_count()
    );

    let mut events = vec![TableEvent::SortDirectionWritten(!cli.descending)];
    if let Some(column) = cli.sort_column {
        events.push(TableEvent::SortColumnWritten(column));
    }
    events.extend(cli.clicks.into_iter().map(TableEvent::HeaderActivated));

    for event in events {
        match controller.handle_event(&model, event) {
            Ok(Some(message)) => {
                // Failed updates are reported by the model and leave it unchanged
                let _ = model.update(message);
            }
            Ok(None) => {}
            Err(e) => warn!("{e}"),
        }
    }

    let html = ui.draw(&model);
    match cli.output {
        Some(path) => {
            let path = expand_path(&path)?;
            fs::write(&path, html).map_err(|e| io_error(e, path.clone()))?;
            info!("Wrote table to {}", path.display());
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}

fn load_source<T>(
    inline: Option<String>,
    path: Option<String>,
) -> Result<TableInput<T>, TableError> {
    if let Some(text) = inline {
        return Ok(TableInput::Raw(text));
    }
    // clap guarantees one of the two is present
    let path = expand_path(path.as_deref().unwrap_or_default())?;
    let text = fs::read_to_string(&path).map_err(|e| io_error(e, path))?;
    Ok(TableInput::Raw(text))
}

fn expand_path(path: &str) -> Result<PathBuf, TableError> {
    let expanded =
        shellexpand::full(path).map_err(|e| TableError::PathExpansion(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn io_error(err: io::Error, path: PathBuf) -> TableError {
    match err.kind() {
        ErrorKind::NotFound => TableError::FileNotFound(path),
        ErrorKind::PermissionDenied => TableError::PermissionDenied(path),
        _ => TableError::Io(err),
    }
}

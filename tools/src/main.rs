//! trailbook: headless shell over the campsite / mountain record book.
//!
//! Usage:
//!   trailbook --db trailbook.db create campsite "Blue Lake" Utah 4.5 quiet https://x.org -111.5 40.2
//!   trailbook search mountain Denali
//!   trailbook list campsite rating Descending [filter-value]
//!   trailbook modify mountain Denali time 9:05
//!   trailbook remove campsite "Blue Lake"
//!   trailbook stats mountain
//!   trailbook markers [campsite|mountain]
//!   trailbook --config trailbook.json --ipc-mode

use anyhow::{bail, Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use trailbook_core::{
    config::BookConfig, map::MapMarker, statistics::Statistics, Field, RecordBook, RecordId,
    RecordKind, TrailError, TrailResult, WriteOutcome,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    Create {
        kind:   String,
        values: Vec<String>,
    },
    Search {
        kind: String,
        name: String,
    },
    SortAndFilter {
        kind:   String,
        column: String,
        #[serde(default)]
        value:  Option<String>,
        order:  String,
    },
    Modify {
        kind:   String,
        name:   String,
        column: String,
        value:  String,
    },
    Remove {
        kind: String,
        name: String,
    },
    Statistics {
        kind: String,
    },
    Markers {
        #[serde(default)]
        kind: Option<String>,
    },
    Quit,
}

#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum IpcResponse {
    Created {
        id: RecordId,
    },
    Results {
        results: Vec<String>,
    },
    Written {
        result: WriteOutcome,
    },
    Statistics {
        statistics: Statistics,
    },
    Markers {
        markers: Vec<MapMarker>,
    },
    Error {
        error:   &'static str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field:   Option<Field>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason:  Option<&'static str>,
    },
    Closed,
}

impl IpcResponse {
    fn from_error(e: &TrailError) -> Self {
        let error = match e {
            TrailError::Validation(_)        => "validation",
            TrailError::InvalidKind(_)       => "invalid_kind",
            TrailError::InvalidColumn { .. } => "invalid_column",
            TrailError::InvalidOrder(_)      => "invalid_order",
            TrailError::FieldCount { .. }    => "field_count",
            TrailError::Integrity(_)         => "integrity",
            TrailError::Store(_)
            | TrailError::Other(_)           => "store",
        };
        IpcResponse::Error {
            error,
            message: e.to_string(),
            field:   e.validation().map(|v| v.field),
            reason:  e.validation().map(|v| v.reason.as_str()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => BookConfig::load(path)?,
        None => BookConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.database_path = db.into();
    }

    let database = config.database_path.clone();
    let book = RecordBook::open(config)
        .with_context(|| format!("Cannot open store {}", database.display()))?;

    if ipc_mode {
        run_ipc_loop(&book)
    } else {
        run_command(&book, &positional_args(&args))
    }
}

fn run_ipc_loop(book: &RecordBook) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }
        log::debug!("ipc request: {}", buffer.trim());

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({
                    "status": "error",
                    "error": "bad_request",
                    "message": e.to_string(),
                });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let quit = matches!(request, IpcRequest::Quit);
        let response =
            handle_request(book, request).unwrap_or_else(|e| IpcResponse::from_error(&e));
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
        if quit {
            break;
        }
    }
    Ok(())
}

fn handle_request(book: &RecordBook, request: IpcRequest) -> TrailResult<IpcResponse> {
    let response = match request {
        IpcRequest::Create { kind, values } => IpcResponse::Created {
            id: book.create(parse_kind(&kind)?, values.as_slice())?,
        },
        IpcRequest::Search { kind, name } => IpcResponse::Results {
            results: book.search(parse_kind(&kind)?, &name)?,
        },
        IpcRequest::SortAndFilter { kind, column, value, order } => IpcResponse::Results {
            results: book.sort_and_filter(parse_kind(&kind)?, &column, value.as_deref(), &order)?,
        },
        IpcRequest::Modify { kind, name, column, value } => IpcResponse::Written {
            result: book.modify(parse_kind(&kind)?, &name, &column, &value)?,
        },
        IpcRequest::Remove { kind, name } => IpcResponse::Written {
            result: book.remove(parse_kind(&kind)?, &name)?,
        },
        IpcRequest::Statistics { kind } => IpcResponse::Statistics {
            statistics: book.statistics(parse_kind(&kind)?)?,
        },
        IpcRequest::Markers { kind: Some(kind) } => IpcResponse::Markers {
            markers: book.all_records(parse_kind(&kind)?)?,
        },
        IpcRequest::Markers { kind: None } => IpcResponse::Markers {
            markers: book.map_markers()?,
        },
        IpcRequest::Quit => IpcResponse::Closed,
    };
    Ok(response)
}

fn run_command(book: &RecordBook, args: &[&str]) -> Result<()> {
    let Some((&command, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };

    match (command, rest) {
        ("create", [kind, values @ ..]) => {
            let id = book.create(parse_kind(kind)?, values)?;
            println!("{kind} saved with id {id}");
        }
        ("search", [kind, name]) => {
            print_results(&book.search(parse_kind(kind)?, name)?);
        }
        ("list", [kind, column, order]) => {
            print_results(&book.sort_and_filter(parse_kind(kind)?, column, None, order)?);
        }
        ("list", [kind, column, order, value]) => {
            print_results(&book.sort_and_filter(parse_kind(kind)?, column, Some(*value), order)?);
        }
        ("modify", [kind, name, column, value]) => {
            let outcome = book.modify(parse_kind(kind)?, name, column, value)?;
            report_write(kind, name, "updated", outcome);
        }
        ("remove", [kind, name]) => {
            let outcome = book.remove(parse_kind(kind)?, name)?;
            report_write(kind, name, "removed", outcome);
        }
        ("stats", [kind]) => {
            print_statistics(&book.statistics(parse_kind(kind)?)?);
        }
        ("markers", []) => {
            println!("{}", serde_json::to_string_pretty(&book.map_markers()?)?);
        }
        ("markers", [kind]) => {
            println!("{}", serde_json::to_string_pretty(&book.all_records(parse_kind(kind)?)?)?);
        }
        _ => {
            print_usage();
            bail!("Unrecognized command: {}", args.join(" "));
        }
    }
    Ok(())
}

fn print_results(results: &[String]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }
    for text in results {
        println!("{text}");
    }
}

fn report_write(kind: &str, name: &str, verb: &str, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Affected(rows) => println!("{kind} '{name}': {rows} row(s) {verb}"),
        WriteOutcome::NotFound => println!("No {kind} found with name '{name}'"),
    }
}

fn print_statistics(stats: &Statistics) {
    println!("=== {} STATISTICS ===", stats.kind.to_string().to_uppercase());
    println!("  total:          {}", stats.total);
    println!("  states:         {}", stats.state_count);
    if stats.kind.has_field(Field::Elevation) {
        println!("  avg elevation:  {:.1}", stats.avg_elevation);
        println!("  avg ascension:  {:.1}", stats.avg_ascension);
    }
    println!();
    if stats.per_state.is_empty() {
        println!("  (No records yet)");
    }
    for line in stats.per_state_lines() {
        println!("  {line}");
    }
}

fn print_usage() {
    println!("trailbook [--db PATH] [--config FILE] <command>");
    println!("  create <kind> <values...>");
    println!("  search <kind> <name>");
    println!("  list <kind> <column> <Ascending|Descending> [value]");
    println!("  modify <kind> <name> <column> <value>");
    println!("  remove <kind> <name>");
    println!("  stats <kind>");
    println!("  markers [kind]");
    println!("trailbook [--db PATH] [--config FILE] --ipc-mode");
}

fn parse_kind(kind: &str) -> TrailResult<RecordKind> {
    kind.parse()
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Everything that is not a recognized flag (or a flag's value).
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" | "--config" => {
                iter.next();
            }
            "--ipc-mode" => {}
            other => positional.push(other),
        }
    }
    positional
}

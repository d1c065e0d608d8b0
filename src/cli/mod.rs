//! Command-line interface implementation
//!
//! `pixicon <noun> [verb] [--data JSON] [--input FILE]`. Every command reads
//! an optional document (from `--input`, or stdin when it is not a terminal),
//! prints one line of JSON to stdout on success, and one line of JSON
//! `{error, message, path?}` to stderr on failure.

mod anim;
mod cells;
mod describe;
mod export;
mod frame;
mod gallery;
mod grid;
mod import;
mod palette;
mod validate;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::action::Action;
use crate::config::{load_config, PixiconConfig};
use crate::error::{PixiconError, Result};
use crate::history::History;
use crate::models::Document;
use crate::state::State;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixicon - build animated pixel icons from the command line
#[derive(Parser)]
#[command(name = "pixicon")]
#[command(about = "Pixicon - build animated pixel icons and export them as SVG, CSS or React")]
#[command(version)]
pub struct Cli {
    /// Use this pixicon.toml instead of discovering one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or resize a grid document (create, resize)
    Grid(NounArgs),
    /// Edit or inspect cells (set, clear, query, fill-rect, fill-pattern)
    Cells(NounArgs),
    /// Apply animation helpers (stagger, preset)
    Anim(NounArgs),
    /// Manage frames (add, duplicate, remove, set-active, list)
    Frame(NounArgs),
    /// Generate code (svg, css, react, all)
    Export(NounArgs),
    /// Describe the vocabulary: animation types, easings, presets, ...
    #[command(alias = "schema")]
    Describe(NounArgs),
    /// Check a document for structural problems
    Validate(NounArgs),
    /// List the built-in color palettes
    Palette(NounArgs),
    /// Save, list or remove icons in the gallery (save, list, remove)
    Gallery(NounArgs),
    /// Rasterize an image file into a document
    Import(NounArgs),
}

/// Arguments shared by every noun.
#[derive(Args, Debug, Default)]
pub struct NounArgs {
    /// Operation to perform
    pub verb: Option<String>,

    /// Parameters as a JSON object
    #[arg(long)]
    pub data: Option<String>,

    /// Read the document from this file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Everything a command handler can see.
pub(crate) struct Context {
    /// Parsed `--data`, or `Null`
    pub data: Value,
    /// Raw input document, if any was supplied
    pub document: Option<Value>,
    pub config: PixiconConfig,
}

impl Context {
    /// The input document, decoded; `message` names the command for the
    /// missing-document error.
    pub fn require_document(&self, message: &str) -> Result<Document> {
        let doc = self.document.as_ref().ok_or_else(|| PixiconError::missing_document(message))?;
        Document::from_value(doc.clone())
    }

    /// A parameter, treating JSON `null` as absent.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    pub fn require_param(&self, key: &str, message: &str) -> Result<&Value> {
        self.param(key).ok_or_else(|| PixiconError::missing_param(message, format!("data.{key}")))
    }

    /// A string parameter; empty strings count as absent.
    pub fn str_param(&self, key: &str) -> Result<Option<&str>> {
        match self.param(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(PixiconError::invalid_param(format!("{key} must be a string"), format!("data.{key}"))),
        }
    }

    pub fn usize_param(&self, key: &str) -> Result<Option<usize>> {
        self.param(key)
            .map(|v| {
                v.as_u64()
                    .map(|n| n as usize)
                    .ok_or_else(|| PixiconError::invalid_param(format!("{key} must be a non-negative integer"), format!("data.{key}")))
            })
            .transpose()
    }

    pub fn i64_param(&self, key: &str) -> Result<Option<i64>> {
        self.param(key)
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| PixiconError::invalid_param(format!("{key} must be an integer"), format!("data.{key}")))
            })
            .transpose()
    }

    pub fn f64_param(&self, key: &str) -> Result<Option<f64>> {
        self.param(key)
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| PixiconError::invalid_param(format!("{key} must be a number"), format!("data.{key}")))
            })
            .transpose()
    }
}

/// Run `actions` through the undo history and return the resulting document
/// as JSON.
pub(crate) fn apply(state: State, actions: &[Action]) -> Result<Value> {
    let mut history = History::new(state);
    let changed = history.dispatch_all(actions);
    tracing::debug!(dispatched = actions.len(), changed, "applied actions");
    to_json(&history.present().to_document())
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| PixiconError::malformed("output", e))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pixicon=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixicon=warn"))
    };
    // a second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_error(value: &Value) {
    eprintln!("{}", value);
}

fn read_document(input: Option<&Path>) -> Result<Option<Value>> {
    let (raw, source) = match input {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| PixiconError::Io {
                message: e.to_string(),
                path: path.display().to_string(),
            })?;
            (raw, path.display().to_string())
        }
        None if atty::isnt(atty::Stream::Stdin) => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|e| PixiconError::Io { message: e.to_string(), path: "stdin".to_string() })?;
            (raw, "stdin".to_string())
        }
        None => return Ok(None),
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw).map(Some).map_err(|e| PixiconError::malformed(source, e))
}

fn parse_data(data: Option<&str>) -> Result<Value> {
    match data {
        Some(text) => serde_json::from_str(text).map_err(|e| PixiconError::malformed("--data", e)),
        None => Ok(Value::Null),
    }
}

type Handler = fn(Option<&str>, &Context) -> Result<Value>;

fn execute(noun: &str, args: &NounArgs, handler: Handler, config: PixiconConfig) -> Result<Value> {
    let ctx = Context {
        data: parse_data(args.data.as_deref())?,
        document: read_document(args.input.as_deref())?,
        config,
    };
    let verb = args.verb.as_deref();
    tracing::debug!(noun, verb = verb.unwrap_or(""), has_document = ctx.document.is_some(), "running command");
    handler(verb, &ctx)
}

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitCode::from(EXIT_SUCCESS);
        }
        Err(e) => {
            emit_error(&json!({ "error": "USAGE", "message": e.to_string().trim_end() }));
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            emit_error(&PixiconError::from(e).to_json());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (noun, args, handler): (&str, &NounArgs, Handler) = match &cli.command {
        Commands::Grid(args) => ("grid", args, grid::handle),
        Commands::Cells(args) => ("cells", args, cells::handle),
        Commands::Anim(args) => ("anim", args, anim::handle),
        Commands::Frame(args) => ("frame", args, frame::handle),
        Commands::Export(args) => ("export", args, export::handle),
        Commands::Describe(args) => ("describe", args, describe::handle),
        Commands::Validate(args) => ("validate", args, validate::handle),
        Commands::Palette(args) => ("palette", args, palette::handle),
        Commands::Gallery(args) => ("gallery", args, gallery::handle),
        Commands::Import(args) => ("import", args, import::handle),
    };

    match execute(noun, args, handler, config) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::debug!(kind = e.kind(), "command failed");
            emit_error(&e.to_json());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

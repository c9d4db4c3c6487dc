use log::{debug, info, warn};

use answer_key::letters::RandomLetters;
use answer_key::*;
use snafu::{prelude::*, Snafu};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod config_reader;
pub mod io_common;
pub mod io_writer;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum RemapError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The first worksheet of {path} is missing"))]
    EmptyExcel { path: String },
    #[snafu(display("Expected an .xlsx file, got {path}"))]
    WrongExtension { path: String },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a non-negative integer for {field}"))]
    ParsingJsonNumber { field: String },
    #[snafu(display("Unknown code overflow mode {mode:?} (expected wrap or reject)"))]
    UnknownOverflowMode { mode: String },
    #[snafu(display("No input file was selected"))]
    MissingInput {},
    #[snafu(display("Error remapping the answers"))]
    Transform { source: RemapErrors },
    #[snafu(display("Error writing file {path}"))]
    WritingExcel {
        source: umya_spreadsheet::writer::xlsx::XlsxError,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RunResult<T> = Result<T, RemapError>;

/// Where the processed spreadsheet goes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    /// A generated file name inside this directory.
    Directory(PathBuf),
    File(PathBuf),
}

/// The options of one run, once the configuration file and the flags are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input: Option<PathBuf>,
    pub output: OutputTarget,
    pub output_prefix: String,
    pub sheet_name: String,
    pub random_seed: Option<u64>,
    pub rules: RemapRules,
}

impl RunSettings {
    pub const DEFAULT_PREFIX: &'static str = "ANABUT";
    pub const DEFAULT_SHEET_NAME: &'static str = "Processed Data";

    pub fn with_input(input: Option<PathBuf>) -> RunSettings {
        RunSettings {
            input,
            output: OutputTarget::Directory(PathBuf::from(".")),
            output_prefix: RunSettings::DEFAULT_PREFIX.to_string(),
            sheet_name: RunSettings::DEFAULT_SHEET_NAME.to_string(),
            random_seed: None,
            rules: RemapRules::default(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum JobStatus {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

/// A single processing request and its status.
pub struct RemapJob {
    settings: RunSettings,
    status: JobStatus,
}

impl RemapJob {
    pub fn new(settings: RunSettings) -> RemapJob {
        RemapJob {
            settings,
            status: JobStatus::Idle,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// False while no input is selected.
    pub fn can_process(&self) -> bool {
        self.settings.input.is_some()
    }

    /// Runs the whole pipeline and returns the path of the written file.
    ///
    /// The job never stays in the `Processing` state once this returns.
    pub fn process(&mut self, now: DateTime<Utc>) -> RunResult<PathBuf> {
        ensure!(self.can_process(), MissingInputSnafu {});
        self.status = JobStatus::Processing;
        let res = run_remap(&self.settings, now);
        self.status = if res.is_ok() {
            JobStatus::Succeeded
        } else {
            JobStatus::Failed
        };
        debug!("RemapJob::process: status: {:?}", self.status);
        res
    }
}

fn remap_table(table: &Table, settings: &RunSettings) -> RunResult<answer_key::RemapResult> {
    let res = match settings.random_seed {
        Some(seed) => {
            info!("Using random seed {}", seed);
            let mut letters = RandomLetters::new(StdRng::seed_from_u64(seed));
            transform(table, &settings.rules, &mut letters)
        }
        None => {
            let mut letters = RandomLetters::new(rand::rng());
            transform(table, &settings.rules, &mut letters)
        }
    };
    res.context(TransformSnafu {})
}

/// Reads the input spreadsheet, remaps it and writes the processed spreadsheet.
pub fn run_remap(settings: &RunSettings, now: DateTime<Utc>) -> RunResult<PathBuf> {
    let input: &Path = settings.input.as_deref().context(MissingInputSnafu {})?;
    io_xlsx::check_extension(input)?;
    info!(
        "Attempting to read answer sheet {}",
        io_common::simplify_file_name(input)
    );

    let table = io_xlsx::read_first_sheet(input)?;
    debug!("run_remap: read {:?} rows", table.len());

    let res = remap_table(&table, settings)?;

    for m in res.mappings.iter() {
        for c in m.collisions.iter() {
            warn!(
                "Column {}: {:?} and {:?} are both coded {} and cannot be told apart",
                m.column, c.shares_with, c.answer, c.code
            );
        }
    }
    info!("Answer key codes: {}", res.combined_key());

    let out_path = io_common::output_path(&settings.output, &settings.output_prefix, now);
    io_writer::write_table(&res.table, &settings.sheet_name, &out_path)?;
    info!(
        "Wrote {} scored respondents to {:?}",
        res.scores.len(),
        out_path.display()
    );
    Ok(out_path)
}

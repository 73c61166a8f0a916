use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::plan::RawSelection;
use crate::storage::Model;

/// Top-level CLI definition. Month, range and time-of-day flags keep their Polish names.
#[derive(Parser, Debug)]
#[command(
    name = "solutions-tree",
    version,
    about = "Create or read Solutions files in a month/weekday/time-of-day directory tree.\n\
             Writes csv files by default.",
    after_help = "Running without any months ends the program without producing anything."
)]
pub struct Cli {
    /// Months, lower case with Polish characters, e.g. `styczeń luty`.
    #[arg(long = "miesiace", num_args = 0..)]
    pub miesiace: Vec<String>,
    /// One weekday range per month, e.g. `pn-pt` or `sb`.
    #[arg(long = "zakres_dni_tygodnia", num_args = 0..)]
    pub zakres_dni_tygodnia: Vec<String>,
    /// One time of day per expanded day (`r` morning, `w` evening); missing ones default to `r`.
    #[arg(long = "pora_dnia", num_args = 0..)]
    pub pora_dnia: Vec<String>,
    /// Read existing files instead of creating them.
    #[arg(short = 'o')]
    pub read: bool,
    /// Use json files instead of csv.
    #[arg(short = 'j')]
    pub json: bool,
    /// Root directory of the tree (default: ./SkryptPython).
    #[arg(long = "root")]
    pub root: Option<PathBuf>,
    /// Model whose computation times are summed when reading.
    #[arg(long = "model", value_enum, ignore_case = true)]
    pub model: Option<Model>,
    /// Overwrite existing files without asking.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
    /// TOML file with defaults for `root` and `model`.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
    /// Raise log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn selection(&self) -> RawSelection {
        RawSelection {
            months: self.miesiace.clone(),
            ranges: self.zakres_dni_tygodnia.clone(),
            times_of_day: self.pora_dnia.clone(),
        }
    }
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}

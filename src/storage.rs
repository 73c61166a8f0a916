use std::fs::{self, File};
use std::io::{Read, Write};

use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8Path;
use clap::ValueEnum;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const HEADER: [&str; 3] = ["Model", "Output value", "Time of computation"];

const DELIMITER: u8 = b';';
const MAX_VALUE: u32 = 1000;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize, ValueEnum)]
pub enum Model {
    #[default]
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::A, Model::B, Model::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::A => "A",
            Model::B => "B",
            Model::C => "C",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl Format {
    pub fn file_name(&self) -> &'static str {
        match self {
            Format::Csv => "Solutions.csv",
            Format::Json => "Solutions.json",
        }
    }
}

/// One row of placeholder results.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record {
    pub model: Model,
    pub output_value: u32,
    pub computation_time: u32,
}

impl Record {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let model = Model::ALL.choose(rng).copied().unwrap_or_default();
        Self {
            model,
            output_value: rng.gen_range(0..=MAX_VALUE),
            computation_time: rng.gen_range(0..=MAX_VALUE),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonDocument {
    #[serde(rename = "Header")]
    header: Vec<String>,
    #[serde(rename = "Data")]
    data: JsonRow,
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonRow {
    #[serde(rename = "Model")]
    model: Model,
    #[serde(rename = "Output value")]
    output_value: u32,
    #[serde(rename = "Time of computation")]
    computation_time: String,
}

/// Write `record` to `path` in the given format, replacing any existing file.
pub fn write_record(path: &Utf8Path, format: Format, record: &Record) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path))?;
    let written = match format {
        Format::Csv => write_csv(file, record),
        Format::Json => write_json(file, record),
    };
    written.with_context(|| format!("writing {}", path))
}

/// Sum the computation time of every row in `path` produced by `model`.
pub fn read_total(path: &Utf8Path, format: Format, model: Model) -> Result<i64> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    let total = match format {
        Format::Csv => read_csv(file, model),
        Format::Json => read_json(file, model),
    };
    total.with_context(|| format!("reading {}", path))
}

fn write_csv<W: Write>(writer: W, record: &Record) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    wtr.write_record([
        record.model.as_str().to_owned(),
        record.output_value.to_string(),
        record.computation_time.to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write>(mut writer: W, record: &Record) -> Result<()> {
    let document = JsonDocument {
        header: HEADER.iter().map(|h| (*h).to_owned()).collect(),
        data: JsonRow {
            model: record.model,
            output_value: record.output_value,
            computation_time: format!("{}s", record.computation_time),
        },
    };
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    document.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}

fn read_csv<R: Read>(reader: R, model: Model) -> Result<i64> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("missing `{}` column", name))
    };
    let model_at = column(HEADER[0])?;
    let time_at = column(HEADER[2])?;

    let mut total = 0i64;
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        if row.get(model_at) != Some(model.as_str()) {
            continue;
        }
        let raw = row.get(time_at).unwrap_or_default();
        let time: i64 = raw
            .trim()
            .parse()
            .with_context(|| format!("row {}: invalid computation time `{}`", idx + 1, raw))?;
        total = total
            .checked_add(time)
            .ok_or_else(|| anyhow!("row {}: computation time sum overflows", idx + 1))?;
    }
    Ok(total)
}

fn read_json<R: Read>(reader: R, model: Model) -> Result<i64> {
    let document: JsonDocument = serde_json::from_reader(reader)?;
    if document.data.model != model {
        return Ok(0);
    }
    let raw = document.data.computation_time.trim();
    let Some(seconds) = raw.strip_suffix('s') else {
        bail!("invalid computation time `{}`", raw);
    };
    seconds
        .parse()
        .with_context(|| format!("invalid computation time `{}`", raw))
}

/// Does a regular file already sit at `path`?
pub fn exists(path: &Utf8Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

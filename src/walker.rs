use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rand::Rng;
use tracing::{debug, warn};

use crate::config::{Overwrite, Settings};
use crate::plan::{Leaf, Plan};
use crate::storage::{self, Record};

/// Outcome of walking a plan.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
    pub missing: Vec<Utf8PathBuf>,
    pub totals: Vec<(Utf8PathBuf, i64)>,
}

impl Summary {
    /// Grand total of the per-file sums, clamped at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.totals
            .iter()
            .fold(0i64, |acc, (_, sum)| acc.saturating_add(*sum))
    }
}

/// What `read_tree` found at one leaf, reported as soon as it is known.
#[derive(Debug, PartialEq, Eq)]
pub enum LeafRead<'a> {
    Missing(&'a Utf8Path),
    Total(&'a Utf8Path, i64),
}

pub fn leaf_dir(root: &Utf8Path, leaf: &Leaf) -> Utf8PathBuf {
    root.join(leaf.month.dir_name())
        .join(leaf.weekday.dir_name())
        .join(leaf.time_of_day.dir_name())
}

fn prepare_leaf(settings: &Settings, leaf: &Leaf) -> Result<Utf8PathBuf> {
    let dir = leaf_dir(&settings.root, leaf);
    fs::create_dir_all(&dir).with_context(|| format!("creating directory {}", dir))?;
    Ok(dir.join(settings.format.file_name()))
}

/// Create every leaf directory and write a fresh random record into it.
///
/// `confirm` is asked before an existing file is replaced unless the
/// settings say to always overwrite.
pub fn write_tree<R, F>(
    settings: &Settings,
    plan: &Plan,
    rng: &mut R,
    mut confirm: F,
) -> Result<Summary>
where
    R: Rng + ?Sized,
    F: FnMut(&Utf8Path) -> Result<bool>,
{
    let mut summary = Summary::default();
    for leaf in plan.leaves() {
        let path = prepare_leaf(settings, leaf)?;

        if storage::exists(&path) && settings.overwrite == Overwrite::Ask && !confirm(&path)? {
            warn!("keeping existing {}", path);
            summary.skipped += 1;
            continue;
        }

        let record = Record::random(rng);
        storage::write_record(&path, settings.format, &record)?;
        debug!(
            "wrote {} (model {}, output {}, time {})",
            path,
            record.model.as_str(),
            record.output_value,
            record.computation_time
        );
        summary.written += 1;
    }
    Ok(summary)
}

/// Create every leaf directory and aggregate the file found there, if any.
///
/// `report` sees every leaf in walk order before the next one is touched,
/// so earlier results are out even when a later file fails to read.
pub fn read_tree<F>(settings: &Settings, plan: &Plan, mut report: F) -> Result<Summary>
where
    F: FnMut(LeafRead<'_>) -> Result<()>,
{
    let mut summary = Summary::default();
    for leaf in plan.leaves() {
        let path = prepare_leaf(settings, leaf)?;

        if !storage::exists(&path) {
            warn!("missing {}", path);
            report(LeafRead::Missing(&path))?;
            summary.missing.push(path);
            continue;
        }

        let total = storage::read_total(&path, settings.format, settings.model)?;
        debug!("read {}: {}", path, total);
        report(LeafRead::Total(&path, total))?;
        summary.totals.push((path, total));
    }
    Ok(summary)
}

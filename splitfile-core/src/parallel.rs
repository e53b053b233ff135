use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::name::part_path;
use crate::plan::{compute_partition, PartitionMode};
use crate::progress::Progress;
use crate::split::copy_range;

/// Tunables for the batch-parallel splitter. The limit on in-flight ranges is
/// `floor(memory_budget * memory_fraction / file size)`, clamped to
/// `[1, part count]`, so aggregate copy-buffer memory stays under the
/// budgeted fraction even for very high fan-outs.
#[derive(Clone, Copy, Debug)]
pub struct ParallelConfig {
    pub memory_budget: u64,
    pub memory_fraction: f64,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self { memory_budget: 1 << 30, memory_fraction: 0.75 }
    }
}

impl ParallelConfig {
    pub fn with_budget(memory_budget: u64) -> Self {
        Self { memory_budget, ..Self::default() }
    }
}

/// How many ranges may be in flight at once for a `total`-byte source split
/// into `parts`. At least 1, never more than `parts`.
pub fn concurrency_limit(parts: u32, total: u64, cfg: &ParallelConfig) -> usize {
    let budgeted = (cfg.memory_budget as f64 * cfg.memory_fraction / total as f64) as u64;
    budgeted.clamp(1, parts.max(1) as u64) as usize
}

/// Splits `source` into `parts` equal-count parts, executing ranges in
/// fixed-size batches: every range in a batch runs concurrently, the batch
/// settles fully before the next one starts. Ranges come from the same
/// planner as the sequential splitter, so part names and contents are
/// identical to a sequential split of the same file.
///
/// A failure anywhere in a batch fails the operation once that batch has
/// settled; parts from earlier batches stay on disk.
pub fn split_parallel(
    source: &Path,
    parts: u32,
    dest: Option<&Path>,
    cfg: &ParallelConfig,
    progress: &Progress,
) -> Result<Vec<PathBuf>> {
    let total = std::fs::metadata(source)
        .map_err(|e| crate::error::SplitError::io("stat", source, e))?
        .len();
    let plan = compute_partition(total, PartitionMode::ByCount(parts))?;
    progress.reset(parts as usize, total as usize);

    let limit = concurrency_limit(parts, total, cfg);
    let paths: Vec<PathBuf> =
        plan.specs().iter().map(|s| part_path(source, s.index, parts, dest)).collect();

    for batch in plan.specs().chunks(limit) {
        batch
            .par_iter()
            .try_for_each(|spec| -> Result<()> {
                let out = &paths[spec.index as usize - 1];
                copy_range(source, spec, out, progress)?;
                progress.inc_part();
                Ok(())
            })?;
    }
    Ok(paths)
}

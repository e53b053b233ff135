use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};
use crate::name::part_path;
use crate::plan::{PartSpec, PartitionPlan};
use crate::progress::Progress;

const COPY_BUF: usize = 1 << 20;

/// Materializes `plan` as part files, one range at a time, strictly in plan
/// order. Exactly one reader/writer pair is open at any moment; both are
/// dropped before the next range starts.
///
/// A failure on any range aborts the whole split; parts written before the
/// failure are left on disk. On success returns the created paths in part
/// order.
pub fn split_sequential(
    source: &Path,
    plan: &PartitionPlan,
    dest: Option<&Path>,
    progress: &Progress,
) -> Result<Vec<PathBuf>> {
    let parts = plan.part_count();
    progress.reset(parts as usize, plan.total() as usize);

    let mut created = Vec::with_capacity(parts as usize);
    for spec in plan.specs() {
        let out = part_path(source, spec.index, parts, dest);
        copy_range(source, spec, &out, progress)?;
        progress.inc_part();
        created.push(out);
    }
    Ok(created)
}

/// Streams the `[spec.start, spec.end)` window of `source` into a freshly
/// created file at `out` through a fixed-size buffer. Used by both the
/// sequential and the batch-parallel splitter.
pub(crate) fn copy_range(
    source: &Path,
    spec: &PartSpec,
    out: &Path,
    progress: &Progress,
) -> Result<()> {
    let mut reader = File::open(source).map_err(|e| SplitError::io("open", source, e))?;
    reader
        .seek(SeekFrom::Start(spec.start))
        .map_err(|e| SplitError::io("seek", source, e))?;

    let mut writer = File::create(out).map_err(|e| SplitError::io("create", out, e))?;

    let mut buf = vec![0u8; COPY_BUF.min(spec.len() as usize)];
    let mut remaining = spec.len();
    while remaining > 0 {
        let want = remaining.min(buf.len() as u64) as usize;
        reader
            .read_exact(&mut buf[..want])
            .map_err(|e| SplitError::io("read", source, e))?;
        writer.write_all(&buf[..want]).map_err(|e| SplitError::io("write", out, e))?;
        progress.add_bytes(want);
        remaining -= want as u64;
    }
    writer.flush().map_err(|e| SplitError::io("flush", out, e))?;
    Ok(())
}

use crate::error::{Result, SplitError};

/// How a source file is carved into parts.
#[derive(Clone, Copy, Debug)]
pub enum PartitionMode {
    /// Exactly `n` parts; all but the last share the same floor length and
    /// the last absorbs the division remainder.
    ByCount(u32),
    /// As many parts as needed so no part exceeds `max` bytes; the last part
    /// may be shorter but is never empty.
    BySize(u64),
}

/// One contiguous byte range of the source, 1-based `index`, `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartSpec {
    pub index: u32,
    pub start: u64,
    pub end: u64,
}

impl PartSpec {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered ranges covering `[0, total)` exactly once, gapless and ascending.
/// Built once per split call and discarded after it.
#[derive(Clone, Debug)]
pub struct PartitionPlan {
    specs: Vec<PartSpec>,
    total: u64,
}

impl PartitionPlan {
    pub fn specs(&self) -> &[PartSpec] {
        &self.specs
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn part_count(&self) -> u32 {
        self.specs.len() as u32
    }
}

/// Computes the ordered range list for `total` bytes under `mode`.
///
/// Argument validity is checked before the size of the source, so a bad part
/// count is reported even for an empty file; an empty file itself has no
/// valid partition and is rejected next.
pub fn compute_partition(total: u64, mode: PartitionMode) -> Result<PartitionPlan> {
    match mode {
        PartitionMode::ByCount(n) => plan_by_count(total, n),
        PartitionMode::BySize(max) => plan_by_size(total, max),
    }
}

fn plan_by_count(total: u64, parts: u32) -> Result<PartitionPlan> {
    if parts < 1 {
        return Err(SplitError::InvalidPartCount(parts));
    }
    if total == 0 {
        return Err(SplitError::EmptySource);
    }
    let base = total / parts as u64;
    if base < 1 {
        return Err(SplitError::OverPartitioned { parts, total });
    }
    // Last part takes the remainder, up to parts-1 bytes more than the rest.
    let last = base + total % parts as u64;

    let mut specs = Vec::with_capacity(parts as usize);
    for i in 0..parts as u64 {
        let start = i * base;
        let end = if i == parts as u64 - 1 { start + last } else { start + base };
        specs.push(PartSpec { index: i as u32 + 1, start, end });
    }
    Ok(PartitionPlan { specs, total })
}

fn plan_by_size(total: u64, max: u64) -> Result<PartitionPlan> {
    if max < 1 {
        return Err(SplitError::InvalidMaxSize(max));
    }
    if total == 0 {
        return Err(SplitError::EmptySource);
    }
    let parts = total.div_ceil(max);

    let mut specs = Vec::with_capacity(parts as usize);
    for i in 0..parts {
        let start = i * max;
        // Force the last range to end at the file size instead of a full
        // max-sized window; its length stays in (0, max].
        let end = if i == parts - 1 { total } else { start + max };
        specs.push(PartSpec { index: i as u32 + 1, start, end });
    }
    Ok(PartitionPlan { specs, total })
}

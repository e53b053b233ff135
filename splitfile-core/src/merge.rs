use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};
use crate::progress::Progress;

const COPY_BUF: usize = 1 << 20;

/// Concatenates `inputs` into `dest`, strictly in the order given, through a
/// single output handle held open for the whole operation. No delimiters or
/// metadata are written; the result is the byte-for-byte concatenation of
/// the inputs.
///
/// The input ordering is the caller's responsibility and is trusted as-is.
/// A failure mid-way leaves the truncated output on disk.
pub fn merge(inputs: &[PathBuf], dest: &Path, progress: &Progress) -> Result<PathBuf> {
    if inputs.is_empty() {
        return Err(SplitError::EmptyMergeList);
    }
    progress.reset(inputs.len(), 0);

    let mut writer = File::create(dest).map_err(|e| SplitError::io("create", dest, e))?;
    let mut buf = vec![0u8; COPY_BUF];

    for input in inputs {
        let mut reader = File::open(input).map_err(|e| SplitError::io("open", input, e))?;
        loop {
            let n = reader.read(&mut buf).map_err(|e| SplitError::io("read", input, e))?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n]).map_err(|e| SplitError::io("write", dest, e))?;
            progress.add_bytes(n);
        }
        progress.inc_part();
    }
    writer.flush().map_err(|e| SplitError::io("flush", dest, e))?;
    Ok(dest.to_path_buf())
}

use std::path::{Path, PathBuf};

/// Number of decimal digits used to pad part indexes for `parts` total parts.
/// With this width a plain alphabetical directory listing of part names is
/// already in numeric part order, for up to 10^width - 1 parts.
pub fn pad_width(parts: u32) -> usize {
    parts.max(1).ilog10() as usize + 1
}

/// Standard part filename: `<source name>.sf-part<zero-padded index>`.
pub fn part_file_name(source_name: &str, index: u32, parts: u32) -> String {
    format!("{source_name}.sf-part{index:0width$}", width = pad_width(parts))
}

/// Full output path for one part: next to the source file, or inside `dest`
/// when a destination directory is given.
pub fn part_path(source: &Path, index: u32, parts: u32, dest: Option<&Path>) -> PathBuf {
    let base = source.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let name = part_file_name(&base, index, parts);
    match dest {
        Some(dir) => dir.join(name),
        None => source.parent().unwrap_or_else(|| Path::new("")).join(name),
    }
}

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use splitfile_core::merge::merge;
use splitfile_core::parallel::{split_parallel, ParallelConfig};
use splitfile_core::plan::{compute_partition, PartitionMode};
use splitfile_core::progress::Progress;
use splitfile_core::split::split_sequential;

#[derive(Parser)]
#[command(name = "splitfile", version, about = "Split a file into ordered parts and merge them back")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Split a file into N parts of equal size (last part takes the remainder)
    Split {
        input: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        parts: u32,
        /// Directory for the parts (default: next to the input file)
        #[arg(long)]
        dest: Option<PathBuf>,
        /// Write parts concurrently, batched under the memory budget
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Memory budget for --parallel, e.g. 512M or 2G
        #[arg(long)]
        memory_budget: Option<String>,
        #[arg(long, default_value_t = false)]
        progress: bool,
    },
    /// Split a file into parts of at most the given size (e.g. 100M)
    SplitSize {
        input: PathBuf,
        max_size: String,
        #[arg(long)]
        dest: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        progress: bool,
    },
    /// Merge parts back into one file, in the order given
    Merge {
        output: PathBuf,
        /// Part files in merge order; omit when using --dir
        parts: Vec<PathBuf>,
        /// Discover `*.sf-part*` files in this directory, sorted by name
        #[arg(long, conflicts_with = "parts")]
        dir: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        progress: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Split { input, parts, dest, parallel, memory_budget, progress } => {
            split(&input, parts, dest.as_deref(), parallel, memory_budget, progress)?;
        }
        Cmd::SplitSize { input, max_size, dest, progress } => {
            split_size(&input, &max_size, dest.as_deref(), progress)?;
        }
        Cmd::Merge { output, parts, dir, progress } => {
            run_merge(&output, parts, dir.as_deref(), progress)?;
        }
    }
    Ok(())
}

fn parse_size(spec: &str) -> Result<u64> {
    let s = spec.trim().to_uppercase();
    let (num, mul) = if s.ends_with('K') {
        (&s[..s.len() - 1], 1u64 << 10)
    } else if s.ends_with('M') {
        (&s[..s.len() - 1], 1 << 20)
    } else if s.ends_with('G') {
        (&s[..s.len() - 1], 1 << 30)
    } else {
        (&s[..], 1)
    };
    let v: u64 = num.parse().map_err(|_| anyhow!("bad size {}", spec))?;
    Ok(v * mul)
}

fn source_size(input: &Path) -> Result<u64> {
    let md = fs::metadata(input).with_context(|| format!("stat {}", input.display()))?;
    if !md.is_file() {
        return Err(anyhow!("{} is not a regular file", input.display()));
    }
    Ok(md.len())
}

fn split(
    input: &Path,
    parts: u32,
    dest: Option<&Path>,
    parallel: bool,
    memory_budget: Option<String>,
    show_progress: bool,
) -> Result<()> {
    if let Some(d) = dest {
        fs::create_dir_all(d)?;
    }
    let prog = Progress::new(show_progress);
    prog.set_stage("Splitting");
    prog.start();

    let created = if parallel {
        let cfg = match memory_budget {
            Some(spec) => ParallelConfig::with_budget(parse_size(&spec)?),
            None => ParallelConfig::default(),
        };
        split_parallel(input, parts, dest, &cfg, &prog)?
    } else {
        let total = source_size(input)?;
        let plan = compute_partition(total, PartitionMode::ByCount(parts))?;
        split_sequential(input, &plan, dest, &prog)?
    };
    prog.stop();

    for p in &created {
        println!("{}", p.display());
    }
    eprintln!("Wrote {} part(s)", created.len());
    Ok(())
}

fn split_size(input: &Path, max_size: &str, dest: Option<&Path>, show_progress: bool) -> Result<()> {
    if let Some(d) = dest {
        fs::create_dir_all(d)?;
    }
    let max = parse_size(max_size)?;
    let total = source_size(input)?;
    let plan = compute_partition(total, PartitionMode::BySize(max))?;

    let prog = Progress::new(show_progress);
    prog.set_stage("Splitting");
    prog.start();
    let created = split_sequential(input, &plan, dest, &prog)?;
    prog.stop();

    for p in &created {
        println!("{}", p.display());
    }
    eprintln!("Wrote {} part(s)", created.len());
    Ok(())
}

/// Flat listing of `*.sf-part*` names in `dir`, sorted by filename. The
/// zero-padded suffix makes the alphabetical order the numeric part order.
fn discover_parts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let p = entry?.path();
        if !p.is_file() {
            continue;
        }
        let name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if name.contains(".sf-part") {
            found.push(p);
        }
    }
    found.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(found)
}

fn run_merge(
    output: &Path,
    parts: Vec<PathBuf>,
    dir: Option<&Path>,
    show_progress: bool,
) -> Result<()> {
    let inputs = match dir {
        Some(d) => discover_parts(d)?,
        None => parts,
    };

    let prog = Progress::new(show_progress);
    prog.set_stage("Merging");
    prog.start();
    let dest = merge(&inputs, output, &prog)?;
    prog.stop();

    eprintln!("Merged {} part(s) into {}", inputs.len(), dest.display());
    Ok(())
}

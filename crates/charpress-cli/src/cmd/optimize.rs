// crates/charpress-cli/src/cmd/optimize.rs

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, ValueEnum};

use charpress_core::optimizer::engine::{self, RangeBreakdown};
use charpress_core::{
    AddressRange, Charset, LineOptimizer, MergePolicy, OptimizeConfig, TieBreak,
};

use crate::io::tables;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum PatternChannel {
    /// No pattern optimizations (default).
    Off,
    /// Rewrite pattern bytes only.
    Basic,
    /// Rewrite pattern bytes, allowing color changes.
    WithColor,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ColorChannel {
    /// No color optimizations.
    Off,
    /// Rewrite color bytes only.
    Basic,
    /// Rewrite color bytes, allowing pattern changes (default).
    WithPattern,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Prioritize {
    /// Merge both channels without prioritization (default).
    None,
    /// Pattern ranges win every overlap.
    Pattern,
    /// Color ranges win every overlap.
    Color,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum TieBreakChoice {
    /// Larger range wins, ties by entropy (default).
    Size,
    /// Higher-entropy range wins, ties by size.
    Entropy,
}

#[derive(Args)]
pub struct OptimizeArgs {
    /// Pattern table input (CHRTBL)
    #[arg(long)]
    pub chr: PathBuf,

    /// Color table input (CLRTBL). Defaults to the `.clr` sibling of --chr.
    #[arg(long)]
    pub clr: Option<PathBuf>,

    /// Optimized pattern table output. Defaults to `<chr>.opt`.
    #[arg(long)]
    pub out_chr: Option<PathBuf>,

    /// Optimized color table output. Defaults to `<clr>.opt`.
    #[arg(long)]
    pub out_clr: Option<PathBuf>,

    /// Pattern-channel optimizer
    #[arg(long, value_enum, default_value_t = PatternChannel::Off)]
    pub pattern: PatternChannel,

    /// Color-channel optimizer
    #[arg(long, value_enum, default_value_t = ColorChannel::WithPattern)]
    pub color: ColorChannel,

    /// Cross-channel merge policy
    #[arg(long, value_enum, default_value_t = Prioritize::None)]
    pub prioritize: Prioritize,

    /// Tie-break among overlapped, non-mergeable ranges
    #[arg(long, value_enum, default_value_t = TieBreakChoice::Size)]
    pub tie_break: TieBreakChoice,

    /// Excluded range of addresses: <from>..<to> (decimal or 0x hex)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Dump per-stage coverage maps and range lists
    #[arg(long)]
    pub verbose: bool,
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let clr = match args.clr.clone() {
        Some(path) => path,
        None => match tables::default_clr_path(&args.chr) {
            Some(path) => path,
            None => bail!("--clr is required unless --chr has a .chr extension"),
        },
    };

    let chr_bytes = tables::read_table(&args.chr)?;
    let clr_bytes = tables::read_table(&clr)?;
    let charset = Charset::new(chr_bytes, clr_bytes)?;

    let config = OptimizeConfig {
        pattern_optimizer: match args.pattern {
            PatternChannel::Off => LineOptimizer::Null,
            PatternChannel::Basic => LineOptimizer::PatternOnly,
            PatternChannel::WithColor => LineOptimizer::PatternAndColor,
        },
        color_optimizer: match args.color {
            ColorChannel::Off => LineOptimizer::Null,
            ColorChannel::Basic => LineOptimizer::ColorOnly,
            ColorChannel::WithPattern => LineOptimizer::ColorAndPattern,
        },
        policy: match args.prioritize {
            Prioritize::None => MergePolicy::Balanced,
            Prioritize::Pattern => MergePolicy::PrioritizePattern,
            Prioritize::Color => MergePolicy::PrioritizeColor,
        },
        tie_break: match args.tie_break {
            TieBreakChoice::Size => TieBreak::SizeThenEntropy,
            TieBreakChoice::Entropy => TieBreak::EntropyThenSize,
        },
        exclusion: args.exclude.as_deref().map(parse_exclude).transpose()?,
    };

    if args.verbose {
        dump_breakdown(&charset, &config);
    }

    let (optimized, stats) = charpress_core::optimize(&charset, &config);

    let out_chr = args
        .out_chr
        .clone()
        .unwrap_or_else(|| tables::default_opt_path(&args.chr));
    let out_clr = args
        .out_clr
        .clone()
        .unwrap_or_else(|| tables::default_opt_path(&clr));

    tables::write_table(&out_chr, optimized.patterns())?;
    tables::write_table(&out_clr, optimized.colors())?;

    eprintln!(
        "optimize ok: rows={} ranges={} (chr={} clr={}) rewritten={} skipped={} \
         chr_entropy={:.3}->{:.3} clr_entropy={:.3}->{:.3} \
         out_chr={} (crc32={:08x}) out_clr={} (crc32={:08x})",
        charset.len(),
        stats.ranges,
        stats.pattern_ranges,
        stats.color_ranges,
        stats.rewritten,
        stats.skipped,
        stats.pattern_entropy_before,
        stats.pattern_entropy_after,
        stats.color_entropy_before,
        stats.color_entropy_after,
        out_chr.display(),
        tables::crc32(optimized.patterns()),
        out_clr.display(),
        tables::crc32(optimized.colors()),
    );

    Ok(())
}

/// `<from>..<to>`, each side decimal or 0x hex.
fn parse_exclude(value: &str) -> anyhow::Result<AddressRange> {
    let Some((from, to)) = value.split_once("..") else {
        bail!("bad --exclude (expected <from>..<to>): {value}");
    };
    Ok(AddressRange::new(parse_address(from)?, parse_address(to)?)?)
}

fn parse_address(value: &str) -> anyhow::Result<usize> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => value.parse(),
    };
    match parsed {
        Ok(address) => Ok(address),
        Err(_) => bail!("bad address in --exclude: {value}"),
    }
}

fn dump_breakdown(charset: &Charset, config: &OptimizeConfig) {
    let RangeBreakdown {
        pattern,
        color,
        merged,
    } = engine::compute_breakdown(charset, config);

    for (label, ranges) in [
        ("pattern", &pattern),
        ("color", &color),
        ("merged", &merged),
    ] {
        eprintln!("--- {label} ranges ({}) ---", ranges.len());
        for range in ranges {
            eprintln!("  {range}");
        }
        eprintln!("{}", engine::coverage_map(charset.len(), ranges));
    }
}

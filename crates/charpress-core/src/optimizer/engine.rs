// crates/charpress-core/src/optimizer/engine.rs
//
// Wires the pipeline: scan forward + backward per channel, subtract the
// exclusion, merge same-type, merge cross-type, apply to a working copy.

use crate::model::charset::Charset;
use crate::model::range::AddressRange;
use crate::optimizer::line::LineOptimizer;
use crate::optimizer::merge::{self, MergePolicy, TieBreak};
use crate::optimizer::optimization::Optimization;
use crate::optimizer::scan;
use crate::stats;

/// Full optimization settings.
///
/// Defaults mirror the reference tool: pattern channel disabled,
/// `ColorAndPattern` on the color channel, balanced merge.
#[derive(Copy, Clone, Debug)]
pub struct OptimizeConfig {
    pub pattern_optimizer: LineOptimizer,
    pub color_optimizer: LineOptimizer,
    pub policy: MergePolicy,
    pub tie_break: TieBreak,
    pub exclusion: Option<AddressRange>,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            pattern_optimizer: LineOptimizer::Null,
            color_optimizer: LineOptimizer::ColorAndPattern,
            policy: MergePolicy::Balanced,
            tie_break: TieBreak::SizeThenEntropy,
            exclusion: None,
        }
    }
}

/// Counters and entropy deltas from one optimization run.
#[derive(Clone, Debug, Default)]
pub struct OptimizeStats {
    pub pattern_ranges: usize,
    pub color_ranges: usize,
    pub ranges: usize,
    pub rewritten: usize,
    /// Rows whose rewrite recomputed to `None` at apply time and were left
    /// untouched (an internal inconsistency, never a failure).
    pub skipped: usize,
    pub pattern_entropy_before: f64,
    pub pattern_entropy_after: f64,
    pub color_entropy_before: f64,
    pub color_entropy_after: f64,
}

/// The per-stage range lists, for diagnostics and tests.
#[derive(Clone, Debug)]
pub struct RangeBreakdown {
    pub pattern: Vec<Optimization>,
    pub color: Vec<Optimization>,
    pub merged: Vec<Optimization>,
}

/// Scans both directions for one channel, subtracts the exclusion from each
/// pass, and reconciles the two lists.
fn channel_coverage(
    charset: &Charset,
    optimizer: LineOptimizer,
    config: &OptimizeConfig,
) -> Vec<Optimization> {
    let forward = apply_exclusion(
        charset,
        scan::find_forward_ranges(charset, optimizer),
        config.exclusion,
    );
    let backward = apply_exclusion(
        charset,
        scan::find_backward_ranges(charset, optimizer),
        config.exclusion,
    );
    merge::merge(charset, forward, backward, config.tie_break)
}

fn apply_exclusion(
    charset: &Charset,
    ranges: Vec<Optimization>,
    exclusion: Option<AddressRange>,
) -> Vec<Optimization> {
    let Some(exclusion) = exclusion else {
        return ranges;
    };
    ranges
        .iter()
        .flat_map(|range| range.minus(&exclusion, charset))
        .collect()
}

pub fn compute_breakdown(charset: &Charset, config: &OptimizeConfig) -> RangeBreakdown {
    let pattern = channel_coverage(charset, config.pattern_optimizer, config);
    let color = channel_coverage(charset, config.color_optimizer, config);
    let merged = merge::merge_cross(
        charset,
        config.policy,
        config.tie_break,
        pattern.clone(),
        color.clone(),
    );
    RangeBreakdown {
        pattern,
        color,
        merged,
    }
}

/// The final, disjoint, sorted range set for this configuration.
pub fn compute_ranges(charset: &Charset, config: &OptimizeConfig) -> Vec<Optimization> {
    compute_breakdown(charset, config).merged
}

/// Runs the full pipeline and applies the result to a working copy.
pub fn optimize(charset: &Charset, config: &OptimizeConfig) -> (Charset, OptimizeStats) {
    let breakdown = compute_breakdown(charset, config);

    let mut stats = OptimizeStats {
        pattern_ranges: breakdown.pattern.len(),
        color_ranges: breakdown.color.len(),
        ranges: breakdown.merged.len(),
        pattern_entropy_before: stats::entropy_bits(charset.patterns()),
        color_entropy_before: stats::entropy_bits(charset.colors()),
        ..OptimizeStats::default()
    };

    let mut optimized = charset.clone();
    for range in &breakdown.merged {
        let skipped = range.apply_to(&mut optimized);
        stats.skipped += skipped;
        stats.rewritten += range.size() - skipped;
    }

    stats.pattern_entropy_after = stats::entropy_bits(optimized.patterns());
    stats.color_entropy_after = stats::entropy_bits(optimized.colors());

    (optimized, stats)
}

/// Renders coverage as one character per row (`P`/`p` pattern ranges,
/// `C`/`c` color ranges, `_` untouched), grouped 8 to a cell.
pub fn coverage_map(len: usize, ranges: &[Optimization]) -> String {
    let mut cells = vec!['_'; len];
    for range in ranges {
        let symbol = match range.optimizer() {
            LineOptimizer::PatternAndColor => 'P',
            LineOptimizer::PatternOnly => 'p',
            LineOptimizer::ColorAndPattern => 'C',
            LineOptimizer::ColorOnly => 'c',
            LineOptimizer::Null => '?',
        };
        for cell in cells.iter_mut().take(range.to() + 1).skip(range.from()) {
            *cell = symbol;
        }
    }

    let mut out = String::with_capacity(len + len / 8 + 1);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 && i % 8 == 0 {
            out.push(' ');
        }
        out.push(*cell);
    }
    out
}

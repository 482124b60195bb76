// crates/charpress-core/src/optimizer/scan.rs
//
// Single-pass discovery of maximal rewritable runs.
//
// The running reference DRIFTS: after each successful rewrite it becomes the
// value just produced, not the run's first row. The rewritten value shares
// its target byte with the previous reference, so the byte stays constant
// down the whole chain; comparing against a fixed anchor instead would break
// that invariant.

use crate::model::charset::Charset;
use crate::optimizer::line::LineOptimizer;
use crate::optimizer::optimization::Optimization;

/// Walks addresses upward; each closed run carries the last successful
/// value as its sample.
pub fn find_forward_ranges(charset: &Charset, optimizer: LineOptimizer) -> Vec<Optimization> {
    let n = charset.len();
    let mut ranges = Vec::new();

    let mut reference = charset.get(0);
    let mut open: Option<usize> = None;
    for i in 1..n {
        let candidate = charset.get(i);
        match optimizer.optimize(candidate, reference) {
            Some(optimized) => {
                reference = optimized;
                if open.is_none() {
                    // the run starts at the anchor row above
                    open = Some(i - 1);
                }
            }
            None => {
                if let Some(from) = open.take() {
                    ranges.push(Optimization::new(charset, optimizer, reference, from, i - 1));
                }
                reference = candidate;
            }
        }
    }
    if let Some(from) = open {
        ranges.push(Optimization::new(charset, optimizer, reference, from, n - 1));
    }

    ranges.sort_by_key(|range| range.from());
    ranges
}

/// Mirror image of the forward pass: walks addresses downward, producing
/// ranges in the same `[from, to]` orientation (`from` is the lower index).
pub fn find_backward_ranges(charset: &Charset, optimizer: LineOptimizer) -> Vec<Optimization> {
    let n = charset.len();
    let mut ranges = Vec::new();

    let mut reference = charset.get(n - 1);
    let mut open: Option<usize> = None;
    for i in (0..n - 1).rev() {
        let candidate = charset.get(i);
        match optimizer.optimize(candidate, reference) {
            Some(optimized) => {
                reference = optimized;
                if open.is_none() {
                    // the run starts at the anchor row below
                    open = Some(i + 1);
                }
            }
            None => {
                if let Some(to) = open.take() {
                    ranges.push(Optimization::new(charset, optimizer, reference, i + 1, to));
                }
                reference = candidate;
            }
        }
    }
    if let Some(to) = open {
        ranges.push(Optimization::new(charset, optimizer, reference, 0, to));
    }

    ranges.sort_by_key(|range| range.from());
    ranges
}

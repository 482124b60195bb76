// crates/charpress-core/src/optimizer/optimization.rs

use std::fmt;

use crate::model::charset::Charset;
use crate::model::line::TileLine;
use crate::model::range::AddressRange;
use crate::optimizer::line::LineOptimizer;
use crate::stats;

/// A contiguous run of rows `[from, to]` that `optimizer` can rewrite
/// against `sample` so the target byte is identical across the whole run.
///
/// The entropy of the source table slice under the run is captured at
/// construction; it only ranks competing runs, it never affects
/// correctness.
#[derive(Copy, Clone, Debug)]
pub struct Optimization {
    optimizer: LineOptimizer,
    sample: TileLine,
    from: usize,
    to: usize,
    entropy: u32,
}

impl Optimization {
    /// `from <= to`, in bounds of `charset`; the scanner upholds both.
    pub fn new(
        charset: &Charset,
        optimizer: LineOptimizer,
        sample: TileLine,
        from: usize,
        to: usize,
    ) -> Self {
        let table = if optimizer.is_pattern() {
            charset.patterns()
        } else {
            charset.colors()
        };
        let entropy = stats::entropy_milli_bits(&table[from..=to]);
        Self {
            optimizer,
            sample,
            from,
            to,
            entropy,
        }
    }

    #[inline]
    pub fn optimizer(&self) -> LineOptimizer {
        self.optimizer
    }

    #[inline]
    pub fn sample(&self) -> TileLine {
        self.sample
    }

    #[inline]
    pub fn from(&self) -> usize {
        self.from
    }

    #[inline]
    pub fn to(&self) -> usize {
        self.to
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.to - self.from + 1
    }

    /// Milli-bit entropy of the source table slice under this run.
    #[inline]
    pub fn entropy(&self) -> u32 {
        self.entropy
    }

    /// Strictly before: ends before the other starts, no overlap.
    #[inline]
    pub fn is_before(&self, that: &Optimization) -> bool {
        self.to < that.from
    }

    #[inline]
    pub fn overlaps(&self, that: &Optimization) -> bool {
        self.from <= that.to && that.from <= self.to
    }

    #[inline]
    pub fn contains(&self, that: &Optimization) -> bool {
        self.from <= that.from && self.to >= that.to
    }

    /// Same concrete strategy, and the samples' target bytes are equal or
    /// exact inversions of each other.
    pub fn is_mergeable_with(&self, that: &Optimization) -> bool {
        if self.optimizer != that.optimizer {
            return false;
        }
        if self.optimizer.is_pattern() {
            return self.sample.pattern == that.sample.pattern
                || self.sample.inverted_pattern() == that.sample.pattern;
        }
        if self.optimizer.is_color() {
            return self.sample.color == that.sample.color
                || self.sample.inverted_color() == that.sample.color;
        }
        false
    }

    /// The union span, keeping this run's sample.
    pub fn merge_with(&self, that: &Optimization, charset: &Charset) -> Optimization {
        debug_assert_eq!(self.optimizer, that.optimizer);
        Optimization::new(
            charset,
            self.optimizer,
            self.sample,
            self.from.min(that.from),
            self.to.max(that.to),
        )
    }

    /// Subtracts `exclusion`: zero, one or two sub-runs carrying the same
    /// strategy and sample.
    pub fn minus(&self, exclusion: &AddressRange, charset: &Charset) -> Vec<Optimization> {
        if !exclusion.overlaps(self.from, self.to) {
            return vec![*self];
        }

        let mut parts = Vec::new();
        if exclusion.from > self.from {
            parts.push(Optimization::new(
                charset,
                self.optimizer,
                self.sample,
                self.from,
                exclusion.from - 1,
            ));
        }
        if exclusion.to < self.to {
            parts.push(Optimization::new(
                charset,
                self.optimizer,
                self.sample,
                exclusion.to + 1,
                self.to,
            ));
        }
        parts
    }

    /// Rewrites every row in the run against the sample.
    ///
    /// Returns the count of rows left untouched because the rewrite
    /// unexpectedly recomputed to `None`; original bytes are always
    /// visually safe, so this never aborts the run.
    pub fn apply_to(&self, charset: &mut Charset) -> usize {
        let mut skipped = 0;
        for address in self.from..=self.to {
            let candidate = charset.get(address);
            match self.optimizer.optimize(candidate, self.sample) {
                Some(optimized) => charset.set(address, optimized),
                None => skipped += 1,
            }
        }
        skipped
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{{{:?} {}}}@[{}..{}]",
            self.size(),
            self.optimizer,
            self.sample,
            self.from,
            self.to
        )
    }
}

// crates/charpress-core/src/optimizer/merge.rs
//
// Reconciliation of two sorted, internally non-overlapping range lists into
// one. Used twice: forward vs backward lists of one strategy, then pattern
// coverage vs color coverage.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::model::charset::Charset;
use crate::model::range::AddressRange;
use crate::optimizer::optimization::Optimization;

/// Tie-break among overlapped, non-mergeable ranges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Larger range wins; equal sizes resolved by higher entropy.
    #[default]
    SizeThenEntropy,
    /// Higher-entropy range wins; equal entropies resolved by size.
    EntropyThenSize,
}

impl TieBreak {
    fn compare(self, a: &Optimization, b: &Optimization) -> Ordering {
        match self {
            Self::SizeThenEntropy => a
                .size()
                .cmp(&b.size())
                .then(a.entropy().cmp(&b.entropy())),
            Self::EntropyThenSize => a
                .entropy()
                .cmp(&b.entropy())
                .then(a.size().cmp(&b.size())),
        }
    }
}

/// Cross-type reconciliation policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Rule-based merge with the configured tie-break.
    #[default]
    Balanced,
    /// Pattern ranges win every overlap; color ranges keep the rest.
    PrioritizePattern,
    /// Color ranges win every overlap; pattern ranges keep the rest.
    PrioritizeColor,
}

/// General two-queue merge.
///
/// While both queues hold ranges (heads already covered by the last accepted
/// output are discarded first):
/// 1. a head strictly before the other is accepted as-is;
/// 2. a head contained in the other is dropped;
/// 3. the earlier-starting head, if mergeable with the other, is widened in
///    place (successors it now covers are dropped) and the loop retries;
/// 4. otherwise the tie-break comparator picks the winner and both heads are
///    consumed; the first queue wins exact ties.
/// An emptied queue lets the other's remainder through.
pub fn merge(
    charset: &Charset,
    a: Vec<Optimization>,
    b: Vec<Optimization>,
    tie_break: TieBreak,
) -> Vec<Optimization> {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    let mut queue_a: VecDeque<Optimization> = a.into();
    let mut queue_b: VecDeque<Optimization> = b.into();
    let mut merged: Vec<Optimization> = Vec::new();

    while !queue_a.is_empty() || !queue_b.is_empty() {
        discard_covered(&mut queue_a, merged.last());
        discard_covered(&mut queue_b, merged.last());

        if queue_a.is_empty() {
            merged.extend(queue_b.drain(..));
            break;
        }
        if queue_b.is_empty() {
            merged.extend(queue_a.drain(..));
            break;
        }

        let (Some(&x), Some(&y)) = (queue_a.front(), queue_b.front()) else {
            break;
        };

        // Non-overlapped: keep whichever comes first.
        if x.is_before(&y) {
            queue_a.pop_front();
            merged.push(x);
            continue;
        }
        if y.is_before(&x) {
            queue_b.pop_front();
            merged.push(y);
            continue;
        }

        // Overlapped, contained: drop the contained one.
        if x.contains(&y) {
            queue_b.pop_front();
            continue;
        }
        if y.contains(&x) {
            queue_a.pop_front();
            continue;
        }

        // Overlapped, mergeable: widen the earlier head in place and retry.
        if x.from() <= y.from() && x.is_mergeable_with(&y) {
            widen_head(&mut queue_a, &y, charset);
            continue;
        }
        if y.from() <= x.from() && y.is_mergeable_with(&x) {
            widen_head(&mut queue_b, &x, charset);
            continue;
        }

        // Overlapped, non-mergeable: the comparator decides.
        queue_a.pop_front();
        queue_b.pop_front();
        if tie_break.compare(&x, &y) != Ordering::Less {
            merged.push(x);
        } else {
            merged.push(y);
        }
    }

    normalize(charset, merged)
}

/// Replaces the queue head with its merge against `other`, dropping any
/// successors the widened range now covers.
fn widen_head(queue: &mut VecDeque<Optimization>, other: &Optimization, charset: &Charset) {
    if let Some(head) = queue.pop_front() {
        let widened = head.merge_with(other, charset);
        while matches!(queue.front(), Some(next) if widened.contains(next)) {
            queue.pop_front();
        }
        queue.push_front(widened);
    }
}

/// Drops queue heads that end inside the last accepted range.
fn discard_covered(queue: &mut VecDeque<Optimization>, last: Option<&Optimization>) {
    let Some(last) = last else {
        return;
    };
    while matches!(queue.front(), Some(head) if head.to() < last.to()) {
        queue.pop_front();
    }
}

/// Priority merge: the prioritized list wins every overlap.
///
/// The other list is subtracted against the winning coverage, so a fully
/// covered loser vanishes and a partially covered one keeps its remainder;
/// the prioritized ranges then join untouched.
pub fn merge_prioritized(
    charset: &Charset,
    prioritized: Vec<Optimization>,
    others: Vec<Optimization>,
) -> Vec<Optimization> {
    if prioritized.is_empty() {
        return others;
    }
    if others.is_empty() {
        return prioritized;
    }

    let mut merged: Vec<Optimization> = Vec::new();
    for range in others {
        let mut pieces = vec![range];
        for winner in &prioritized {
            let span = AddressRange {
                from: winner.from(),
                to: winner.to(),
            };
            pieces = pieces
                .iter()
                .flat_map(|piece| piece.minus(&span, charset))
                .collect();
        }
        merged.extend(pieces);
    }
    merged.extend(prioritized);

    normalize(charset, merged)
}

/// Cross-type dispatch over the configured policy.
pub fn merge_cross(
    charset: &Charset,
    policy: MergePolicy,
    tie_break: TieBreak,
    pattern_ranges: Vec<Optimization>,
    color_ranges: Vec<Optimization>,
) -> Vec<Optimization> {
    match policy {
        MergePolicy::Balanced => merge(charset, pattern_ranges, color_ranges, tie_break),
        MergePolicy::PrioritizePattern => merge_prioritized(charset, pattern_ranges, color_ranges),
        MergePolicy::PrioritizeColor => merge_prioritized(charset, color_ranges, pattern_ranges),
    }
}

/// Sorts by start and clamps away residual overlap, so the output is
/// pairwise disjoint. Clamping keeps a range valid: application re-checks
/// every row against the sample.
fn normalize(charset: &Charset, mut list: Vec<Optimization>) -> Vec<Optimization> {
    list.sort_by_key(|range| range.from());

    let mut out: Vec<Optimization> = Vec::with_capacity(list.len());
    for range in list {
        let last_to = out.last().map(|last| last.to());
        match last_to {
            Some(to) if range.to() <= to => {}
            Some(to) if range.from() <= to => {
                out.push(Optimization::new(
                    charset,
                    range.optimizer(),
                    range.sample(),
                    to + 1,
                    range.to(),
                ));
            }
            _ => out.push(range),
        }
    }
    out
}

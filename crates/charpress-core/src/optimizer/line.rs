// crates/charpress-core/src/optimizer/line.rs

use crate::model::line::TileLine;

/// A per-row rewrite strategy.
///
/// `optimize(candidate, reference)` returns a line that renders the same
/// pixels as `candidate` but whose target byte (pattern byte for the
/// pattern variants, color byte for the color variants) equals the
/// reference's, or `None` when no equivalent encoding can reach it.
/// `None` is a signal, not a failure: it is how a scan run ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineOptimizer {
    /// Never rewrites; disables a channel.
    Null,
    /// Rewrites the pattern byte, keeping the color byte.
    PatternOnly,
    /// Rewrites the pattern byte, also exploiting inversion.
    PatternAndColor,
    /// Rewrites the color byte, keeping the pattern byte.
    ColorOnly,
    /// Rewrites the color byte, also exploiting inversion and the pattern
    /// byte's freedom.
    ColorAndPattern,
}

impl LineOptimizer {
    /// Whether this optimizer targets the pattern table.
    #[inline]
    pub fn is_pattern(self) -> bool {
        matches!(self, Self::PatternOnly | Self::PatternAndColor)
    }

    /// Whether this optimizer targets the color table.
    #[inline]
    pub fn is_color(self) -> bool {
        matches!(self, Self::ColorOnly | Self::ColorAndPattern)
    }

    pub fn optimize(self, candidate: TileLine, reference: TileLine) -> Option<TileLine> {
        match self {
            Self::Null => None,
            Self::PatternOnly => pattern_only(candidate, reference),
            Self::PatternAndColor => pattern_and_color(candidate, reference),
            Self::ColorOnly => color_only(candidate, reference),
            Self::ColorAndPattern => color_and_pattern(candidate, reference),
        }
    }
}

fn pattern_only(candidate: TileLine, reference: TileLine) -> Option<TileLine> {
    // Already optimized
    if candidate.pattern == reference.pattern {
        return Some(candidate);
    }

    // Unused pattern (both nibbles name the same color)
    if candidate.fg() == candidate.bg() {
        return Some(candidate.with_pattern_of(reference));
    }

    None
}

fn pattern_and_color(candidate: TileLine, reference: TileLine) -> Option<TileLine> {
    // Already optimized
    if candidate.pattern == reference.pattern {
        return Some(candidate);
    }

    // Inverted pattern matches the reference
    if candidate.inverted_pattern() == reference.pattern {
        return Some(candidate.inverted());
    }

    // Single color: any pattern renders the same pixels once both nibbles
    // name that color
    if let Some(color) = candidate.single_color() {
        return Some(candidate.with_pattern_of(reference).with_single_color(color));
    }

    None
}

fn color_only(candidate: TileLine, reference: TileLine) -> Option<TileLine> {
    // Already optimized
    if candidate.color == reference.color {
        return Some(candidate);
    }

    // All FG: the background nibble is unused
    if candidate.pattern == TileLine::PATTERN_FG && candidate.fg() == reference.fg() {
        return Some(candidate.with_color_of(reference));
    }

    // All BG: the foreground nibble is unused
    if candidate.pattern == TileLine::PATTERN_BG && candidate.bg() == reference.bg() {
        return Some(candidate.with_color_of(reference));
    }

    None
}

fn color_and_pattern(candidate: TileLine, reference: TileLine) -> Option<TileLine> {
    // Already optimized
    if candidate.color == reference.color {
        return Some(candidate);
    }

    // All FG: reachable if the rendered color matches either reference nibble
    if candidate.pattern == TileLine::PATTERN_FG {
        return if candidate.fg() == reference.fg() {
            Some(candidate.with_color_of(reference))
        } else if candidate.fg() == reference.bg() {
            Some(candidate.inverted().with_color_of(reference))
        } else {
            None
        };
    }

    // All BG: mirror of the above
    if candidate.pattern == TileLine::PATTERN_BG {
        return if candidate.bg() == reference.fg() {
            Some(candidate.inverted().with_color_of(reference))
        } else if candidate.bg() == reference.bg() {
            Some(candidate.with_color_of(reference))
        } else {
            None
        };
    }

    // Unused pattern: re-encode as solid FG or solid BG on the matching side
    if candidate.fg() == candidate.bg() {
        return if candidate.fg() == reference.fg() {
            Some(TileLine::new(TileLine::PATTERN_FG, reference.color))
        } else if candidate.fg() == reference.bg() {
            Some(TileLine::new(TileLine::PATTERN_BG, reference.color))
        } else {
            None
        };
    }

    // Two colors: only the exact inversion can reach the reference color
    if candidate.inverted_color() == reference.color {
        return Some(candidate.inverted());
    }

    None
}

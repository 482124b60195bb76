// crates/charpress-core/tests/optimize_end_to_end.rs

use charpress_core::optimizer::engine::compute_ranges;
use charpress_core::{Charset, LineOptimizer, MergePolicy, OptimizeConfig};

fn lcg_next(x: &mut u64) -> u64 {
    // deterministic, not crypto
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

/// A charset drawn from a small palette of patterns and color nibbles, so
/// that rewritable coincidences actually occur.
fn synthetic_charset(rows: usize, seed: u64) -> Charset {
    const PATTERNS: [u8; 6] = [0x00, 0xFF, 0xA5, 0x5A, 0x0F, 0x33];
    const NIBBLES: [u8; 3] = [1, 2, 7];

    let mut x = seed;
    let mut patterns = Vec::with_capacity(rows);
    let mut colors = Vec::with_capacity(rows);
    for _ in 0..rows {
        let r = lcg_next(&mut x);
        patterns.push(PATTERNS[(r >> 8) as usize % PATTERNS.len()]);
        let fg = NIBBLES[(r >> 16) as usize % NIBBLES.len()];
        let bg = NIBBLES[(r >> 24) as usize % NIBBLES.len()];
        colors.push((fg << 4) | bg);
    }
    Charset::new(patterns, colors).expect("valid tables")
}

fn all_configs() -> Vec<OptimizeConfig> {
    let pattern_optimizers = [
        LineOptimizer::Null,
        LineOptimizer::PatternOnly,
        LineOptimizer::PatternAndColor,
    ];
    let color_optimizers = [
        LineOptimizer::Null,
        LineOptimizer::ColorOnly,
        LineOptimizer::ColorAndPattern,
    ];
    let policies = [
        MergePolicy::Balanced,
        MergePolicy::PrioritizePattern,
        MergePolicy::PrioritizeColor,
    ];

    let mut configs = Vec::new();
    for pattern_optimizer in pattern_optimizers {
        for color_optimizer in color_optimizers {
            for policy in policies {
                configs.push(OptimizeConfig {
                    pattern_optimizer,
                    color_optimizer,
                    policy,
                    ..OptimizeConfig::default()
                });
            }
        }
    }
    configs
}

#[test]
fn every_configuration_preserves_the_rendered_pixels() {
    let cs = synthetic_charset(384, 0x1234_5678_9abc_def0);

    for config in all_configs() {
        let (optimized, _stats) = charpress_core::optimize(&cs, &config);
        assert_eq!(optimized.len(), cs.len());
        for address in 0..cs.len() {
            assert!(
                cs.get(address).is_equivalent_to(optimized.get(address)),
                "{config:?} @{address}: expected {}, found {}",
                cs.get(address),
                optimized.get(address)
            );
        }
    }
}

#[test]
fn final_ranges_are_sorted_disjoint_and_in_bounds() {
    let cs = synthetic_charset(384, 0x0bad_cafe_dead_beef);

    for config in all_configs() {
        let ranges = compute_ranges(&cs, &config);
        for window in ranges.windows(2) {
            assert!(
                window[0].to() < window[1].from(),
                "{config:?}: [{},{}] overlaps [{},{}]",
                window[0].from(),
                window[0].to(),
                window[1].from(),
                window[1].to()
            );
        }
        for range in &ranges {
            assert!(range.from() <= range.to());
            assert!(range.to() < cs.len());
        }
    }
}

#[test]
fn inversion_aware_channels_share_the_target_byte_over_every_range() {
    let cs = synthetic_charset(384, 0x5eed_5eed_5eed_5eed);

    for policy in [
        MergePolicy::Balanced,
        MergePolicy::PrioritizePattern,
        MergePolicy::PrioritizeColor,
    ] {
        let config = OptimizeConfig {
            pattern_optimizer: LineOptimizer::PatternAndColor,
            color_optimizer: LineOptimizer::ColorAndPattern,
            policy,
            ..OptimizeConfig::default()
        };

        let ranges = compute_ranges(&cs, &config);
        let (optimized, stats) = charpress_core::optimize(&cs, &config);
        assert_eq!(stats.skipped, 0, "{policy:?}: unexpected recompute misses");

        for range in &ranges {
            for address in range.from()..=range.to() {
                if range.optimizer().is_pattern() {
                    assert_eq!(
                        optimized.patterns()[address],
                        range.sample().pattern,
                        "{policy:?}: pattern byte differs @{address} in {range}"
                    );
                } else {
                    assert_eq!(
                        optimized.colors()[address],
                        range.sample().color,
                        "{policy:?}: color byte differs @{address} in {range}"
                    );
                }
            }
        }
    }
}

#[test]
fn optimizing_twice_reaches_a_fixed_point() {
    let patterns = [0xFFu8; 32];
    let colors: Vec<u8> = (0..32u8).map(|i| 0x70 | (i & 0x0F)).collect();
    let cs = Charset::new(patterns.to_vec(), colors).expect("valid tables");

    let config = OptimizeConfig::default();
    let (first, _) = charpress_core::optimize(&cs, &config);
    let (second, _) = charpress_core::optimize(&first, &config);

    assert_eq!(first.patterns(), second.patterns());
    assert_eq!(first.colors(), second.colors());
}

#[test]
fn scrambled_patterns_on_solid_rows_compress_better_after_optimization() {
    // every row renders a solid color 7, but the unused pattern bytes are
    // noise; the pattern channel collapses them to one shared value
    let mut x = 0x0123_4567_89ab_cdefu64;
    let patterns: Vec<u8> = (0..256).map(|_| (lcg_next(&mut x) >> 24) as u8).collect();
    let colors = vec![0x77u8; 256];
    let cs = Charset::new(patterns, colors).expect("valid tables");

    let config = OptimizeConfig {
        pattern_optimizer: LineOptimizer::PatternAndColor,
        color_optimizer: LineOptimizer::Null,
        ..OptimizeConfig::default()
    };
    let (optimized, _stats) = charpress_core::optimize(&cs, &config);

    for address in 0..cs.len() {
        assert!(cs.get(address).is_equivalent_to(optimized.get(address)));
    }

    let before = zstd_size(cs.patterns());
    let after = zstd_size(optimized.patterns());
    assert!(
        after < before,
        "expected the optimized table to compress better: {before} -> {after}"
    );
}

fn zstd_size(bytes: &[u8]) -> usize {
    zstd::stream::encode_all(std::io::Cursor::new(bytes), 19)
        .expect("zstd encode")
        .len()
}

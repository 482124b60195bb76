// crates/charpress-core/tests/exclusion.rs

use charpress_core::{
    AddressRange, Charset, LineOptimizer, OptimizeConfig, Optimization, TileLine,
};

fn charset(patterns: &[u8], colors: &[u8]) -> Charset {
    Charset::new(patterns.to_vec(), colors.to_vec()).expect("valid tables")
}

fn sample_range(cs: &Charset, from: usize, to: usize) -> Optimization {
    Optimization::new(
        cs,
        LineOptimizer::ColorOnly,
        TileLine::new(0x00, 0x12),
        from,
        to,
    )
}

fn spans(ranges: &[Optimization]) -> Vec<(usize, usize)> {
    ranges.iter().map(|r| (r.from(), r.to())).collect()
}

#[test]
fn minus_without_overlap_is_identity() {
    let cs = charset(&[0u8; 12], &[0u8; 12]);
    let range = sample_range(&cs, 2, 8);
    let exclusion = AddressRange::new(9, 11).expect("valid range");
    assert_eq!(spans(&range.minus(&exclusion, &cs)), vec![(2, 8)]);
}

#[test]
fn minus_splits_around_an_interior_exclusion() {
    let cs = charset(&[0u8; 12], &[0u8; 12]);
    let range = sample_range(&cs, 2, 8);
    let exclusion = AddressRange::new(4, 6).expect("valid range");
    let parts = range.minus(&exclusion, &cs);
    assert_eq!(spans(&parts), vec![(2, 3), (7, 8)]);
    for part in &parts {
        assert_eq!(part.optimizer(), range.optimizer());
        assert_eq!(part.sample(), range.sample());
    }
}

#[test]
fn minus_trims_either_edge() {
    let cs = charset(&[0u8; 12], &[0u8; 12]);
    let range = sample_range(&cs, 2, 8);
    let head = AddressRange::new(0, 4).expect("valid range");
    assert_eq!(spans(&range.minus(&head, &cs)), vec![(5, 8)]);
    let tail = AddressRange::new(6, 11).expect("valid range");
    assert_eq!(spans(&range.minus(&tail, &cs)), vec![(2, 5)]);
}

#[test]
fn minus_of_a_covering_exclusion_is_empty() {
    let cs = charset(&[0u8; 12], &[0u8; 12]);
    let range = sample_range(&cs, 2, 8);
    let exclusion = AddressRange::new(0, 11).expect("valid range");
    assert!(range.minus(&exclusion, &cs).is_empty());
}

#[test]
fn reversed_address_range_is_rejected() {
    assert!(AddressRange::new(5, 3).is_err());
    assert!(AddressRange::new(3, 3).is_ok());
}

#[test]
fn excluded_addresses_keep_their_bytes() {
    // 16 all-foreground rows, color 7 with a varying unused background
    // nibble; the color channel rewrites every row to the shared byte
    // except the protected ones
    let patterns = [0xFFu8; 16];
    let colors: Vec<u8> = (0..16u8).map(|i| 0x70 | i).collect();
    let cs = charset(&patterns, &colors);

    let config = OptimizeConfig {
        exclusion: Some(AddressRange::new(3, 5).expect("valid range")),
        ..OptimizeConfig::default()
    };

    let ranges = charpress_core::optimizer::engine::compute_ranges(&cs, &config);
    for range in &ranges {
        assert!(
            range.to() < 3 || range.from() > 5,
            "range [{},{}] intersects the exclusion",
            range.from(),
            range.to()
        );
    }

    let (optimized, _stats) = charpress_core::optimize(&cs, &config);
    for address in 0..16 {
        let expected = if (3..=5).contains(&address) {
            0x70 | address as u8
        } else {
            0x70
        };
        assert_eq!(optimized.colors()[address], expected, "address {address}");
        assert_eq!(optimized.patterns()[address], 0xFF);
    }
}

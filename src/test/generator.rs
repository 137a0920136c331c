use crate::proto::{ACK, InputClass, NOISE, Packet, SYN};
use crate::tb::Generator;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

#[test]
fn same_seed_produces_same_sequence() {
    let a: Vec<Packet> = Generator::seeded(7, 0.2).take(200).collect();
    let b: Vec<Packet> = Generator::seeded(7, 0.2).take(200).collect();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    let a: Vec<Packet> = Generator::seeded(1, 0.2).take(64).collect();
    let b: Vec<Packet> = Generator::seeded(2, 0.2).take(64).collect();
    assert_ne!(a, b);
}

#[test]
fn injected_rng_matches_seeded_constructor() {
    let mut a = Generator::new(StdRng::seed_from_u64(99), 0.5);
    let mut b = Generator::seeded(99, 0.5);
    for _ in 0..50 {
        assert_eq!(a.next_packet(), b.next_packet());
    }
    assert_eq!(a.produced(), 50);
}

#[test]
fn symbols_stay_within_constrained_set_and_cover_all_classes() {
    let mut by_class: HashMap<InputClass, usize> = HashMap::new();
    for pkt in Generator::seeded(3, 0.0).take(2_000) {
        assert!(
            matches!(pkt.symbol(), SYN | ACK | NOISE | b'X' | b'Y'),
            "unexpected symbol {}",
            pkt.symbol()
        );
        assert!(pkt.has_valid_checksum());
        *by_class.entry(pkt.class()).or_default() += 1;
    }
    // 每个 flag 的概率是 1/4
    for class in InputClass::ALL {
        let n = by_class.get(&class).copied().unwrap_or(0);
        assert!((350..=650).contains(&n), "{class:?} drawn {n} times");
    }
}

#[test]
fn misc_draws_both_x_and_y() {
    let syms: Vec<u8> = Generator::seeded(11, 0.0)
        .take(500)
        .map(|p| p.symbol())
        .collect();
    assert!(syms.contains(&b'X'));
    assert!(syms.contains(&b'Y'));
}

#[test]
fn error_rate_controls_corruption() {
    assert!(Generator::seeded(5, 0.0).take(500).all(|p| p.has_valid_checksum()));
    assert!(
        Generator::seeded(5, 1.0)
            .take(500)
            .all(|p| p.checksum() == p.symbol() ^ 0xAA)
    );

    let corrupted = Generator::seeded(5, 0.2)
        .take(5_000)
        .filter(|p| !p.has_valid_checksum())
        .count();
    assert!((800..=1_200).contains(&corrupted), "corrupted={corrupted}");
}

#[test]
fn out_of_range_error_rate_is_clamped() {
    assert!(Generator::seeded(5, -3.0).take(100).all(|p| p.has_valid_checksum()));
    assert!(Generator::seeded(5, 7.0).take(100).all(|p| !p.has_valid_checksum()));
    assert!(Generator::seeded(5, f64::NAN).take(100).all(|p| p.has_valid_checksum()));
}

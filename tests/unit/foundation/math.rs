use super::*;

#[test]
fn seeded_rng_replays_sequence() {
    let mut a = SeededRng::new(54);
    let mut b = SeededRng::new(54);
    for _ in 0..64 {
        assert_eq!(a.next_u64(), b.next_u64());
    }

    let mut c = SeededRng::new(55);
    let mut d = SeededRng::new(54);
    assert_ne!(c.next_u64(), d.next_u64());
}

#[test]
fn next_below_stays_in_range() {
    let mut rng = SeededRng::new(1);
    for bound in [1u32, 2, 3, 255, 1000] {
        for _ in 0..256 {
            assert!(rng.next_below(bound) < bound);
        }
    }
    assert_eq!(rng.next_below(0), 0);
}

#[test]
fn mix_channel_truncates() {
    assert_eq!(mix_channel(255, 0, 0.7), 178);
    assert_eq!(mix_channel(0, 255, 0.1), 229);
    assert_eq!(mix_channel(100, 100, 0.5), 100);
}

#[test]
fn unpremul_inverts_opaque_and_handles_zero_alpha() {
    assert_eq!(unpremul_u8(77, 255), 77);
    assert_eq!(unpremul_u8(64, 128), 128);
    assert_eq!(unpremul_u8(10, 0), 0);
}

use omt_rtree::Envelope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SEED_1: u64 = 0x5EED_0001;
pub const SEED_2: u64 = 0x5EED_0002;

/// `count` small, disjoint-ish envelopes inside `[0,1]²`, deterministic for
/// a given seed.
pub fn random_envelopes(count: usize, seed: u64) -> Vec<(Envelope, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count as u32)
        .map(|id| {
            let x: f64 = rng.random_range(0.0..0.99);
            let y: f64 = rng.random_range(0.0..0.99);
            let envelope = Envelope::new(x, y, x + 0.01, y + 0.01).unwrap();
            (envelope, id)
        })
        .collect()
}

/// Linear-scan reference for `search`, to compare the tree's answer
/// against.
pub fn brute_force_search(entries: &[(Envelope, u32)], window: &Envelope) -> Vec<u32> {
    entries
        .iter()
        .filter(|(envelope, _)| envelope.intersects(window))
        .map(|(_, id)| *id)
        .collect()
}

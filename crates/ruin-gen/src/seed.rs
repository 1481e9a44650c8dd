//! Per-map seed derivation.
//!
//! Every map seed is a pure function of the world seed, the district
//! coordinate, and the layer. The mix is a bijection on `u64`, so for a fixed
//! world seed no two cells of a grid up to [`MAX_WORLD_SIZE`] share a seed,
//! and for a fixed cell no two world seeds do.

use ruin_core::{Layer, Point};

/// Largest supported grid side.
pub const MAX_WORLD_SIZE: u32 = 32;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const SEWERS_SALT: u64 = 0x5EE0_5EE0_5EE0_5EE0;
const SUBWAY_SALT: u64 = 0x5B3A_7A15_0000_0001;
const UNDERGROUND_SALT: u64 = 0x0DEE_9D0E_E9D0_0EE9;
const COSMETIC_SALT: u64 = 0xC05E_71C5_C05E_71C5;

/// SplitMix64 finalizer.
pub fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of the district at `pos`.
pub fn district_seed(world_seed: u64, pos: Point) -> u64 {
    let index = pos.y as u64 * u64::from(MAX_WORLD_SIZE) + pos.x as u64;
    mix(world_seed.wrapping_add((index + 1).wrapping_mul(GOLDEN_GAMMA)))
}

/// Seed of one layer of a district. The street layer uses the district seed.
pub fn layer_seed(district_seed: u64, layer: Layer) -> u64 {
    match layer {
        Layer::Entry => district_seed,
        Layer::Sewers => mix(district_seed ^ SEWERS_SALT),
        Layer::Subway => mix(district_seed ^ SUBWAY_SALT),
        Layer::Underground => mix(district_seed ^ UNDERGROUND_SALT),
    }
}

/// Seed of the generator used for cosmetic, non-structural choices.
pub fn cosmetic_seed(world_seed: u64) -> u64 {
    mix(world_seed ^ COSMETIC_SALT)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn no_collisions_across_full_grid() {
        let max = MAX_WORLD_SIZE as i32;
        let seeds: HashSet<u64> = (0..max)
            .flat_map(|y| (0..max).map(move |x| district_seed(42, Point::new(x, y))))
            .collect();
        assert_eq!(seeds.len(), (max * max) as usize);
    }

    #[test]
    fn layers_get_distinct_seeds() {
        let d = district_seed(42, Point::new(1, 1));
        let layers = [Layer::Entry, Layer::Sewers, Layer::Subway, Layer::Underground];
        let seeds: HashSet<u64> = layers.iter().map(|l| layer_seed(d, *l)).collect();
        assert_eq!(seeds.len(), 4);
        assert_eq!(layer_seed(d, Layer::Entry), d);
    }

    proptest! {
        #[test]
        fn derivation_is_pure(seed in any::<u64>(), x in 0i32..32, y in 0i32..32) {
            let p = Point::new(x, y);
            prop_assert_eq!(district_seed(seed, p), district_seed(seed, p));
        }

        #[test]
        fn world_seed_changes_every_cell(a in any::<u64>(), b in any::<u64>(), x in 0i32..32, y in 0i32..32) {
            prop_assume!(a != b);
            let p = Point::new(x, y);
            prop_assert_ne!(district_seed(a, p), district_seed(b, p));
        }

        #[test]
        fn cells_never_collide(seed in any::<u64>(), x1 in 0i32..32, y1 in 0i32..32, x2 in 0i32..32, y2 in 0i32..32) {
            prop_assume!((x1, y1) != (x2, y2));
            prop_assert_ne!(
                district_seed(seed, Point::new(x1, y1)),
                district_seed(seed, Point::new(x2, y2))
            );
        }
    }
}

//! Property tests for target placement

use click_order::sim::{PlayArea, generate};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

proptest! {
    #[test]
    fn targets_stay_in_bounds(
        seed in any::<u64>(),
        count in 1usize..200,
        width in 25.0f32..600.0,
        height in 25.0f32..600.0,
    ) {
        let area = PlayArea::new(width, height, 25.0);
        let layout = generate(count, &area, &mut Pcg32::seed_from_u64(seed));
        prop_assert_eq!(layout.targets.len(), count);
        for target in &layout.targets {
            prop_assert!(area.contains(target));
        }
    }

    #[test]
    fn overlaps_only_for_forced_targets(
        seed in any::<u64>(),
        count in 1usize..150,
        width in 50.0f32..400.0,
        height in 50.0f32..300.0,
    ) {
        let area = PlayArea::new(width, height, 25.0);
        let layout = generate(count, &area, &mut Pcg32::seed_from_u64(seed));
        for (i, a) in layout.targets.iter().enumerate() {
            for b in &layout.targets[i + 1..] {
                if a.chebyshev_distance(b) < area.target_size {
                    // The later target is the one that gave up
                    prop_assert!(layout.forced.contains(&b.index));
                }
            }
        }
    }

    #[test]
    fn light_load_never_forces(seed in any::<u64>(), count in 1usize..=20) {
        let area = PlayArea::new(400.0, 300.0, 25.0);
        let layout = generate(count, &area, &mut Pcg32::seed_from_u64(seed));
        prop_assert!(layout.forced.is_empty());
    }

    #[test]
    fn indices_follow_sequence(seed in any::<u64>(), count in 0usize..100) {
        let area = PlayArea::new(400.0, 300.0, 25.0);
        let layout = generate(count, &area, &mut Pcg32::seed_from_u64(seed));
        for (i, target) in layout.targets.iter().enumerate() {
            prop_assert_eq!(target.index, i);
            prop_assert_eq!(target.countdown(), None);
        }
    }
}

use dimension_shooter_system_maze::{generate, grid_size, unreachable_open_cells, Cell};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_open_cell_reaches_the_center(seed in any::<u64>(), level in 1u32..=30) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generate(level, &mut rng);

        prop_assert_eq!(grid.size(), grid_size(level));
        prop_assert_eq!(grid.cell(grid.center()), Some(Cell::Open));
        let stranded = unreachable_open_cells(&grid);
        prop_assert!(
            stranded.is_empty(),
            "level {} seed {} left {:?} unreachable",
            level,
            seed,
            stranded
        );
    }

    #[test]
    fn same_seed_yields_same_grid(seed in any::<u64>(), level in 1u32..=30) {
        let first = generate(level, &mut ChaCha8Rng::seed_from_u64(seed));
        let second = generate(level, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(first, second);
    }
}

#[test]
fn carve_opens_every_cell_it_visits() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for level in [2, 5, 9, 20] {
        let grid = generate(level, &mut rng);
        let total = (grid.size() * grid.size()) as usize;
        assert_eq!(
            grid.open_count(),
            total,
            "depth-first carve visits the whole grid at level {level}"
        );
    }
}

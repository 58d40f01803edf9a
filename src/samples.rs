use crate::board::Board;

// Named boards with known volumes, shared by the demo runner and the
// regression tests below.
pub struct SampleBoard {
    pub name: &'static str,
    pub heights: Vec<Vec<f64>>,
    pub expected_volume: f64,
}

impl SampleBoard {
    pub fn board(&self) -> Board {
        Board::from_heights(&self.heights).unwrap()
    }
}

pub fn sample_boards() -> Vec<SampleBoard> {
    vec![
        SampleBoard {
            name: "mixed pools",
            heights: vec![
                vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
                vec![5.0, 0.0, 0.0, 0.0, 8.0, 8.0, 8.0, 5.0],
                vec![5.0, 0.0, 0.0, 0.0, 8.0, 4.0, 6.0, 5.0],
                vec![5.0, 0.0, 0.0, 0.0, 8.0, 8.0, 8.0, 5.0],
                vec![5.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 5.0],
                vec![5.0, 0.0, 0.0, 0.0, 2.0, 0.0, 1.0, 5.0],
                vec![9.0, 1.0, 2.0, 3.0, 2.0, 0.0, 0.0, 5.0],
                vec![9.0, 9.0, 5.0, 5.0, 5.0, 1.0, 5.0, 5.0],
            ],
            expected_volume: 38.0,
        },
        SampleBoard {
            name: "drained slope",
            heights: vec![
                vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0, 8.0, 8.0, 5.0],
                vec![5.0, 2.0, 2.0, 2.0, 8.0, 6.0, 6.0, 5.0],
                vec![5.0, 2.0, 2.0, 2.0, 8.0, 8.0, 8.0, 5.0],
                vec![5.0, 3.0, 2.0, 2.0, 2.0, 2.0, 2.0, 5.0],
                vec![5.0, 3.0, 3.0, 2.0, 2.0, 1.0, 2.0, 5.0],
                vec![9.0, 3.0, 3.0, 3.0, 2.0, 1.0, 2.0, 5.0],
                vec![9.0, 9.0, 5.0, 5.0, 5.0, 1.0, 5.0, 5.0],
            ],
            expected_volume: 0.0,
        },
        SampleBoard {
            name: "basin",
            heights: vec![
                vec![9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
            ],
            expected_volume: 324.0,
        },
        SampleBoard {
            name: "basin hole",
            heights: vec![
                vec![9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
            ],
            expected_volume: 0.0,
        },
        SampleBoard {
            name: "basin two holes",
            heights: vec![
                vec![9.0, 9.0, 9.0, 1.0, 9.0, 9.0, 9.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
            ],
            expected_volume: 0.0,
        },
        SampleBoard {
            name: "basin walled half",
            heights: vec![
                vec![9.0, 9.0, 9.0, 1.0, 9.0, 9.0, 9.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0],
                vec![9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
            ],
            expected_volume: 12.0,
        },
        SampleBoard {
            name: "pyramid",
            heights: vec![
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            expected_volume: 0.0,
        },
        SampleBoard {
            name: "pyramid lines",
            heights: vec![
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 2.0, 2.0, 0.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
                vec![0.0, 1.0, 0.0, 2.0, 2.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            expected_volume: 4.0,
        },
        SampleBoard {
            name: "tiered pools",
            heights: vec![
                vec![9.0, 9.0, 9.0, 9.0, 7.0, 7.0, 7.0, 7.0],
                vec![9.0, 0.0, 0.0, 9.0, 7.0, 0.0, 0.0, 7.0],
                vec![9.0, 0.0, 0.0, 9.0, 7.0, 0.0, 0.0, 7.0],
                vec![9.0, 9.0, 9.0, 9.0, 7.0, 7.0, 7.0, 7.0],
                vec![3.0, 3.0, 3.0, 3.0, 5.0, 5.0, 5.0, 5.0],
                vec![3.0, 0.0, 0.0, 3.0, 5.0, 0.0, 0.0, 5.0],
                vec![3.0, 0.0, 0.0, 3.0, 5.0, 0.0, 0.0, 5.0],
                vec![3.0, 3.0, 3.0, 3.0, 5.0, 5.0, 5.0, 5.0],
            ],
            expected_volume: 96.0,
        },
        SampleBoard {
            name: "waterfall",
            heights: vec![
                vec![9.0, 9.0, 9.0, 9.0, 7.0, 7.0, 7.0, 7.0],
                vec![9.0, 0.0, 0.0, 8.0, 7.0, 0.0, 0.0, 7.0],
                vec![9.0, 0.0, 0.0, 8.0, 7.0, 0.0, 0.0, 7.0],
                vec![9.0, 9.0, 9.0, 9.0, 7.0, 6.0, 6.0, 7.0],
                vec![3.0, 3.0, 3.0, 3.0, 5.0, 5.0, 5.0, 5.0],
                vec![3.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0],
                vec![3.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0],
                vec![3.0, 2.0, 2.0, 3.0, 5.0, 5.0, 5.0, 5.0],
            ],
            expected_volume: 80.0,
        },
        SampleBoard {
            name: "smile",
            heights: vec![
                vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
                vec![1.0, 0.0, 2.0, 2.0, 2.0, 2.0, 0.0, 1.0],
                vec![1.0, 2.0, 0.0, 3.0, 3.0, 0.0, 2.0, 1.0],
                vec![1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
                vec![1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
                vec![1.0, 0.0, 3.0, 3.0, 3.0, 3.0, 0.0, 1.0],
                vec![1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0],
                vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            ],
            expected_volume: 12.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::droplet_flood::DropletFlood;
    use crate::pool_level::PoolLevel;
    use crate::sim::{Flood, Level, SimEngine};

    fn volume_of(board: &Board) -> f64 {
        board
            .cells_iter()
            .map(|cell| cell.water_level() * cell.width() * cell.width())
            .sum()
    }

    #[test]
    fn test_sample_battery_volumes() {
        for sample in sample_boards() {
            let mut engine = SimEngine::new(sample.board(), DropletFlood::new(), PoolLevel::new());
            engine.flood();
            engine.level_water();
            let volume = engine.water_volume();
            assert!(
                (volume - sample.expected_volume).abs() < 1e-9,
                "{}: expected volume {}, got {}",
                sample.name,
                sample.expected_volume,
                volume
            );
        }
    }

    #[test]
    fn test_edges_dry_and_levels_non_negative_across_battery() {
        for sample in sample_boards() {
            let mut engine = SimEngine::new(sample.board(), DropletFlood::new(), PoolLevel::new());
            engine.flood();
            engine.level_water();
            for cell in engine.board().cells_iter() {
                assert!(cell.water_level() >= 0.0, "{}", sample.name);
                if cell.is_edge() {
                    assert_eq!(
                        cell.water_level(),
                        0.0,
                        "{}: edge ({}, {}) retained water",
                        sample.name,
                        cell.row(),
                        cell.col()
                    );
                }
            }
        }
    }

    #[test]
    fn test_second_level_pass_changes_nothing() {
        for sample in sample_boards() {
            let mut engine = SimEngine::new(sample.board(), DropletFlood::new(), PoolLevel::new());
            engine.flood();
            engine.level_water();
            let rerun = engine.level_water();
            assert_eq!(rerun.changes, 0, "{}", sample.name);
        }
    }

    #[test]
    fn test_volume_invariant_under_drop_order() {
        let flood = DropletFlood::new();
        let level = PoolLevel::new();

        for sample in sample_boards() {
            let mut reference = sample.board();
            flood.flood(&mut reference);
            level.level(&mut reference);
            let expected = volume_of(&reference);

            let mut reversed = sample.board();
            let mut order = reversed.interior_cells();
            order.reverse();
            flood.flood_in_order(&mut reversed, &order);
            level.level(&mut reversed);
            assert!(
                (volume_of(&reversed) - expected).abs() < 1e-9,
                "{}: reversed drop order changed the volume",
                sample.name
            );

            let mut shuffled = sample.board();
            let mut order = shuffled.interior_cells();
            order.shuffle(&mut StdRng::seed_from_u64(7));
            flood.flood_in_order(&mut shuffled, &order);
            level.level(&mut shuffled);
            assert!(
                (volume_of(&shuffled) - expected).abs() < 1e-9,
                "{}: shuffled drop order changed the volume",
                sample.name
            );
        }
    }

    #[test]
    fn test_serpentine_maze_terminates_and_drains() {
        // A single corridor snaking between height-9 walls, open to the
        // bottom edge. Droplets back into dead ends along the way; the
        // leveling pass has to walk the overshoot back out to the breach.
        let mut board = Board::from_heights(&vec![
            vec![9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
            vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
            vec![9.0, 9.0, 9.0, 9.0, 9.0, 0.0, 9.0],
            vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
            vec![9.0, 0.0, 9.0, 9.0, 9.0, 9.0, 9.0],
            vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0],
            vec![9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
        ]).unwrap();

        let flood_stats = DropletFlood::new().flood(&mut board);
        assert_eq!(flood_stats.droplets, 25);
        assert!(flood_stats.settles > 0);

        let level_stats = PoolLevel::new().level(&mut board);
        assert!(!level_stats.capped);

        let volume = volume_of(&board);
        assert!(volume.abs() < 1e-9, "maze should drain fully, held {}", volume);
        assert!(board.cells_iter().all(|cell| cell.water_level() >= 0.0));
    }
}

use crate::board::Board;
use crate::sim::{Level, LevelStats};

// The flood pass is order-dependent and can leave a connected pool uneven, or
// leave a pool above a drain path it never discovered. Relax to a fixed point.
pub struct PoolLevel;

impl PoolLevel {
    pub fn new() -> PoolLevel {
        PoolLevel
    }

    fn level_pass(&self, board: &mut Board) -> usize {
        let mut changes = 0;

        // Shallow pools first, so corrections spread inward from pool rims
        let mut watered = board.cells_with_water();
        watered.sort_unstable_by(|&a, &b| {
            board.cell(a).water_level().total_cmp(&board.cell(b).water_level())
        });

        for &index in watered.iter() {
            let neighbors = board.neighbor_indices(index).to_vec();

            // Pull higher watered neighbors down to this cell's surface
            let total = board.cell(index).total_height();
            for &neighbor in neighbors.iter() {
                if board.cell(neighbor).water_level() > 0.0
                    && board.cell(neighbor).total_height() > total
                {
                    let level = (total - board.cell(neighbor).height()).max(0.0);
                    board.set_water_level(neighbor, level);
                    changes += 1;
                }
            }

            // Drain toward any dry neighbor whose surface sits lower
            for &neighbor in neighbors.iter() {
                if board.cell(neighbor).water_level() == 0.0
                    && board.cell(neighbor).total_height() < board.cell(index).total_height()
                {
                    let level =
                        (board.cell(neighbor).total_height() - board.cell(index).height()).max(0.0);
                    board.set_water_level(index, level);
                    changes += 1;
                }
            }
        }

        changes
    }
}

impl Level for PoolLevel {
    fn level(&self, board: &mut Board) -> LevelStats {
        let max = board.rows() * board.cols();
        let mut stats = LevelStats::new();

        loop {
            let changes = self.level_pass(board);
            stats.passes += 1;
            stats.changes += changes;
            if changes == 0 {
                break;
            }
            if stats.passes >= max {
                stats.capped = true;
                break;
            }
        }

        stats
    }
}

use crate::board::Board;
use crate::sim::{Flood, FloodStats};

pub struct DropletFlood;

// Per-attempt visit marks, keyed by cell index. Owned by the flood routine;
// no visit state survives a flood call.
struct Visited {
    marks: Vec<bool>,
}

impl DropletFlood {
    pub fn new() -> DropletFlood {
        DropletFlood
    }

    pub fn flood_in_order(&self, board: &mut Board, order: &[usize]) -> FloodStats {
        let mut visited = Visited::new(board.cells_len());
        let mut stats = FloodStats::new();

        // Drop one or more droplets on each cell in turn to populate water levels
        for &source in order {
            self.drop_on(board, source, &mut visited, &mut stats);
        }

        stats
    }

    fn drop_on(&self, board: &mut Board, source: usize, visited: &mut Visited, stats: &mut FloodStats) {
        visited.clear();
        stats.droplets += 1;

        // A droplet never takes more steps than the longest non-repeating
        // path across the board
        let max = board.rows() * board.cols();
        let mut cur = 0;

        let mut current = source;
        let mut pooling = true;

        // pooling stays true as long as the droplet can keep flowing; the
        // only way out of the journey is to fall off an edge or hit the budget
        while pooling && cur < max {
            cur += 1;

            if self.can_exit(board, current, visited) {
                pooling = false;
                continue;
            }

            // Prefer the lowest neighbor not yet visited on this attempt;
            // fall back to the lowest neighbor outright when all are visited
            let lowest = match self.lowest_neighbor(board, current, visited, true) {
                Some(index) => index,
                None => match self.lowest_neighbor(board, current, visited, false) {
                    Some(index) => index,
                    // every cell has at least two neighbors
                    None => break,
                },
            };

            if board.cell(lowest).total_height() <= board.cell(current).total_height() {
                visited.mark(current);
                current = lowest;
            } else {
                // Blocked on all sides: settle up to the lowest neighbor's
                // surface, then restart the journey from the source, since the
                // new water may have opened a different path
                let level = board.cell(lowest).total_height() - board.cell(current).height();
                board.set_water_level(current, level);
                stats.settles += 1;

                current = source;
                cur = 0;
                visited.clear();
            }
        }

        if pooling {
            stats.capped += 1;
        }
    }

    // A droplet exits the board when an unvisited edge neighbor's bare
    // terrain sits at or below the current cell's surface
    fn can_exit(&self, board: &Board, current: usize, visited: &Visited) -> bool {
        let total = board.cell(current).total_height();
        board.neighbor_indices(current).iter().any(|&index| {
            !visited.contains(index)
                && board.cell(index).is_edge()
                && board.cell(index).height() <= total
        })
    }

    fn lowest_neighbor(
        &self,
        board: &Board,
        current: usize,
        visited: &Visited,
        unvisited_only: bool,
    ) -> Option<usize> {
        let mut lowest: Option<usize> = None;
        for &index in board.neighbor_indices(current) {
            if unvisited_only && visited.contains(index) {
                continue;
            }
            let lower = match lowest {
                Some(found) => board.cell(index).total_height() < board.cell(found).total_height(),
                None => true,
            };
            if lower {
                lowest = Some(index);
            }
        }
        lowest
    }
}

impl Flood for DropletFlood {
    fn flood(&self, board: &mut Board) -> FloodStats {
        let order = board.interior_cells();
        self.flood_in_order(board, &order)
    }
}

impl Visited {
    fn new(len: usize) -> Visited {
        Visited { marks: vec![false; len] }
    }

    fn mark(&mut self, index: usize) {
        self.marks[index] = true;
    }

    fn contains(&self, index: usize) -> bool {
        self.marks[index]
    }

    fn clear(&mut self) {
        for mark in self.marks.iter_mut() {
            *mark = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_basin_cell_fills_to_rim() {
        let mut board = Board::from_heights(&vec![
            vec![5.0, 5.0, 5.0],
            vec![5.0, 0.0, 5.0],
            vec![5.0, 5.0, 5.0],
        ]).unwrap();
        let stats = DropletFlood::new().flood(&mut board);
        let center = board.index_of(1, 1);
        assert_eq!(board.cell(center).water_level(), 5.0);
        assert_eq!(board.cell(center).total_height(), 5.0);
        assert_eq!(stats.droplets, 1);
        assert_eq!(stats.settles, 1);
        assert_eq!(stats.capped, 0);
    }

    #[test]
    fn test_droplet_drains_through_low_edge() {
        let mut board = Board::from_heights(&vec![
            vec![5.0, 0.0, 5.0],
            vec![5.0, 0.0, 5.0],
            vec![5.0, 5.0, 5.0],
        ]).unwrap();
        DropletFlood::new().flood(&mut board);
        assert!(board.cells_with_water().is_empty());
    }

    #[test]
    fn test_flat_interior_drains_everywhere() {
        let mut board = Board::from_heights(&vec![vec![2.0; 5]; 5]).unwrap();
        let stats = DropletFlood::new().flood(&mut board);
        assert!(board.cells_with_water().is_empty());
        assert_eq!(stats.droplets, 9);
        assert_eq!(stats.settles, 0);
    }

    #[test]
    fn test_edges_stay_dry_after_flood() {
        let mut board = Board::from_heights(&vec![
            vec![9.0, 9.0, 9.0, 9.0, 9.0],
            vec![9.0, 0.0, 7.0, 1.0, 9.0],
            vec![9.0, 2.0, 8.0, 0.0, 9.0],
            vec![9.0, 0.0, 3.0, 4.0, 9.0],
            vec![9.0, 9.0, 9.0, 0.0, 9.0],
        ]).unwrap();
        DropletFlood::new().flood(&mut board);
        for cell in board.cells_iter() {
            if cell.is_edge() {
                assert_eq!(cell.water_level(), 0.0, "edge ({}, {})", cell.row(), cell.col());
            }
            assert!(cell.water_level() >= 0.0);
        }
    }

    #[test]
    fn test_deeper_basin_settles_in_steps() {
        // Two-cell trench: both cells must end level with the rim
        let mut board = Board::from_heights(&vec![
            vec![6.0, 6.0, 6.0, 6.0],
            vec![6.0, 0.0, 3.0, 6.0],
            vec![6.0, 6.0, 6.0, 6.0],
        ]).unwrap();
        let stats = DropletFlood::new().flood(&mut board);
        let left = board.index_of(1, 1);
        let right = board.index_of(1, 2);
        assert_eq!(board.cell(left).total_height(), 6.0);
        assert_eq!(board.cell(right).total_height(), 6.0);
        assert!(stats.settles >= 2);
    }

    #[test]
    fn test_flood_in_order_matches_flood() {
        let heights = vec![
            vec![9.0, 9.0, 9.0, 1.0, 9.0],
            vec![9.0, 0.0, 1.0, 0.0, 9.0],
            vec![9.0, 2.0, 9.0, 2.0, 9.0],
            vec![9.0, 9.0, 9.0, 9.0, 9.0],
        ];
        let mut forward = Board::from_heights(&heights).unwrap();
        let flood = DropletFlood::new();
        let order = forward.interior_cells();
        flood.flood_in_order(&mut forward, &order);

        let mut default = Board::from_heights(&heights).unwrap();
        flood.flood(&mut default);

        for index in 0..forward.cells_len() {
            assert_eq!(forward.cell(index).water_level(), default.cell(index).water_level());
        }
    }
}

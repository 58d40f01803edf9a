use crate::board::Board;

pub struct SimEngine<F: Flood, L: Level> {
    board: Board,
    flood: F,
    level: L,
}

impl<F: Flood, L: Level> SimEngine<F, L> {
    pub fn new(board: Board, flood: F, level: L) -> SimEngine<F, L> {
        SimEngine { board, flood, level }
    }

    pub fn flood(&mut self) -> FloodStats {
        self.flood.flood(&mut self.board)
    }

    pub fn level_water(&mut self) -> LevelStats {
        self.level.level(&mut self.board)
    }

    pub fn water_volume(&self) -> f64 {
        self.board
            .cells_iter()
            .map(|cell| cell.water_level() * cell.width() * cell.width())
            .sum()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

pub trait Flood {
    fn flood(&self, board: &mut Board) -> FloodStats;
}

pub trait Level {
    fn level(&self, board: &mut Board) -> LevelStats;
}

#[derive(Debug)]
pub struct FloodStats {
    pub droplets: usize,
    pub settles: usize,
    pub capped: usize,
}

#[derive(Debug)]
pub struct LevelStats {
    pub passes: usize,
    pub changes: usize,
    pub capped: bool,
}

impl FloodStats {
    pub fn new() -> FloodStats {
        FloodStats { droplets: 0, settles: 0, capped: 0 }
    }
}

impl LevelStats {
    pub fn new() -> LevelStats {
        LevelStats { passes: 0, changes: 0, capped: false }
    }
}

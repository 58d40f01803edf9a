use std::error::Error;
use std::fmt;

use crate::board_gen::HeightGenerator;

#[derive(Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

#[derive(Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    height: f64,
    water_level: f64,
    is_edge: bool,
    width: f64,
    neighbors: Vec<usize>,
}

#[derive(Debug, PartialEq)]
pub enum BoardError {
    EmptyBoard,
    RaggedRow { row: usize, len: usize, expected: usize },
    OutOfBounds { row: usize, col: usize },
}

impl Board {
    pub fn generate(rows: usize, cols: usize, width: f64, heights: impl Iterator<Item=f64>) -> Board {
        assert!(rows > 0 && cols > 0, "board must have at least one row and one column");
        assert!(width > 0.0, "cell width must be positive, got {}", width);

        let mut cells: Vec<Cell> = heights
            .take(rows * cols)
            .enumerate()
            .map(|(index, height)| -> Cell {
                let row = index / cols;
                let col = index % cols;
                let is_edge = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
                Cell::new(row, col, height, is_edge, width)
            })
            .collect();
        assert_eq!(cells.len(), rows * cols, "height source ran out before filling the board");

        Board::calculate_neighbors(&mut cells, rows, cols);

        Board { rows, cols, cells }
    }

    pub fn from_heights(heights: &[Vec<f64>]) -> Result<Board, BoardError> {
        if heights.is_empty() || heights[0].is_empty() {
            return Err(BoardError::EmptyBoard);
        }
        let rows = heights.len();
        let cols = heights[0].len();
        for (row, row_heights) in heights.iter().enumerate() {
            if row_heights.len() != cols {
                return Err(BoardError::RaggedRow { row, len: row_heights.len(), expected: cols });
            }
        }
        Ok(Board::generate(rows, cols, 1.0, heights.iter().flatten().copied()))
    }

    pub fn random(rows: usize, cols: usize, fractional: bool, width: f64) -> Board {
        Board::generate(rows, cols, width, HeightGenerator::new(rows * cols, fractional))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells_len(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cells_iter(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter()
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(&self.cells[row * self.cols + col])
    }

    pub fn neighbor_indices(&self, index: usize) -> &[usize] {
        self.cells[index].neighbors()
    }

    pub fn interior_cells(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&index| !self.cells[index].is_edge())
            .collect()
    }

    pub fn cells_with_water(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&index| self.cells[index].water_level() > 0.0)
            .collect()
    }

    pub fn set_water_level(&mut self, index: usize, level: f64) {
        self.cells[index].set_water_level(level);
    }

    pub fn max_total_height(&self) -> f64 {
        self.cells.iter().fold(0.0, |max, cell| max.max(cell.total_height()))
    }

    fn calculate_neighbors(cells: &mut [Cell], rows: usize, cols: usize) {
        for index in 0..cells.len() {
            let row = cells[index].row;
            let col = cells[index].col;
            // up, down, left, right
            if row > 0 {
                cells[index].add_neighbor(index - cols);
            }
            if row < rows - 1 {
                cells[index].add_neighbor(index + cols);
            }
            if col > 0 {
                cells[index].add_neighbor(index - 1);
            }
            if col < cols - 1 {
                cells[index].add_neighbor(index + 1);
            }
        }
    }
}

impl Cell {
    fn new(row: usize, col: usize, height: f64, is_edge: bool, width: f64) -> Cell {
        Cell {
            row,
            col,
            height,
            water_level: 0.0,
            is_edge,
            width,
            neighbors: Vec::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn is_edge(&self) -> bool {
        self.is_edge
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn total_height(&self) -> f64 {
        self.height + self.water_level
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    fn set_water_level(&mut self, level: f64) {
        debug_assert!(level >= 0.0, "water level must not be negative, got {}", level);
        self.water_level = level;
    }

    fn add_neighbor(&mut self, index: usize) {
        self.neighbors.push(index);
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::EmptyBoard => {
                write!(f, "board must have at least one row and one column")
            }
            BoardError::RaggedRow { row, len, expected } => {
                write!(f, "row {} has {} columns, expected {}", row, len, expected)
            }
            BoardError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
        }
    }
}

impl Error for BoardError {}

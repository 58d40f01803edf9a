use crate::board::{Board, Cell};
use crate::render::{Shade, RGB};

pub struct DefaultShader;

impl Shade for DefaultShader {
    fn shade_cell(&self, cell: &Cell, board: &Board) -> RGB {
        if cell.water_level() > 0.0 {
            // deeper water, darker blue
            let factor = 1.0 + cell.water_level() * 0.2;
            RGB {
                r: 0.2 / factor,
                g: 0.4 / factor,
                b: 1.0 / factor,
            }
        } else {
            // dry terrain, sand ramp brightening with elevation
            let max = board.max_total_height();
            let lift = if max > 0.0 { cell.height() / max } else { 0.0 };
            let shade = 0.25 + 0.75 * lift;
            RGB {
                r: shade,
                g: 0.85 * shade,
                b: 0.55 * shade,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watered_cells_shade_blue() {
        let mut board = Board::from_heights(&vec![
            vec![9.0, 9.0, 9.0],
            vec![9.0, 0.0, 9.0],
            vec![9.0, 9.0, 9.0],
        ]).unwrap();
        let center = board.index_of(1, 1);
        board.set_water_level(center, 4.0);

        let shader = DefaultShader;
        let wet = shader.shade_cell(board.cell(center), &board);
        assert!(wet.b > wet.r && wet.b > wet.g);

        let dry = shader.shade_cell(board.cell(0), &board);
        assert!(dry.r >= dry.g && dry.g >= dry.b);
    }

    #[test]
    fn test_higher_terrain_shades_brighter() {
        let board = Board::from_heights(&vec![
            vec![1.0, 8.0],
            vec![1.0, 1.0],
        ]).unwrap();
        let shader = DefaultShader;
        let low = shader.shade_cell(board.cell(0), &board);
        let high = shader.shade_cell(board.cell(1), &board);
        assert!(high.r > low.r);
    }
}

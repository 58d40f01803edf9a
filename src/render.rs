use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::board::{Board, Cell};

pub struct Renderer<'a, S: Shade> {
    scale: u32,
    shader: S,
    render_path: &'a str,
}

pub trait Shade {
    fn shade_cell(&self, cell: &Cell, board: &Board) -> RGB;
}

#[derive(Clone)]
pub struct RGB {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl<'a, S: Shade> Renderer<'a, S> {
    pub fn new(scale: u32, shader: S, render_path: &'a str) -> Renderer<'a, S> {
        assert!(scale > 0);
        Renderer { scale, shader, render_path }
    }

    // Top-down view, one scale x scale block of pixels per cell
    pub fn render(&self, board: &Board, name: &str) {
        let width = board.cols() as u32 * self.scale;
        let height = board.rows() as u32 * self.scale;

        let mut data: Vec<u8> = Vec::with_capacity((width * height * 3) as usize);
        for py in 0..height {
            let row = (py / self.scale) as usize;
            for px in 0..width {
                let col = (px / self.scale) as usize;
                let cell = board.cell(board.index_of(row, col));
                data.extend_from_slice(&self.shader.shade_cell(cell, board).to_data());
            }
        }

        self.save_image(name, width, height, &data);
    }

    fn save_image(&self, name: &str, width: u32, height: u32, pixel_data: &[u8]) {
        let path_string = format!("{}/{}.png", self.render_path, name);
        let path = Path::new(&path_string);
        let file = File::create(path).unwrap();
        let w = &mut BufWriter::new(file);

        let mut encoder = png::Encoder::new(w, width, height);
        encoder.set_color(png::ColorType::RGB);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixel_data).unwrap();
    }
}

impl RGB {
    fn to_data(&self) -> [u8; 3] {
        [
            RGB::normalize(self.r),
            RGB::normalize(self.g),
            RGB::normalize(self.b),
        ]
    }

    fn normalize(n: f64) -> u8 {
        let mut n = (n * 256.0).floor();
        if n < 0.0 {
            n = 0.0;
        }
        if n > 255.0 {
            n = 255.0;
        }
        n as u8
    }
}

use std::fs;

use crate::run::RunnerBuilder;

mod board;
mod board_gen;
mod default_shader;
mod droplet_flood;
mod pool_level;
mod render;
mod run;
mod samples;
mod sim;
mod text;

fn main() {
    let rows = 8_usize;
    let cols = 8_usize;
    let cell_width = 1.0;
    let fractional = false;
    let board_count = 6_u32;

    let render_scale = 32_u32;
    let data_path = "./board_data";
    let render_path = "./render";

    fs::create_dir_all(data_path).unwrap();
    fs::create_dir_all(render_path).unwrap();

    RunnerBuilder::new()
        .rows(rows)
        .cols(cols)
        .cell_width(cell_width)
        .fractional(fractional)
        .board_count(board_count)
        .render_scale(render_scale)
        .data_path(data_path)
        .render_path(render_path)
        .build()
        .run();
}

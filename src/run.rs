use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use crossbeam;
use crossbeam::channel;

use crate::board::Board;
use crate::board_gen::{HeightsReader, HeightsWriter};
use crate::default_shader::DefaultShader;
use crate::droplet_flood::DropletFlood;
use crate::pool_level::PoolLevel;
use crate::render::Renderer;
use crate::samples::sample_boards;
use crate::sim::{FloodStats, LevelStats, SimEngine};
use crate::text::board_table;

pub struct Runner<'a> {
    rows: usize,
    cols: usize,
    cell_width: f64,
    fractional: bool,
    board_count: u32,
    render_scale: u32,
    data_path: &'a str,
    render_path: &'a str,
}

pub struct RunnerBuilder<'a> {
    rows: Option<usize>,
    cols: Option<usize>,
    cell_width: Option<f64>,
    fractional: Option<bool>,
    board_count: Option<u32>,
    render_scale: Option<u32>,
    data_path: Option<&'a str>,
    render_path: Option<&'a str>,
}

struct BatchReport {
    board_num: u32,
    volume: f64,
    millis: f64,
    flood_capped: usize,
    level_capped: bool,
}

impl<'a> Runner<'a> {
    pub fn run(&self) {
        self.run_samples();
        self.run_random_batch();
    }

    fn run_samples(&self) {
        let samples = sample_boards();
        println!("running {} sample boards", samples.len());

        let renderer = Renderer::new(self.render_scale, DefaultShader, self.render_path);

        for (num, sample) in samples.iter().enumerate() {
            println!("\nsample board {} of {}: {}", num + 1, samples.len(), sample.name);

            let mut engine = SimEngine::new(sample.board(), DropletFlood::new(), PoolLevel::new());
            println!("{}", board_table(engine.board()));

            let start = Instant::now();
            let flood_stats = engine.flood();
            let level_stats = engine.level_water();
            let elapsed = start.elapsed();

            println!("{}", board_table(engine.board()));
            println!(
                "volume: {} cubic units (expected {})",
                engine.water_volume(),
                sample.expected_volume,
            );
            println!("calculation time: {} ms", elapsed.as_secs_f64() * 1000.0);
            println!(
                "{} droplets, {} settles, {} leveling passes, {} corrections",
                flood_stats.droplets, flood_stats.settles, level_stats.passes, level_stats.changes,
            );
            report_diagnostics(&flood_stats, &level_stats);

            renderer.render(engine.board(), &format!("sample_{:02}", num + 1));
        }
    }

    fn run_random_batch(&self) {
        println!("\nflooding {} random boards", self.board_count);

        // Boards are generated once and replayed from disk on later runs
        for num in 0..self.board_count {
            let path_string = self.heights_file_path(num);
            if !Path::new(&path_string).exists() {
                let board = Board::random(self.rows, self.cols, self.fractional, self.cell_width);
                let file = File::create(&path_string).unwrap();
                let mut writer = HeightsWriter::new(BufWriter::new(file));
                writer.write_heights(board.cells_iter().map(|cell| cell.height()));
            }
        }

        let mut reports = self.flood_batch();
        reports.sort_by_key(|report| report.board_num);

        for report in reports.iter() {
            println!(
                "board {:02}: volume {} cubic units in {} ms",
                report.board_num, report.volume, report.millis,
            );
            if report.flood_capped > 0 {
                eprintln!(
                    "board {:02}: {} droplet paths hit the step budget",
                    report.board_num, report.flood_capped,
                );
            }
            if report.level_capped {
                eprintln!(
                    "board {:02}: leveling hit the pass budget before converging",
                    report.board_num,
                );
            }
        }
    }

    fn flood_batch(&self) -> Vec<BatchReport> {
        let (tx_work, rx_work) = channel::bounded(1);
        let (tx_report, rx_report) = channel::bounded(1);

        crossbeam::scope(|s| {
            // queue each board number as a unit of work
            s.spawn(|_| {
                for num in 0..self.board_count {
                    tx_work.send(num).unwrap();
                }
                drop(tx_work);
            });

            // workers each own their boards outright, start to finish
            for _ in 0..num_cpus::get() {
                let (tx, rx) = (tx_report.clone(), rx_work.clone());
                s.spawn(move |_| {
                    let renderer = Renderer::new(self.render_scale, DefaultShader, self.render_path);
                    for num in rx.iter() {
                        tx.send(self.flood_one(num, &renderer)).unwrap();
                    }
                });
            }

            drop(tx_report);

            rx_report.iter().collect()
        })
        .unwrap()
    }

    fn flood_one(&self, num: u32, renderer: &Renderer<DefaultShader>) -> BatchReport {
        let file = File::open(self.heights_file_path(num)).unwrap();
        let heights = HeightsReader::new(BufReader::new(file));
        let board = Board::generate(self.rows, self.cols, self.cell_width, heights);

        let mut engine = SimEngine::new(board, DropletFlood::new(), PoolLevel::new());

        let start = Instant::now();
        let flood_stats = engine.flood();
        let level_stats = engine.level_water();
        let millis = start.elapsed().as_secs_f64() * 1000.0;

        renderer.render(engine.board(), &format!("random_{:02}", num));

        BatchReport {
            board_num: num,
            volume: engine.water_volume(),
            millis,
            flood_capped: flood_stats.capped,
            level_capped: level_stats.capped,
        }
    }

    fn heights_file_path(&self, num: u32) -> String {
        format!(
            "{}/heights_{}x{}_{:02}.dat",
            self.data_path, self.rows, self.cols, num,
        )
    }
}

fn report_diagnostics(flood_stats: &FloodStats, level_stats: &LevelStats) {
    if flood_stats.capped > 0 {
        eprintln!("{} droplet paths hit the step budget", flood_stats.capped);
    }
    if level_stats.capped {
        eprintln!("leveling hit the pass budget before converging");
    }
}

impl<'a> RunnerBuilder<'a> {
    pub fn new() -> RunnerBuilder<'a> {
        RunnerBuilder {
            rows: None,
            cols: None,
            cell_width: None,
            fractional: None,
            board_count: None,
            render_scale: None,
            data_path: None,
            render_path: None,
        }
    }

    pub fn rows(&mut self, rows: usize) -> &mut RunnerBuilder<'a> {
        assert!(rows >= 3);
        self.rows = Some(rows);
        self
    }

    pub fn cols(&mut self, cols: usize) -> &mut RunnerBuilder<'a> {
        assert!(cols >= 3);
        self.cols = Some(cols);
        self
    }

    pub fn cell_width(&mut self, cell_width: f64) -> &mut RunnerBuilder<'a> {
        assert!(cell_width.is_finite());
        assert!(cell_width > 0_f64);
        self.cell_width = Some(cell_width);
        self
    }

    pub fn fractional(&mut self, fractional: bool) -> &mut RunnerBuilder<'a> {
        self.fractional = Some(fractional);
        self
    }

    pub fn board_count(&mut self, board_count: u32) -> &mut RunnerBuilder<'a> {
        assert!(board_count > 0);
        self.board_count = Some(board_count);
        self
    }

    pub fn render_scale(&mut self, render_scale: u32) -> &mut RunnerBuilder<'a> {
        assert!(render_scale > 0);
        self.render_scale = Some(render_scale);
        self
    }

    pub fn data_path(&mut self, data_path: &'a str) -> &mut RunnerBuilder<'a> {
        assert!(Path::new(data_path).is_dir());
        self.data_path = Some(data_path);
        self
    }

    pub fn render_path(&mut self, render_path: &'a str) -> &mut RunnerBuilder<'a> {
        assert!(Path::new(render_path).is_dir());
        self.render_path = Some(render_path);
        self
    }

    pub fn build(&self) -> Runner {
        assert!(self.rows.is_some());
        assert!(self.cols.is_some());
        assert!(self.cell_width.is_some());
        assert!(self.fractional.is_some());
        assert!(self.board_count.is_some());
        assert!(self.render_scale.is_some());
        assert!(self.data_path.is_some());
        assert!(self.render_path.is_some());

        Runner {
            rows: self.rows.unwrap(),
            cols: self.cols.unwrap(),
            cell_width: self.cell_width.unwrap(),
            fractional: self.fractional.unwrap(),
            board_count: self.board_count.unwrap(),
            render_scale: self.render_scale.unwrap(),
            data_path: self.data_path.unwrap(),
            render_path: self.render_path.unwrap(),
        }
    }
}

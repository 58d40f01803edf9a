use std::io::{Read, Write};

use rand::Rng;

// Height distributions match the two random-board flavors of the demo:
// whole-number heights in 0..10, or fractional heights in [0, 100).
pub struct HeightGenerator {
    remaining: usize,
    fractional: bool,
}

pub struct HeightsWriter<W: Write> {
    writer: W,
}

pub struct HeightsReader<R: Read> {
    reader: R,
}

impl HeightGenerator {
    pub fn new(count: usize, fractional: bool) -> HeightGenerator {
        HeightGenerator { remaining: count, fractional }
    }
}

impl Iterator for HeightGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let height = if self.fractional {
            rand::thread_rng().gen::<f64>() * 100.0
        } else {
            rand::thread_rng().gen_range(0..10) as f64
        };
        Some(height)
    }
}

impl<W: Write> HeightsWriter<W> {
    pub fn new(writer: W) -> HeightsWriter<W> {
        HeightsWriter { writer }
    }

    pub fn write_heights(&mut self, heights: impl Iterator<Item=f64>) {
        for height in heights {
            self.writer.write(&height.to_le_bytes()).unwrap();
        }
    }
}

impl<R: Read> HeightsReader<R> {
    pub fn new(reader: R) -> HeightsReader<R> {
        HeightsReader { reader }
    }
}

impl<R: Read> Iterator for HeightsReader<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let mut buffer = [0; 8];
        let num = self.reader.read(&mut buffer).unwrap();
        if num == 8 {
            Some(f64::from_le_bytes(buffer))
        } else {
            None
        }
    }
}

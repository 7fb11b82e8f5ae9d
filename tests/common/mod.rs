// Common test utilities for frame capture integration tests
//
// Mock simulations that expose what the harness does to them, plus a small
// PPM reader for checking written frames.

#![allow(dead_code)]

use render_frames::Simulation;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// One interaction with a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Clk(bool),
    Eval,
    Red,
    Green,
    Blue,
}

/// Records every call made by the harness
///
/// Outputs change on every rising edge. They only count as settled once the
/// falling-edge evaluation has run; reading them earlier is counted as a
/// stale read.
#[derive(Default)]
pub struct RecordingSim {
    events: RefCell<Vec<Event>>,
    stale_reads: Cell<u32>,
    clk: bool,
    clk_prev: bool,
    edges: u32,
    settled: bool,
}

impl RecordingSim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> u32 {
        self.edges
    }

    pub fn stale_reads(&self) -> u32 {
        self.stale_reads.get()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn read(&self, event: Event) {
        self.events.borrow_mut().push(event);
        if !self.settled {
            self.stale_reads.set(self.stale_reads.get() + 1);
        }
    }
}

impl Simulation for RecordingSim {
    fn set_clk(&mut self, level: bool) {
        self.events.borrow_mut().push(Event::Clk(level));
        self.clk = level;
    }

    fn eval(&mut self) {
        self.events.borrow_mut().push(Event::Eval);

        if self.clk && !self.clk_prev {
            self.edges += 1;
            self.settled = false;
        } else if !self.clk && self.clk_prev {
            self.settled = true;
        }
        self.clk_prev = self.clk;
    }

    fn red(&self) -> u8 {
        self.read(Event::Red);
        self.edges as u8
    }

    fn green(&self) -> u8 {
        self.read(Event::Green);
        (self.edges >> 8) as u8
    }

    fn blue(&self) -> u8 {
        self.read(Event::Blue);
        (self.edges >> 16) as u8
    }
}

/// Counts rising edges and outputs the count as a 24-bit color
#[derive(Default, Clone)]
pub struct EdgeCounter {
    clk: bool,
    clk_prev: bool,
    pub edges: u32,
}

impl EdgeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a sampled pixel back into the edge count it was taken at
    pub fn decode(rgb: &[u8]) -> u32 {
        ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
    }
}

impl Simulation for EdgeCounter {
    fn set_clk(&mut self, level: bool) {
        self.clk = level;
    }

    fn eval(&mut self) {
        if self.clk && !self.clk_prev {
            self.edges += 1;
        }
        self.clk_prev = self.clk;
    }

    fn red(&self) -> u8 {
        (self.edges >> 16) as u8
    }

    fn green(&self) -> u8 {
        (self.edges >> 8) as u8
    }

    fn blue(&self) -> u8 {
        self.edges as u8
    }
}

/// Parsed binary PPM
pub struct Ppm {
    pub width: u32,
    pub height: u32,
    pub max_value: u32,
    pub data: Vec<u8>,
}

/// Parse a P6 image as written by the harness
///
/// Header fields are separated by exactly one whitespace byte, and the pixel
/// data starts right after the separator following the max value.
pub fn parse_ppm(bytes: &[u8]) -> Result<Ppm, String> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while fields.len() < 4 {
        let start = pos;
        while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return Err("truncated header".to_string());
        }
        fields.push(String::from_utf8_lossy(&bytes[start..pos]).to_string());
        pos += 1;
    }

    if fields[0] != "P6" {
        return Err(format!("bad magic {}", fields[0]));
    }

    let number = |s: &str| s.parse::<u32>().map_err(|e| format!("{}: {}", s, e));

    Ok(Ppm {
        width: number(&fields[1])?,
        height: number(&fields[2])?,
        max_value: number(&fields[3])?,
        data: bytes[pos..].to_vec(),
    })
}

/// Fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "render_frames_it_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

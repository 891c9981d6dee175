//! In-memory stand-ins for browser objects used by the core's tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{Result, ViewerError};
use crate::media::device::{MediaDevice, Presentation};
use crate::media::spectrum::{AnalysisBackend, DrawingSurface, FrequencySource, Rgb};
use crate::media::viewer::ViewerPlatform;

#[derive(Debug, Default)]
pub struct FakeDevice {
    pub src: Option<String>,
    pub paused: bool,
    pub time: f64,
    pub duration: f64,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub reject_play: bool,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            paused: true,
            duration: f64::NAN,
            ..Self::default()
        }
    }

    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            ..Self::new()
        }
    }
}

impl MediaDevice for FakeDevice {
    fn load(&mut self, url: &str) {
        self.src = Some(url.to_string());
        self.time = 0.0;
        self.paused = true;
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.reject_play {
            return Err(ViewerError::Device("play() was rejected".to_string()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

#[derive(Debug, Default)]
pub struct FakePresentation {
    pub active: bool,
    pub deny: bool,
    pub exits: usize,
}

impl Presentation for FakePresentation {
    fn is_fullscreen(&self) -> bool {
        self.active
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        if self.deny {
            return Err(ViewerError::FullscreenDenied(
                "permissions check failed".to_string(),
            ));
        }
        self.active = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.exits += 1;
        self.active = false;
    }
}

/// Returns a fixed sample pattern and counts pulls.
pub struct FakeSource {
    pub bins: usize,
    pub level: u8,
    pub pulls: Rc<Cell<usize>>,
}

impl FrequencySource for FakeSource {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_frequencies(&self, out: &mut [u8]) {
        self.pulls.set(self.pulls.get() + 1);
        out.fill(self.level);
    }
}

#[derive(Default)]
pub struct FakeAnalysis {
    pub builds: usize,
    pub unsupported: bool,
    pub level: u8,
    pub pulls: Rc<Cell<usize>>,
}

impl AnalysisBackend for FakeAnalysis {
    type Source = FakeSource;

    fn build(&mut self, fft_size: usize) -> Result<FakeSource> {
        if self.unsupported {
            return Err(ViewerError::AnalysisUnavailable(
                "AudioContext is not defined".to_string(),
            ));
        }
        self.builds += 1;
        Ok(FakeSource {
            bins: fft_size / 2,
            level: self.level,
            pulls: self.pulls.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

/// Records every rectangle painted onto it.
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub rects: Vec<Rect>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.rects.push(Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

pub struct FakePlatform;

impl ViewerPlatform for FakePlatform {
    type Video = FakeDevice;
    type Audio = FakeDevice;
    type Presentation = FakePresentation;
    type Analysis = FakeAnalysis;
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

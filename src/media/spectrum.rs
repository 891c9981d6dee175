//! Frequency-bar visualization for the audio overlay.
//!
//! The analysis graph is built lazily on the first audio playback and reused
//! for the rest of the page's lifetime. The frame loop is cooperative: every
//! frame checks its gate first and reports [`FrameOutcome::Stopped`] instead
//! of asking for another frame once playback pauses or the panel goes away.

use crate::error::{Result, ViewerError};

pub const DEFAULT_FFT_SIZE: usize = 256;
pub const BACKGROUND: Rgb = Rgb::new(0x10, 0x10, 0x20);

const BAR_WIDTH_SCALE: f64 = 2.5;
const BAR_GAP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Time-windowed magnitude samples of the playing audio.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn read_frequencies(&self, out: &mut [u8]);
    /// Wake the underlying audio context if the platform suspended it.
    fn resume(&self) {}
}

/// Constructs the analysis stage. Called at most once per renderer.
pub trait AnalysisBackend {
    type Source: FrequencySource;

    fn build(&mut self, fft_size: usize) -> Result<Self::Source>;
}

pub trait DrawingSurface {
    fn size(&self) -> (f64, f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
}

/// Analysis source plus its sample buffer; `samples.len() == fft_size / 2`.
pub struct SpectrumGraph<S> {
    source: S,
    samples: Box<[u8]>,
}

impl<S: FrequencySource> SpectrumGraph<S> {
    pub fn new(source: S, fft_size: usize) -> Self {
        let bins = fft_size / 2;
        if source.bin_count() != bins {
            log::warn!(
                "analysis reports {} bins, expected {bins}",
                source.bin_count()
            );
        }
        Self {
            source,
            samples: vec![0u8; bins].into_boxed_slice(),
        }
    }

    pub fn pull(&mut self) -> &[u8] {
        self.source.read_frequencies(&mut self.samples);
        &self.samples
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

/// Lay out one bar per bin, left to right. Bars past the surface's right edge
/// are still produced; the surface clips them.
pub fn layout_bars(samples: &[u8], width: f64, height: f64) -> impl Iterator<Item = Bar> + '_ {
    let count = samples.len().max(1) as f64;
    let bar_width = (width / count) * BAR_WIDTH_SCALE;

    samples.iter().enumerate().map(move |(i, &sample)| {
        let bar_height = f64::from(sample) / 2.0;
        let ratio = i as f64 / count;
        Bar {
            x: i as f64 * (bar_width + BAR_GAP),
            y: height - bar_height,
            width: bar_width,
            height: bar_height,
            color: Rgb::new(
                channel(bar_height + 25.0 * ratio),
                channel(250.0 * ratio),
                50,
            ),
        }
    })
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Conditions checked at the top of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    pub playing: bool,
    pub panel_visible: bool,
}

impl FrameGate {
    pub fn is_open(&self) -> bool {
        self.playing && self.panel_visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Painted; schedule the next frame.
    Continue,
    /// Do not schedule another frame.
    Stopped,
}

enum GraphState<S> {
    Pending,
    Ready(SpectrumGraph<S>),
    Disabled,
}

pub struct SpectrumRenderer<B: AnalysisBackend> {
    backend: B,
    graph: GraphState<B::Source>,
    fft_size: usize,
    running: bool,
    constructions: usize,
}

impl<B: AnalysisBackend> SpectrumRenderer<B> {
    pub fn new(backend: B, fft_size: usize) -> Self {
        Self {
            backend,
            graph: GraphState::Pending,
            fft_size,
            running: false,
            constructions: 0,
        }
    }

    /// Build the shared graph on first use. A failure disables the
    /// visualization for good; playback is not affected.
    pub fn ensure_graph(&mut self) -> bool {
        if let GraphState::Pending = self.graph {
            self.graph = match self.backend.build(self.fft_size) {
                Ok(source) => {
                    self.constructions += 1;
                    log::info!("audio analysis ready (fft size {})", self.fft_size);
                    GraphState::Ready(SpectrumGraph::new(source, self.fft_size))
                }
                Err(err) => {
                    log::warn!("spectrum disabled: {err}");
                    GraphState::Disabled
                }
            };
        }
        matches!(self.graph, GraphState::Ready(_))
    }

    /// Mark the loop as running. Returns `true` when the caller must schedule
    /// the first frame, `false` if a loop is already live or the renderer is
    /// disabled.
    pub fn arm(&mut self) -> bool {
        let GraphState::Ready(graph) = &self.graph else {
            return false;
        };
        graph.source().resume();
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Turn the visualization off for good, e.g. when there is nothing to
    /// draw on. Any live loop stops at its next frame.
    pub fn disable(&mut self, reason: ViewerError) {
        log::warn!("spectrum disabled: {reason}");
        self.graph = GraphState::Disabled;
        self.running = false;
    }

    /// Forget the live loop so the next `arm` schedules a new one.
    pub fn halt(&mut self) {
        self.running = false;
    }

    pub fn frame<S: DrawingSurface>(&mut self, gate: FrameGate, surface: &mut S) -> FrameOutcome {
        if !gate.is_open() {
            self.running = false;
            return FrameOutcome::Stopped;
        }
        let GraphState::Ready(graph) = &mut self.graph else {
            self.running = false;
            return FrameOutcome::Stopped;
        };

        let (width, height) = surface.size();
        let samples = graph.pull();
        surface.fill_rect(0.0, 0.0, width, height, BACKGROUND);
        for bar in layout_bars(samples, width, height) {
            surface.fill_rect(bar.x, bar.y, bar.width, bar.height, bar.color);
        }
        FrameOutcome::Continue
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `false` only after graph construction failed.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.graph, GraphState::Disabled)
    }

    pub fn constructions(&self) -> usize {
        self.constructions
    }

    pub fn samples(&self) -> Option<&[u8]> {
        match &self.graph {
            GraphState::Ready(graph) => Some(graph.samples()),
            _ => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::testing::{init_logging, FakeAnalysis, RecordingSurface};

    const OPEN: FrameGate = FrameGate {
        playing: true,
        panel_visible: true,
    };

    #[test]
    fn graph_buffer_is_half_the_fft_size() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        assert!(renderer.ensure_graph());
        assert_eq!(renderer.samples().map(<[u8]>::len), Some(128));
    }

    #[test]
    fn graph_is_built_once() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        renderer.ensure_graph();
        assert_eq!(renderer.backend().builds, 1);
        assert_eq!(renderer.constructions(), 1);
    }

    #[test]
    fn failed_construction_disables_visualization() {
        init_logging();
        let backend = FakeAnalysis {
            unsupported: true,
            ..FakeAnalysis::default()
        };
        let mut renderer = SpectrumRenderer::new(backend, DEFAULT_FFT_SIZE);

        assert!(!renderer.ensure_graph());
        assert!(!renderer.is_enabled());
        assert!(!renderer.arm());

        let mut surface = RecordingSurface::new(300.0, 150.0);
        assert_eq!(renderer.frame(OPEN, &mut surface), FrameOutcome::Stopped);
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn frame_clears_then_paints_every_bin() {
        let backend = FakeAnalysis {
            level: 200,
            ..FakeAnalysis::default()
        };
        let mut renderer = SpectrumRenderer::new(backend, DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        assert!(renderer.arm());

        let mut surface = RecordingSurface::new(512.0, 150.0);
        assert_eq!(renderer.frame(OPEN, &mut surface), FrameOutcome::Continue);

        assert_eq!(surface.rects.len(), 129);
        let background = surface.rects[0];
        assert_eq!(background.color, BACKGROUND);
        assert_eq!((background.width, background.height), (512.0, 150.0));

        let first = surface.rects[1];
        assert_eq!(first.x, 0.0);
        assert_eq!(first.width, 10.0);
        assert_eq!(first.height, 100.0);
        assert_eq!(first.y, 50.0);
        assert_eq!(surface.rects[2].x, 11.0);
    }

    #[test]
    fn paused_gate_stops_without_painting() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        renderer.arm();

        let mut surface = RecordingSurface::new(256.0, 100.0);
        let gate = FrameGate {
            playing: false,
            panel_visible: true,
        };
        assert_eq!(renderer.frame(gate, &mut surface), FrameOutcome::Stopped);
        assert!(!renderer.is_running());
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn hidden_panel_stops_the_loop() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        renderer.arm();

        let mut surface = RecordingSurface::new(256.0, 100.0);
        let gate = FrameGate {
            playing: true,
            panel_visible: false,
        };
        assert_eq!(renderer.frame(gate, &mut surface), FrameOutcome::Stopped);
    }

    #[test]
    fn arming_a_live_loop_does_not_start_a_second_one() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();

        assert!(renderer.arm());
        assert!(!renderer.arm());

        let mut surface = RecordingSurface::new(256.0, 100.0);
        let paused = FrameGate {
            playing: false,
            panel_visible: true,
        };
        renderer.frame(paused, &mut surface);
        assert!(renderer.arm());
    }

    #[test]
    fn disabling_a_ready_graph_stops_the_loop() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        assert!(renderer.arm());

        renderer.disable(ViewerError::SurfaceUnavailable("no canvas".to_string()));
        assert!(!renderer.is_enabled());
        assert!(!renderer.is_running());
        assert!(!renderer.arm());

        let mut surface = RecordingSurface::new(256.0, 100.0);
        assert_eq!(renderer.frame(OPEN, &mut surface), FrameOutcome::Stopped);
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn halted_loop_can_be_armed_again() {
        let mut renderer = SpectrumRenderer::new(FakeAnalysis::default(), DEFAULT_FFT_SIZE);
        renderer.ensure_graph();
        assert!(renderer.arm());

        renderer.halt();
        assert!(!renderer.is_running());
        assert!(renderer.arm());
    }

    #[test]
    fn bar_colors_follow_the_bin_gradient() {
        let samples = [0u8, 0, 255, 0];
        let bars: Vec<Bar> = layout_bars(&samples, 40.0, 200.0).collect();

        assert_eq!(bars[0].color, Rgb::new(0, 0, 50));
        // 127.5 + 12.5 rounds to 140, 250 * 0.5 = 125
        assert_eq!(bars[2].color, Rgb::new(140, 125, 50));
        assert_eq!(bars[3].color.g, 188);
        assert!(bars.iter().all(|bar| bar.color.b == 50));
    }

    #[test]
    fn trailing_bars_overflow_the_surface() {
        let samples = [10u8; 128];
        let last = layout_bars(&samples, 128.0, 100.0).last().unwrap();
        assert!(last.x > 128.0);
    }

    #[test]
    fn css_color_format() {
        assert_eq!(BACKGROUND.css(), "rgb(16,16,32)");
    }
}

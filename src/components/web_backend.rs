//! Browser implementations of the viewer's device seams.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, AnalyserNode, AudioContext, CanvasRenderingContext2d, Document, HtmlCanvasElement,
    HtmlElement, HtmlMediaElement, MediaElementAudioSourceNode,
};

use crate::error::{Result, ViewerError};
use crate::media::spectrum::{AnalysisBackend, DrawingSurface, FrequencySource, Rgb};
use crate::media::{MediaDevice, MediaKind, Presentation, ViewerPlatform};

pub struct WebPlatform;

impl ViewerPlatform for WebPlatform {
    type Video = WebMediaElement;
    type Audio = WebMediaElement;
    type Presentation = WebPresentation;
    type Analysis = WebAnalysis;
}

/// Best-effort readable text for a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn find_element<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ViewerError::SurfaceUnavailable(format!("#{id} is not in the page")))?
        .dyn_into::<T>()
        .map_err(|_| ViewerError::SurfaceUnavailable(format!("#{id} has an unexpected type")))
}

pub struct WebMediaElement {
    kind: MediaKind,
    element: HtmlMediaElement,
}

impl WebMediaElement {
    pub fn new(kind: MediaKind, element: HtmlMediaElement) -> Self {
        Self { kind, element }
    }
}

impl MediaDevice for WebMediaElement {
    fn load(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| ViewerError::Device(js_error_message(&e)))?;
        let kind = self.kind;
        // Autoplay refusals show up as a rejected promise, not a thrown error.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!(
                    "[{}] browser refused playback: {}",
                    kind.label(),
                    js_error_message(&err)
                );
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            log::debug!("[{}] pause failed: {}", self.kind.label(), js_error_message(&err));
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }
}

/// Fullscreen for the video wrapper. Refusals that the browser reports later
/// arrive through the document's `fullscreenerror` event.
pub struct WebPresentation {
    wrapper: HtmlElement,
}

impl WebPresentation {
    pub fn new(wrapper: HtmlElement) -> Self {
        Self { wrapper }
    }

    fn document(&self) -> Option<Document> {
        window().and_then(|w| w.document())
    }
}

impl Presentation for WebPresentation {
    fn is_fullscreen(&self) -> bool {
        self.document()
            .and_then(|doc| doc.fullscreen_element())
            .is_some()
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        self.wrapper
            .request_fullscreen()
            .map_err(|e| ViewerError::FullscreenDenied(js_error_message(&e)))
    }

    fn exit_fullscreen(&mut self) {
        if let Some(doc) = self.document() {
            doc.exit_fullscreen();
        }
    }
}

/// Builds `audio element -> analyser -> destination` on the shared audio element.
pub struct WebAnalysis {
    audio: HtmlMediaElement,
}

impl WebAnalysis {
    pub fn new(audio: HtmlMediaElement) -> Self {
        Self { audio }
    }
}

fn analysis_error(err: JsValue) -> ViewerError {
    ViewerError::AnalysisUnavailable(js_error_message(&err))
}

impl AnalysisBackend for WebAnalysis {
    type Source = WebAnalyser;

    fn build(&mut self, fft_size: usize) -> Result<WebAnalyser> {
        let context = AudioContext::new().map_err(analysis_error)?;
        let analyser = context.create_analyser().map_err(analysis_error)?;
        analyser.set_fft_size(fft_size as u32);

        let source = context
            .create_media_element_source(&self.audio)
            .map_err(analysis_error)?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(analysis_error)?;
        analyser
            .connect_with_audio_node(&context.destination())
            .map_err(analysis_error)?;

        Ok(WebAnalyser {
            context,
            analyser,
            _source: source,
        })
    }
}

pub struct WebAnalyser {
    context: AudioContext,
    analyser: AnalyserNode,
    _source: MediaElementAudioSourceNode,
}

impl FrequencySource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_frequencies(&self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }

    fn resume(&self) {
        // Contexts created before a user gesture start suspended.
        if let Err(err) = self.context.resume() {
            log::debug!("audio context resume failed: {}", js_error_message(&err));
        }
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| ViewerError::SurfaceUnavailable(js_error_message(&e)))?
            .ok_or_else(|| ViewerError::SurfaceUnavailable("2d context unsupported".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::SurfaceUnavailable("not a 2d context".to_string()))?;
        Ok(Self { canvas, context })
    }
}

impl DrawingSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.context.set_fill_style_str(&color.css());
        self.context.fill_rect(x, y, width, height);
    }
}

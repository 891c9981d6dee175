use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ViewerError};
use crate::media::spectrum::DEFAULT_FFT_SIZE;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "mediaview.settings";

const MIN_FFT_SIZE: u32 = 32;
const MAX_FFT_SIZE: u32 = 32768;

/// Viewer settings stored in the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u32,
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,
    #[serde(default = "default_fft_size")]
    pub fft_size: u32,
    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

fn default_hide_delay_ms() -> u32 {
    5000
}

fn default_skip_seconds() -> f64 {
    10.0
}

fn default_fft_size() -> u32 {
    DEFAULT_FFT_SIZE as u32
}

fn default_brightness() -> f64 {
    1.0
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            hide_delay_ms: default_hide_delay_ms(),
            skip_seconds: default_skip_seconds(),
            fft_size: default_fft_size(),
            brightness: default_brightness(),
        }
    }
}

impl ViewerSettings {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.hide_delay_ms))
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size as usize
    }

    pub fn validate(self) -> Result<Self> {
        if !self.fft_size.is_power_of_two()
            || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size)
        {
            return Err(ViewerError::InvalidSettings(format!(
                "fft_size must be a power of two between {MIN_FFT_SIZE} and {MAX_FFT_SIZE}, got {}",
                self.fft_size
            )));
        }
        if !(self.skip_seconds.is_finite() && self.skip_seconds > 0.0) {
            return Err(ViewerError::InvalidSettings(format!(
                "skip_seconds must be positive, got {}",
                self.skip_seconds
            )));
        }
        Ok(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<ViewerSettings>(json)
            .map_err(|e| ViewerError::InvalidSettings(e.to_string()))?
            .validate()
    }
}

/// Load stored settings, falling back to defaults when nothing usable is stored.
#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> ViewerSettings {
    match LocalStorage::raw().get_item(SETTINGS_KEY) {
        Ok(Some(raw)) => settings_or_default(&raw),
        _ => ViewerSettings::default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &ViewerSettings) -> Result<()> {
    let json =
        serde_json::to_string(settings).map_err(|e| ViewerError::InvalidSettings(e.to_string()))?;
    LocalStorage::raw()
        .set_item(SETTINGS_KEY, &json)
        .map_err(|e| ViewerError::InvalidSettings(format!("{e:?}")))
}

// Native builds only run tests and tooling; keep settings in memory.
#[cfg(not(target_arch = "wasm32"))]
static NATIVE_SETTINGS: std::sync::Mutex<Option<String>> = std::sync::Mutex::new(None);

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> ViewerSettings {
    let stored = NATIVE_SETTINGS.lock().ok().and_then(|guard| guard.clone());
    match stored {
        Some(raw) => settings_or_default(&raw),
        None => ViewerSettings::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &ViewerSettings) -> Result<()> {
    let json =
        serde_json::to_string(settings).map_err(|e| ViewerError::InvalidSettings(e.to_string()))?;
    let mut guard = NATIVE_SETTINGS
        .lock()
        .map_err(|e| ViewerError::InvalidSettings(e.to_string()))?;
    *guard = Some(json);
    Ok(())
}

fn settings_or_default(raw: &str) -> ViewerSettings {
    match ViewerSettings::from_json(raw) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("ignoring stored settings: {err}");
            ViewerSettings::default()
        }
    }
}

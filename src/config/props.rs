//! Declarative view configuration.

use crate::constants::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A mode setting given either by symbolic name or raw native code.
///
/// Deserializes from a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeValue {
    /// Raw platform code, passed through as-is.
    Code(i64),
    /// Name looked up in the enumeration table.
    Name(String),
}

impl ModeValue {
    /// Creates a symbolic value.
    pub fn name(name: impl Into<String>) -> Self {
        ModeValue::Name(name.into())
    }
}

impl From<&str> for ModeValue {
    fn from(name: &str) -> Self {
        ModeValue::Name(name.to_owned())
    }
}

impl From<String> for ModeValue {
    fn from(name: String) -> Self {
        ModeValue::Name(name)
    }
}

impl From<i64> for ModeValue {
    fn from(code: i64) -> Self {
        ModeValue::Code(code)
    }
}

impl FromStr for ModeValue {
    type Err = Infallible;

    /// Integers become codes, anything else a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(ModeValue::Code)
            .unwrap_or_else(|_| ModeValue::name(s)))
    }
}

impl fmt::Display for ModeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeValue::Code(code) => write!(f, "{}", code),
            ModeValue::Name(name) => f.write_str(name),
        }
    }
}

/// Handler for an event payload delivered by the native layer.
pub type EventCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Free-form style attributes forwarded to the native view.
pub type Style = serde_json::Map<String, Value>;

/// Optional event hooks. Payloads are passed through untouched.
#[derive(Clone, Default)]
pub struct Callbacks {
    /// Invoked for every decoded barcode.
    pub on_bar_code_read: Option<EventCallback>,
    /// Invoked when the focus point changes.
    pub on_focus_changed: Option<EventCallback>,
    /// Invoked on pinch-to-zoom.
    pub on_zoom_changed: Option<EventCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_bar_code_read", &self.on_bar_code_read.is_some())
            .field("on_focus_changed", &self.on_focus_changed.is_some())
            .field("on_zoom_changed", &self.on_zoom_changed.is_some())
            .finish()
    }
}

/// Desired camera behaviour, as set by application code.
///
/// Mode fields accept names or codes; names are resolved against the
/// enumeration table only when props are handed to the native side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Preview scaling: `fill`, `fit`, `stretch`.
    pub aspect: Option<ModeValue>,
    /// Which sensor to use: `back`, `front`.
    #[serde(rename = "type")]
    pub camera_type: Option<ModeValue>,
    /// Preview orientation: `auto`, `portrait`, `landscapeLeft`, ...
    pub orientation: Option<ModeValue>,
    /// Flash for still captures: `off`, `on`, `auto`.
    pub flash_mode: Option<ModeValue>,
    /// Continuous light: `off`, `on`, `auto`.
    pub torch_mode: Option<ModeValue>,
    /// Record audio alongside video captures.
    pub capture_audio: bool,
    /// `still` or `video`.
    pub capture_mode: Option<ModeValue>,
    /// Where captures end up: `memory`, `disk`, `cameraRoll`, `temp`.
    pub capture_target: Option<ModeValue>,
    /// Show the platform's tap-to-focus indicator.
    pub default_on_focus_component: bool,
    /// Layout attributes passed to the native view.
    pub style: Style,
    /// Event hooks; not part of configuration files.
    #[serde(skip)]
    pub callbacks: Callbacks,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect: Some(ModeValue::name("fill")),
            camera_type: Some(ModeValue::name("back")),
            orientation: Some(ModeValue::name("auto")),
            flash_mode: Some(ModeValue::name("off")),
            torch_mode: Some(ModeValue::name("off")),
            capture_audio: true,
            capture_mode: Some(ModeValue::name("still")),
            capture_target: Some(ModeValue::name("cameraRoll")),
            default_on_focus_component: true,
            style: Style::new(),
            callbacks: Callbacks::default(),
        }
    }
}

impl CameraConfig {
    /// Returns the mode field bound to a category.
    ///
    /// Barcode types are not a view property and always yield `None`.
    pub fn mode(&self, category: Category) -> Option<&ModeValue> {
        match category {
            Category::Aspect => self.aspect.as_ref(),
            Category::CameraType => self.camera_type.as_ref(),
            Category::Orientation => self.orientation.as_ref(),
            Category::FlashMode => self.flash_mode.as_ref(),
            Category::TorchMode => self.torch_mode.as_ref(),
            Category::CaptureMode => self.capture_mode.as_ref(),
            Category::CaptureTarget => self.capture_target.as_ref(),
            Category::BarCodeType => None,
        }
    }

    /// Sets the aspect mode.
    pub fn with_aspect(mut self, value: impl Into<ModeValue>) -> Self {
        self.aspect = Some(value.into());
        self
    }

    /// Sets the camera facing.
    pub fn with_camera_type(mut self, value: impl Into<ModeValue>) -> Self {
        self.camera_type = Some(value.into());
        self
    }

    /// Sets the orientation.
    pub fn with_orientation(mut self, value: impl Into<ModeValue>) -> Self {
        self.orientation = Some(value.into());
        self
    }

    /// Sets the flash mode.
    pub fn with_flash_mode(mut self, value: impl Into<ModeValue>) -> Self {
        self.flash_mode = Some(value.into());
        self
    }

    /// Sets the torch mode.
    pub fn with_torch_mode(mut self, value: impl Into<ModeValue>) -> Self {
        self.torch_mode = Some(value.into());
        self
    }

    /// Sets the default capture mode.
    pub fn with_capture_mode(mut self, value: impl Into<ModeValue>) -> Self {
        self.capture_mode = Some(value.into());
        self
    }

    /// Sets the default capture target.
    pub fn with_capture_target(mut self, value: impl Into<ModeValue>) -> Self {
        self.capture_target = Some(value.into());
        self
    }

    /// Enables or disables audio capture.
    pub fn with_capture_audio(mut self, enabled: bool) -> Self {
        self.capture_audio = enabled;
        self
    }

    /// Adds a style attribute.
    pub fn with_style(mut self, key: impl Into<String>, value: Value) -> Self {
        self.style.insert(key.into(), value);
        self
    }

    /// Sets the barcode-read handler.
    pub fn on_bar_code_read(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.callbacks.on_bar_code_read = Some(Arc::new(f));
        self
    }

    /// Sets the focus-changed handler.
    pub fn on_focus_changed(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.callbacks.on_focus_changed = Some(Arc::new(f));
        self
    }

    /// Sets the zoom-changed handler.
    pub fn on_zoom_changed(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.callbacks.on_zoom_changed = Some(Arc::new(f));
        self
    }
}

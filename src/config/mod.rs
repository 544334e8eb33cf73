//! View configuration and configuration files.
//!
//! `CameraConfig` is the declarative property set an application hands
//! to a camera view. Mode fields stay symbolic here; translation to
//! native codes happens in [`crate::view::normalize`].

mod file;
mod props;

pub use file::{ConfigError, FileConfig};
pub use props::{CameraConfig, Callbacks, EventCallback, ModeValue, Style};

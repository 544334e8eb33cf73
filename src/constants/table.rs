//! Symbolic name to numeric code tables.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A configuration category with its own code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Preview scaling.
    Aspect,
    /// Barcode symbologies.
    BarCodeType,
    /// Front or back sensor.
    CameraType,
    /// Still or video.
    CaptureMode,
    /// Where captures are stored.
    CaptureTarget,
    /// Preview orientation.
    Orientation,
    /// Flash behaviour.
    FlashMode,
    /// Torch behaviour.
    TorchMode,
}

impl Category {
    /// All categories, in table order.
    pub const ALL: [Category; 8] = [
        Category::Aspect,
        Category::BarCodeType,
        Category::CameraType,
        Category::CaptureMode,
        Category::CaptureTarget,
        Category::Orientation,
        Category::FlashMode,
        Category::TorchMode,
    ];

    /// Key used for this category in table files.
    pub fn key(self) -> &'static str {
        match self {
            Category::Aspect => "aspect",
            Category::BarCodeType => "barcode_type",
            Category::CameraType => "camera_type",
            Category::CaptureMode => "capture_mode",
            Category::CaptureTarget => "capture_target",
            Category::Orientation => "orientation",
            Category::FlashMode => "flash_mode",
            Category::TorchMode => "torch_mode",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Name to code mapping for a single category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable(BTreeMap<String, i64>);

impl CodeTable {
    /// Looks up the code for a symbolic name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Reverse lookup, used for diagnostics.
    pub fn name_of(&self, code: i64) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, c)| **c == code)
            .map(|(name, _)| name.as_str())
    }

    /// Number of names in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, code)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, &code)| (name.as_str(), code))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The full enumeration table published by the native layer.
///
/// Immutable once constructed. Views hold it behind an `Arc` so a single
/// instance built at startup serves the whole process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constants {
    /// Aspect codes.
    #[serde(default)]
    pub aspect: CodeTable,
    /// Barcode type codes.
    #[serde(default)]
    pub barcode_type: CodeTable,
    /// Camera facing codes.
    #[serde(default)]
    pub camera_type: CodeTable,
    /// Capture mode codes.
    #[serde(default)]
    pub capture_mode: CodeTable,
    /// Capture target codes.
    #[serde(default)]
    pub capture_target: CodeTable,
    /// Orientation codes.
    #[serde(default)]
    pub orientation: CodeTable,
    /// Flash mode codes.
    #[serde(default)]
    pub flash_mode: CodeTable,
    /// Torch mode codes.
    #[serde(default)]
    pub torch_mode: CodeTable,
}

impl Constants {
    /// Codes used by the reference native camera implementation.
    pub fn platform_defaults() -> Self {
        Self {
            aspect: [("fill", 0), ("fit", 1), ("stretch", 2)].into_iter().collect(),
            barcode_type: [
                ("upce", 0),
                ("code39", 1),
                ("code39mod43", 2),
                ("ean13", 3),
                ("ean8", 4),
                ("code93", 5),
                ("code128", 6),
                ("pdf417", 7),
                ("qr", 8),
                ("aztec", 9),
            ]
            .into_iter()
            .collect(),
            camera_type: [("back", 1), ("front", 2)].into_iter().collect(),
            capture_mode: [("still", 0), ("video", 1)].into_iter().collect(),
            capture_target: [("memory", 0), ("disk", 1), ("cameraRoll", 2), ("temp", 3)]
                .into_iter()
                .collect(),
            orientation: [
                ("auto", 0),
                ("portrait", 1),
                ("portraitUpsideDown", 2),
                ("landscapeRight", 3),
                ("landscapeLeft", 4),
            ]
            .into_iter()
            .collect(),
            flash_mode: [("off", 0), ("on", 1), ("auto", 2)].into_iter().collect(),
            torch_mode: [("off", 0), ("on", 1), ("auto", 2)].into_iter().collect(),
        }
    }

    /// Returns the table for a category.
    pub fn table(&self, category: Category) -> &CodeTable {
        match category {
            Category::Aspect => &self.aspect,
            Category::BarCodeType => &self.barcode_type,
            Category::CameraType => &self.camera_type,
            Category::CaptureMode => &self.capture_mode,
            Category::CaptureTarget => &self.capture_target,
            Category::Orientation => &self.orientation,
            Category::FlashMode => &self.flash_mode,
            Category::TorchMode => &self.torch_mode,
        }
    }

    /// Looks up a symbolic name within a category.
    #[inline]
    pub fn code(&self, category: Category, name: &str) -> Option<i64> {
        self.table(category).get(name)
    }

    /// Loads a table from a TOML file.
    ///
    /// Each category is a TOML table of `name = code` pairs. Missing
    /// categories are left empty.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_defaults_cover_every_category() {
        let constants = Constants::platform_defaults();
        for category in Category::ALL {
            assert!(
                !constants.table(category).is_empty(),
                "{} table is empty",
                category
            );
        }
        assert_eq!(constants.code(Category::CaptureMode, "video"), Some(1));
        assert_eq!(constants.code(Category::CameraType, "front"), Some(2));
        assert_eq!(constants.code(Category::FlashMode, "sparkle"), None);
    }

    #[test]
    fn test_reverse_lookup() {
        let constants = Constants::platform_defaults();
        assert_eq!(constants.capture_target.name_of(2), Some("cameraRoll"));
        assert_eq!(constants.capture_target.name_of(42), None);
    }

    #[test]
    fn test_parse_partial_table() {
        let constants: Constants = toml::from_str(
            r#"
            [aspect]
            fill = 7
            fit = 8

            [capture_mode]
            still = 0
            video = 5
            "#,
        )
        .unwrap();

        assert_eq!(constants.code(Category::Aspect, "fill"), Some(7));
        assert_eq!(constants.code(Category::CaptureMode, "video"), Some(5));
        assert!(constants.torch_mode.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = Constants::from_file("/nonexistent/constants.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}

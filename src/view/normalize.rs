//! Translation of symbolic configuration into native codes.

use crate::bridge::NativeProps;
use crate::config::{CameraConfig, ModeValue};
use crate::constants::{Category, Constants};

/// Resolves a single mode value against its category table.
///
/// Codes pass through untouched. Names missing from the table resolve to
/// `None` and are left for the native side to default.
pub fn resolve(value: Option<&ModeValue>, category: Category, constants: &Constants) -> Option<i64> {
    match value? {
        ModeValue::Code(code) => Some(*code),
        ModeValue::Name(name) => {
            let code = constants.code(category, name);
            if code.is_none() {
                tracing::warn!(category = %category, name = %name, "Unknown symbolic name");
            }
            code
        }
    }
}

/// Builds the property set for the native view.
pub fn normalize(config: &CameraConfig, constants: &Constants) -> NativeProps {
    let code = |category: Category| resolve(config.mode(category), category, constants);

    NativeProps {
        aspect: code(Category::Aspect),
        camera_type: code(Category::CameraType),
        orientation: code(Category::Orientation),
        flash_mode: code(Category::FlashMode),
        torch_mode: code(Category::TorchMode),
        capture_mode: code(Category::CaptureMode),
        capture_target: code(Category::CaptureTarget),
        capture_audio: config.capture_audio,
        default_on_focus_component: config.default_on_focus_component,
        focus_events: config.callbacks.on_focus_changed.is_some(),
        zoom_events: config.callbacks.on_zoom_changed.is_some(),
        style: config.style.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_defaults_resolve_to_platform_codes() {
        let constants = Constants::platform_defaults();
        let props = normalize(&CameraConfig::default(), &constants);

        assert_eq!(props.aspect, Some(0));
        assert_eq!(props.camera_type, Some(1));
        assert_eq!(props.orientation, Some(0));
        assert_eq!(props.flash_mode, Some(0));
        assert_eq!(props.torch_mode, Some(0));
        assert_eq!(props.capture_mode, Some(0));
        assert_eq!(props.capture_target, Some(2));
        assert!(props.capture_audio);
        assert!(props.default_on_focus_component);
    }

    #[test]
    fn test_codes_pass_through() {
        let constants = Constants::platform_defaults();
        let config = CameraConfig::default()
            .with_aspect(99_i64)
            .with_torch_mode(-3_i64);
        let props = normalize(&config, &constants);

        assert_eq!(props.aspect, Some(99));
        assert_eq!(props.torch_mode, Some(-3));
    }

    #[test]
    fn test_unknown_and_unset_fields() {
        let constants = Constants::platform_defaults();
        let mut config = CameraConfig::default().with_flash_mode("strobe");
        config.orientation = None;
        let props = normalize(&config, &constants);

        assert_eq!(props.flash_mode, None);
        assert_eq!(props.orientation, None);
        // Other fields unaffected
        assert_eq!(props.camera_type, Some(1));
    }

    #[test]
    fn test_style_and_listener_flags() {
        let constants = Constants::platform_defaults();
        let config = CameraConfig::default()
            .with_style("flex", json!(1))
            .on_focus_changed(|_| {});
        let props = normalize(&config, &constants);

        assert_eq!(props.style.get("flex"), Some(&json!(1)));
        assert!(props.focus_events);
        assert!(!props.zoom_events);
    }

    #[test]
    fn test_custom_table() {
        let constants: Constants = toml::from_str(
            r#"
            [camera_type]
            back = 10
            front = 20
            "#,
        )
        .unwrap();
        let config = CameraConfig::default().with_camera_type("front");

        assert_eq!(normalize(&config, &constants).camera_type, Some(20));
    }

    fn any_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_known_names_resolve_to_table_code(category in any_category(), index in any::<prop::sample::Index>()) {
            let constants = Constants::platform_defaults();
            let entries: Vec<(String, i64)> = constants
                .table(category)
                .iter()
                .map(|(name, code)| (name.to_owned(), code))
                .collect();
            let (name, code) = &entries[index.index(entries.len())];

            let value = ModeValue::name(name.clone());
            prop_assert_eq!(resolve(Some(&value), category, &constants), Some(*code));
        }

        #[test]
        fn prop_codes_are_identity(category in any_category(), code in any::<i64>()) {
            let constants = Constants::platform_defaults();
            prop_assert_eq!(resolve(Some(&ModeValue::Code(code)), category, &constants), Some(code));
        }

        #[test]
        fn prop_normalized_flash_matches_table(name in "(off|on|auto)") {
            let constants = Constants::platform_defaults();
            let config = CameraConfig::default().with_flash_mode(name.as_str());
            let props = normalize(&config, &constants);
            prop_assert_eq!(props.flash_mode, constants.code(Category::FlashMode, &name));
            prop_assert!(props.flash_mode.is_some());
        }
    }
}

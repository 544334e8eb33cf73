//! In-process stand-ins for the native layer.
//!
//! `MockCameraModule` records every call it receives so tests and the demo
//! binary can observe exactly what crossed the boundary. Video captures
//! stay pending until `stop_capture` is called, like a real recorder.

use super::native::{
    CaptureOutput, CaptureRequest, NativeCameraModule, NativeError, NativeFuture, NativeProps,
    NativeView,
};
use crate::constants::Constants;
use futures::FutureExt;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

#[derive(Debug)]
struct ModuleState {
    authorization: Option<Result<bool, NativeError>>,
    capture_error: Option<NativeError>,
    field_of_view: Result<f64, NativeError>,
    has_flash: Result<bool, NativeError>,
    captures: Vec<CaptureRequest>,
    stop_calls: usize,
    // Stop signal for the video capture in flight, if any.
    recording: Option<Arc<Notify>>,
}

/// Mock native camera module.
#[derive(Debug)]
pub struct MockCameraModule {
    constants: Constants,
    state: Mutex<ModuleState>,
}

impl Default for MockCameraModule {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCameraModule {
    /// A module with platform default codes, granting authorization.
    pub fn new() -> Self {
        Self::with_constants(Constants::platform_defaults())
    }

    /// A module publishing `constants`.
    pub fn with_constants(constants: Constants) -> Self {
        Self {
            constants,
            state: Mutex::new(ModuleState {
                authorization: Some(Ok(true)),
                capture_error: None,
                field_of_view: Ok(62.5),
                has_flash: Ok(true),
                captures: Vec::new(),
                stop_calls: 0,
                recording: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ModuleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the authorization answer; `None` removes the query entirely.
    pub fn set_authorization(&self, answer: Option<Result<bool, NativeError>>) {
        self.state().authorization = answer;
    }

    /// Makes every following capture fail with `error`.
    pub fn fail_captures(&self, error: NativeError) {
        self.state().capture_error = Some(error);
    }

    /// Sets the field-of-view answer.
    pub fn set_field_of_view(&self, fov: Result<f64, NativeError>) {
        self.state().field_of_view = fov;
    }

    /// Sets the flash availability answer.
    pub fn set_has_flash(&self, has_flash: Result<bool, NativeError>) {
        self.state().has_flash = has_flash;
    }

    /// Requests received so far, oldest first.
    pub fn captures(&self) -> Vec<CaptureRequest> {
        self.state().captures.clone()
    }

    /// Number of `stop_capture` calls received.
    pub fn stop_calls(&self) -> usize {
        self.state().stop_calls
    }

    fn is_video(&self, request: &CaptureRequest) -> bool {
        request.mode.is_some() && request.mode == self.constants.capture_mode.get("video")
    }

    fn output_for(&self, request: &CaptureRequest, sequence: usize) -> CaptureOutput {
        let extension = if self.is_video(request) { "mov" } else { "jpg" };
        let in_memory = request.target.is_some()
            && request.target == self.constants.capture_target.get("memory");

        CaptureOutput {
            path: (!in_memory).then(|| format!("mock://capture/{}.{}", sequence, extension)),
            data: in_memory.then(|| format!("mock-frame-{}", sequence)),
            captured_at: chrono::Utc::now(),
        }
    }
}

impl NativeCameraModule for MockCameraModule {
    fn constants(&self) -> Constants {
        self.constants.clone()
    }

    fn check_device_authorization_status(&self) -> Option<NativeFuture<bool>> {
        let answer = self.state().authorization.clone()?;
        Some(futures::future::ready(answer).boxed())
    }

    fn capture(&self, request: CaptureRequest) -> NativeFuture<CaptureOutput> {
        let (sequence, error) = {
            let mut state = self.state();
            state.captures.push(request.clone());
            (state.captures.len(), state.capture_error.clone())
        };
        tracing::debug!(sequence, ?request, "MockCameraModule capture");

        if let Some(error) = error {
            return futures::future::ready(Err(error)).boxed();
        }

        let output = self.output_for(&request, sequence);
        if !self.is_video(&request) {
            return futures::future::ready(Ok(output)).boxed();
        }

        let stopped = Arc::new(Notify::new());
        self.state().recording = Some(Arc::clone(&stopped));
        async move {
            stopped.notified().await;
            Ok(output)
        }
        .boxed()
    }

    fn stop_capture(&self) {
        let recording = {
            let mut state = self.state();
            state.stop_calls += 1;
            state.recording.take()
        };
        if let Some(stopped) = recording {
            stopped.notify_one();
        }
        tracing::debug!("MockCameraModule stop_capture");
    }

    fn field_of_view(&self) -> Result<f64, NativeError> {
        self.state().field_of_view.clone()
    }

    fn has_flash(&self) -> Result<bool, NativeError> {
        self.state().has_flash.clone()
    }
}

/// Mock preview surface that records what it was given.
#[derive(Debug, Default)]
pub struct MockNativeView {
    renders: Mutex<Vec<NativeProps>>,
    raw_props: Mutex<Vec<serde_json::Map<String, Value>>>,
}

impl MockNativeView {
    /// Creates a view with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every property set rendered so far.
    pub fn renders(&self) -> Vec<NativeProps> {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent property set, if any.
    pub fn last_render(&self) -> Option<NativeProps> {
        self.renders().pop()
    }

    /// Raw property updates received through `set_native_props`.
    pub fn raw_props(&self) -> Vec<serde_json::Map<String, Value>> {
        self.raw_props
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NativeView for MockNativeView {
    fn render(&self, props: &NativeProps) {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(props.clone());
    }

    fn set_native_props(&self, props: serde_json::Map<String, Value>) {
        self.raw_props
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_request(target: i64) -> CaptureRequest {
        CaptureRequest {
            audio: false,
            mode: Some(0),
            target: Some(target),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_still_capture_to_memory() {
        let module = MockCameraModule::new();
        let output = module.capture(still_request(0)).await.unwrap();

        assert!(output.path.is_none());
        assert_eq!(output.data.as_deref(), Some("mock-frame-1"));
        assert_eq!(module.captures().len(), 1);
    }

    #[tokio::test]
    async fn test_still_capture_to_gallery() {
        let module = MockCameraModule::new();
        let output = module.capture(still_request(2)).await.unwrap();

        assert_eq!(output.path.as_deref(), Some("mock://capture/1.jpg"));
        assert!(output.data.is_none());
    }

    fn video_request() -> CaptureRequest {
        CaptureRequest {
            audio: true,
            mode: Some(1),
            target: Some(2),
            total_seconds: Some(-1.0),
            preferred_time_scale: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_video_capture_waits_for_stop() {
        let module = MockCameraModule::new();

        let pending = module.capture(video_request());
        module.stop_capture();
        let output = pending.await.unwrap();

        assert_eq!(output.path.as_deref(), Some("mock://capture/1.mov"));
        assert_eq!(module.stop_calls(), 1);
    }

    #[tokio::test]
    async fn test_idle_stop_does_not_end_next_video() {
        let module = MockCameraModule::new();
        module.stop_capture();

        let mut pending = module.capture(video_request());
        assert!((&mut pending).now_or_never().is_none());

        module.stop_capture();
        let output = pending.await.unwrap();
        assert_eq!(output.path.as_deref(), Some("mock://capture/1.mov"));
        assert_eq!(module.stop_calls(), 2);
    }

    #[tokio::test]
    async fn test_capture_failure() {
        let module = MockCameraModule::new();
        module.fail_captures(NativeError::rejected("E_DENIED", "no access"));

        let result = module.capture(still_request(1)).await;
        assert_eq!(result, Err(NativeError::rejected("E_DENIED", "no access")));
        // Failed requests are still recorded
        assert_eq!(module.captures().len(), 1);
    }

    #[test]
    fn test_authorization_query_can_be_absent() {
        let module = MockCameraModule::new();
        assert!(module.check_device_authorization_status().is_some());

        module.set_authorization(None);
        assert!(module.check_device_authorization_status().is_none());
    }
}

//! The camera view component.

use super::capture::{build_request, is_video_mode, CaptureOverrides};
use super::normalize::normalize;
use crate::bridge::{
    CaptureOutput, EventEmitter, NativeCameraModule, NativeError, NativeFuture, NativeProps,
    NativeView, Subscription, BAR_CODE_READ_EVENT,
};
use crate::config::{CameraConfig, Callbacks};
use crate::constants::Constants;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Lifecycle hooks a UI binding drives a component through.
pub trait Lifecycle {
    /// Called once the component is attached to the view tree.
    fn mount(&mut self);

    /// Called with new properties from the parent.
    fn update(&mut self, config: CameraConfig);

    /// Called before the component is detached.
    fn unmount(&mut self);

    /// Produces and applies the native property set.
    fn render(&self) -> NativeProps;
}

/// Client-visible component state.
#[derive(Debug, Default)]
pub struct ViewState {
    authorized: AtomicBool,
    recording: AtomicBool,
}

impl ViewState {
    /// True once the platform reported camera access as granted.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// True while a video capture started by this view is running.
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }
}

/// Events the native view reports directly to its component.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Focus point or state changed.
    FocusChanged(Value),
    /// Zoom factor changed.
    ZoomChanged(Value),
}

/// A declarative camera view backed by a native module and view.
pub struct CameraView {
    config: CameraConfig,
    /// Shared with the barcode listener so it always sees current hooks.
    callbacks: Arc<RwLock<Callbacks>>,
    constants: Arc<Constants>,
    module: Arc<dyn NativeCameraModule>,
    view: Arc<dyn NativeView>,
    events: EventEmitter,
    state: Arc<ViewState>,
    bar_code_subscription: Option<Subscription>,
    authorization_check: Option<JoinHandle<()>>,
}

impl CameraView {
    /// Creates an unmounted view. Nothing is sent to the native side yet.
    pub fn new(
        config: CameraConfig,
        constants: Arc<Constants>,
        module: Arc<dyn NativeCameraModule>,
        view: Arc<dyn NativeView>,
        events: EventEmitter,
    ) -> Self {
        Self {
            callbacks: Arc::new(RwLock::new(config.callbacks.clone())),
            config,
            constants,
            module,
            view,
            events,
            state: Arc::new(ViewState::default()),
            bar_code_subscription: None,
            authorization_check: None,
        }
    }

    /// Queries camera authorization directly on a native module.
    pub fn check_device_authorization_status(
        module: &dyn NativeCameraModule,
    ) -> Option<NativeFuture<bool>> {
        module.check_device_authorization_status()
    }

    /// The enumeration table this view resolves names with.
    pub fn constants(&self) -> &Arc<Constants> {
        &self.constants
    }

    /// Current configuration.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Shared authorization and recording flags.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Result of the last authorization check; false until it settles.
    pub fn is_authorized(&self) -> bool {
        self.state.is_authorized()
    }

    /// True while a video capture is running.
    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// True between `mount` and `unmount`.
    pub fn is_mounted(&self) -> bool {
        self.bar_code_subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Normalized property set, without handing it to the native view.
    pub fn describe(&self) -> NativeProps {
        normalize(&self.config, &self.constants)
    }

    /// Starts a capture and returns the native result handle.
    ///
    /// The native call is issued before this returns. Video captures mark
    /// the view as recording until [`CameraView::stop_capture`].
    pub fn capture(&self, overrides: CaptureOverrides) -> NativeFuture<CaptureOutput> {
        let request = build_request(&self.config, &self.constants, overrides);

        if is_video_mode(request.mode, &self.constants) {
            self.state.recording.store(true, Ordering::SeqCst);
            info!(
                total_seconds = ?request.total_seconds,
                time_scale = ?request.preferred_time_scale,
                "Video capture started"
            );
        }

        debug!(?request, "Dispatching capture");
        self.module.capture(request)
    }

    /// Stops a running video capture. Does nothing when idle.
    pub fn stop_capture(&self) {
        if self.state.recording.swap(false, Ordering::SeqCst) {
            self.module.stop_capture();
            info!("Video capture stopped");
        }
    }

    /// Field of view reported by the native module, in degrees.
    pub fn field_of_view(&self) -> Result<f64, NativeError> {
        self.module.field_of_view()
    }

    /// Whether the active sensor has a flash.
    pub fn has_flash(&self) -> Result<bool, NativeError> {
        self.module.has_flash()
    }

    /// Applies raw properties to the native view without normalization.
    pub fn set_native_props(&self, props: serde_json::Map<String, Value>) {
        self.view.set_native_props(props);
    }

    /// Relays an event reported by the native view to its callback.
    pub fn dispatch_view_event(&self, event: ViewEvent) {
        let callbacks = self.callbacks.read().unwrap_or_else(PoisonError::into_inner);
        let (callback, payload) = match &event {
            ViewEvent::FocusChanged(payload) => (&callbacks.on_focus_changed, payload),
            ViewEvent::ZoomChanged(payload) => (&callbacks.on_zoom_changed, payload),
        };

        match callback {
            Some(callback) => {
                trace!(?event, "Relaying view event");
                callback(payload);
            }
            None => trace!(?event, "No handler for view event"),
        }
    }

    /// Waits for the authorization check started by `mount`, if any.
    pub async fn authorization_settled(&mut self) {
        if let Some(check) = self.authorization_check.take() {
            // Aborted checks leave the view unauthorized.
            let _ = check.await;
        }
    }

    fn start_authorization_check(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; camera stays unauthorized");
            return;
        };
        let Some(query) = self.module.check_device_authorization_status() else {
            debug!("Native module has no authorization query");
            return;
        };

        let state = Arc::clone(&self.state);
        self.authorization_check = Some(runtime.spawn(async move {
            match query.await {
                Ok(granted) => {
                    state.authorized.store(granted, Ordering::SeqCst);
                    info!(granted, "Camera authorization resolved");
                }
                Err(e) => warn!(error = %e, "Authorization query failed"),
            }
        }));
    }

    fn listen_for_bar_codes(&mut self) {
        let callbacks = Arc::clone(&self.callbacks);
        let relay = move |payload: &Value| {
            let callback = callbacks
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .on_bar_code_read
                .clone();
            if let Some(callback) = callback {
                trace!("Relaying barcode read");
                callback(payload);
            }
        };
        self.bar_code_subscription =
            Some(self.events.add_listener(BAR_CODE_READ_EVENT, Arc::new(relay)));
    }
}

impl Lifecycle for CameraView {
    fn mount(&mut self) {
        if self.is_mounted() {
            warn!("CameraView mounted twice; keeping existing listener");
            return;
        }

        self.start_authorization_check();
        self.listen_for_bar_codes();
        info!(
            bar_code_relay = self.config.callbacks.on_bar_code_read.is_some(),
            "CameraView mounted"
        );
    }

    fn update(&mut self, config: CameraConfig) {
        *self.callbacks.write().unwrap_or_else(PoisonError::into_inner) = config.callbacks.clone();
        self.config = config;
        self.render();
    }

    fn unmount(&mut self) {
        if let Some(mut subscription) = self.bar_code_subscription.take() {
            subscription.remove();
        }
        if let Some(check) = self.authorization_check.take() {
            check.abort();
        }
        if self.state.is_recording() {
            self.stop_capture();
        }
        info!("CameraView unmounted");
    }

    fn render(&self) -> NativeProps {
        let props = self.describe();
        debug!(?props, "Rendering native view");
        self.view.render(&props);
        props
    }
}

impl std::fmt::Debug for CameraView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraView")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

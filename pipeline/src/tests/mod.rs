//! Cross-module scenarios driven through [`IslandPipeline`] with recording
//! fakes for every collaborator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};

use crate::app::{Collaborators, IslandPipeline};
use crate::backend::BackendPreference;
use crate::config::PipelineConfig;
use crate::notification::NotificationEvent;
use crate::platform::{
    AppMetadata, Bitmap, CapabilityProbe, DeviceLock, IconRef, NativeEnvelope, NotificationSink,
    PlatformError,
};
use crate::render::overlay::testing::RecordingSurface;
use crate::render::overlay::{IslandView, ManualUiQueue, OverlayWindow};

mod lifecycle;
mod switchover;

pub(crate) type Log = Arc<Mutex<Vec<String>>>;

struct Meta;

impl AppMetadata for Meta {
    fn label(&self, app_id: &str) -> Result<String, PlatformError> {
        match app_id {
            "com.example.chat" => Ok("Chat".into()),
            _ => Err(PlatformError::NotFound(app_id.into())),
        }
    }

    fn launcher_icon(&self, _app_id: &str) -> Result<Bitmap, PlatformError> {
        Ok(Arc::new(RgbaImage::from_pixel(24, 24, Rgba([220, 60, 40, 255]))))
    }

    fn load_icon(&self, _icon: &IconRef) -> Result<Bitmap, PlatformError> {
        Err(PlatformError::NotFound("icon".into()))
    }
}

/// Logs `notify <id>` / `cancel <id>` into the shared log.
struct Sink {
    log: Log,
    posted: Mutex<Vec<NativeEnvelope>>,
}

impl NotificationSink for Sink {
    fn notify(&self, id: i32, envelope: &NativeEnvelope) -> Result<(), PlatformError> {
        self.log.lock().unwrap().push(format!("notify {id}"));
        self.posted.lock().unwrap().push(envelope.clone());
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<(), PlatformError> {
        self.log.lock().unwrap().push(format!("cancel {id}"));
        Ok(())
    }
}

struct Probe {
    native: AtomicBool,
    overlay: AtomicBool,
}

impl CapabilityProbe for Probe {
    fn native_supported(&self) -> Result<bool, PlatformError> {
        Ok(self.native.load(Ordering::SeqCst))
    }

    fn overlay_permitted(&self) -> Result<bool, PlatformError> {
        Ok(self.overlay.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
struct Device(AtomicBool);

impl DeviceLock for Device {
    fn is_locked(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct Harness {
    pipeline: IslandPipeline,
    queue: Arc<ManualUiQueue>,
    sink: Arc<Sink>,
    device: Arc<Device>,
    log: Log,
    bound: Arc<Mutex<Vec<IslandView>>>,
}

impl Harness {
    fn new() -> Self {
        let log: Log = Arc::default();
        let surface = RecordingSurface::with_log(log.clone());
        let bound = surface.bound.clone();
        let queue = Arc::new(ManualUiQueue::new(OverlayWindow::new(Box::new(surface))));
        let sink = Arc::new(Sink {
            log: log.clone(),
            posted: Mutex::new(Vec::new()),
        });
        let device = Arc::new(Device::default());
        let pipeline = IslandPipeline::new(Collaborators {
            metadata: Arc::new(Meta),
            sink: sink.clone(),
            probe: Arc::new(Probe {
                native: AtomicBool::new(true),
                overlay: AtomicBool::new(true),
            }),
            device: device.clone(),
            ui_queue: queue.clone(),
        });
        Self {
            pipeline,
            queue,
            sink,
            device,
            log,
            bound,
        }
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn overlay_children(&self) -> usize {
        self.queue.with_window(|w| w.child_count())
    }
}

fn config(backend: BackendPreference) -> PipelineConfig {
    PipelineConfig {
        backend,
        ..PipelineConfig::default()
    }
}

fn chat(key: &str, text: &str) -> NotificationEvent {
    let mut e = NotificationEvent::new(key, "com.example.chat");
    e.title = Some("Alice".into());
    e.text = Some(text.into());
    e
}

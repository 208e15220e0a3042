use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::Result;
use crate::frame::Frame;
use crate::io::sink::FrameSink;
use crate::stack::{AccumulationWindow, WindowAccumulator};

use super::config::StackSettings;
use super::types::Outcome;

/// Shared entry point for frames coming from the host's save notification.
///
/// Frames are processed one at a time: the accumulator lock is held from
/// validation through the sink write, so a merge and its flush can't be
/// interleaved with another frame.
pub struct CropStacker {
    accumulator: Mutex<WindowAccumulator>,
    settings: RwLock<StackSettings>,
    sink: Arc<dyn FrameSink>,
}

impl CropStacker {
    pub fn new(settings: StackSettings, sink: Arc<dyn FrameSink>) -> Self {
        Self {
            accumulator: Mutex::new(WindowAccumulator::new()),
            settings: RwLock::new(settings),
            sink,
        }
    }

    pub fn on_frame(&self, frame: &Frame) -> Result<Outcome> {
        let settings = self.settings.read().clone();
        self.accumulator
            .lock()
            .process(frame, &settings, self.sink.as_ref())
    }

    pub fn settings(&self) -> StackSettings {
        self.settings.read().clone()
    }

    /// Takes effect from the next frame.
    pub fn set_settings(&self, settings: StackSettings) {
        *self.settings.write() = settings;
    }

    pub fn is_accumulating(&self) -> bool {
        !self.accumulator.lock().window().is_empty()
    }

    /// Number of frames summed into the open window, 0 if none is open.
    pub fn pending_frames(&self) -> usize {
        match self.accumulator.lock().window() {
            AccumulationWindow::Empty => 0,
            AccumulationWindow::Accumulating(open) => open.frame_count,
        }
    }

    /// Discard the open window, e.g. when the capture session ends.
    pub fn reset(&self) {
        self.accumulator.lock().reset();
    }
}

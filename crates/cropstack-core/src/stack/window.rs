use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::crop::crop_frame;
use crate::error::Result;
use crate::frame::Frame;
use crate::ingest::{self, Exposure};
use crate::io::sink::FrameSink;
use crate::pipeline::config::StackSettings;
use crate::pipeline::{Outcome, ResetReason};

use super::flush::flush;
use super::sum::sum_frames;

/// Pointing and crop parameters recorded from the first frame of a window.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub observed_at: DateTime<Local>,
    pub ra_degrees: f64,
    pub dec_degrees: f64,
    pub crop_fraction: f64,
}

impl Anchor {
    /// Why a frame with these parameters cannot join the window, if it can't.
    ///
    /// Comparison is exact float equality: any change in the reported
    /// coordinates, however small, counts as a slew.
    pub fn mismatch(&self, ra: f64, dec: f64, crop_fraction: f64) -> Option<ResetReason> {
        if ra != self.ra_degrees || dec != self.dec_degrees {
            Some(ResetReason::Slew)
        } else if crop_fraction != self.crop_fraction {
            Some(ResetReason::CropFractionChanged)
        } else {
            None
        }
    }
}

/// An accumulation window holding at least one frame.
#[derive(Clone, Debug)]
pub struct OpenWindow {
    pub anchor: Anchor,
    /// Running sum, at the crop's dimensions.
    pub accumulated: Frame,
    pub frame_count: usize,
    pub total_exposure_seconds: f64,
}

#[derive(Clone, Debug, Default)]
pub enum AccumulationWindow {
    #[default]
    Empty,
    Accumulating(OpenWindow),
}

impl AccumulationWindow {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        match self {
            Self::Empty => None,
            Self::Accumulating(open) => Some(&open.anchor),
        }
    }
}

/// Crops incoming frames and sums them until the aggregation window is
/// exhausted, then hands the stack to a sink.
///
/// Not synchronized; see [`crate::pipeline::CropStacker`] for the shared entry point.
#[derive(Debug, Default)]
pub struct WindowAccumulator {
    window: AccumulationWindow,
}

impl WindowAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> &AccumulationWindow {
        &self.window
    }

    /// Drop whatever has been accumulated.
    pub fn reset(&mut self) {
        self.window = AccumulationWindow::Empty;
    }

    /// Run one frame through validation, cropping, summing and flushing.
    ///
    /// Skips and resets are returned as outcomes. Crop and dimension errors
    /// leave the window empty; sink errors leave the merged window in place
    /// so the next frame past the threshold flushes it again.
    pub fn process(
        &mut self,
        frame: &Frame,
        settings: &StackSettings,
        sink: &dyn FrameSink,
    ) -> Result<Outcome> {
        let settings = settings.normalized();

        let exposure = match ingest::validate(frame) {
            Ok(exposure) => exposure,
            Err(reason) => {
                warn!(reason = %reason, "Skipping frame");
                return Ok(Outcome::Skipped(reason));
            }
        };

        let mut open = match std::mem::take(&mut self.window) {
            AccumulationWindow::Empty => return self.seed(frame, &exposure, &settings),
            AccumulationWindow::Accumulating(open) => open,
        };

        if !settings.is_enabled() {
            info!(
                discarded_frames = open.frame_count,
                "Cropping disabled, discarding accumulated frames"
            );
            return Ok(Outcome::Reset(ResetReason::Disabled));
        }

        if let Some(reason) =
            open.anchor
                .mismatch(exposure.ra_degrees, exposure.dec_degrees, settings.crop_fraction)
        {
            info!(
                %reason,
                ra = exposure.ra_degrees,
                dec = exposure.dec_degrees,
                crop_fraction = settings.crop_fraction,
                discarded_frames = open.frame_count,
                "Resetting accumulation window"
            );
            return Ok(Outcome::Reset(reason));
        }

        let merged = crop_frame(frame, settings.crop_fraction)
            .and_then(|cropped| sum_frames(&open.accumulated, &cropped))
            .inspect_err(|e| warn!(error = %e, "Dropping accumulation window"))?;

        open.accumulated = merged;
        open.frame_count += 1;
        open.total_exposure_seconds += exposure.exposure_seconds;

        let elapsed_seconds = elapsed_seconds(&open.anchor, &exposure);
        if elapsed_seconds > settings.aggregation_window_seconds {
            match flush(&open, elapsed_seconds, sink) {
                Ok(report) => Ok(Outcome::Flushed(report)),
                Err(e) => {
                    warn!(error = %e, frames = open.frame_count, "Flush failed, keeping window");
                    self.window = AccumulationWindow::Accumulating(open);
                    Err(e)
                }
            }
        } else {
            debug!(
                frames = open.frame_count,
                elapsed_seconds, "Merged frame into window"
            );
            let frame_count = open.frame_count;
            self.window = AccumulationWindow::Accumulating(open);
            Ok(Outcome::Merged {
                frame_count,
                elapsed_seconds,
            })
        }
    }

    fn seed(
        &mut self,
        frame: &Frame,
        exposure: &Exposure,
        settings: &StackSettings,
    ) -> Result<Outcome> {
        if !settings.is_enabled() {
            debug!("Cropping disabled, frame not accumulated");
            return Ok(Outcome::Disabled);
        }

        let cropped = crop_frame(frame, settings.crop_fraction)
            .inspect_err(|e| warn!(error = %e, "Cannot open accumulation window"))?;
        let (width, height) = (cropped.width(), cropped.height());

        debug!(
            ra = exposure.ra_degrees,
            dec = exposure.dec_degrees,
            crop_fraction = settings.crop_fraction,
            width,
            height,
            "Opened accumulation window"
        );

        self.window = AccumulationWindow::Accumulating(OpenWindow {
            anchor: Anchor {
                observed_at: exposure.observed_at,
                ra_degrees: exposure.ra_degrees,
                dec_degrees: exposure.dec_degrees,
                crop_fraction: settings.crop_fraction,
            },
            accumulated: cropped,
            frame_count: 1,
            total_exposure_seconds: exposure.exposure_seconds,
        });

        Ok(Outcome::Seeded { width, height })
    }
}

/// Seconds from the anchor's exposure start to the end of this exposure.
fn elapsed_seconds(anchor: &Anchor, exposure: &Exposure) -> f64 {
    let since_anchor = exposure.observed_at.signed_duration_since(anchor.observed_at);
    since_anchor.num_milliseconds() as f64 / 1000.0 + exposure.exposure_seconds
}

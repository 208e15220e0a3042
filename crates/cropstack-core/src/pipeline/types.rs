use crate::ingest::SkipReason;
use crate::stack::FlushReport;

/// Why an accumulation window was discarded without being flushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    /// RA or Dec differs from the anchor frame.
    Slew,
    /// The operator changed the crop fraction mid-window.
    CropFractionChanged,
    /// Cropping was switched off.
    Disabled,
}

impl std::fmt::Display for ResetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slew => write!(f, "slew detected"),
            Self::CropFractionChanged => write!(f, "crop fraction changed"),
            Self::Disabled => write!(f, "cropping disabled"),
        }
    }
}

/// What happened to a single frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The frame lacked required metadata; the window is unchanged.
    Skipped(SkipReason),
    /// Cropping is disabled and no window was open.
    Disabled,
    /// The frame opened a new window.
    Seeded { width: usize, height: usize },
    /// The frame was added to the open window.
    Merged {
        frame_count: usize,
        elapsed_seconds: f64,
    },
    /// The open window was discarded and the frame dropped.
    Reset(ResetReason),
    /// The frame was added and the window written out.
    Flushed(FlushReport),
}

impl Outcome {
    /// Whether the frame's pixels ended up in the accumulated sum.
    pub fn accumulated(&self) -> bool {
        matches!(
            self,
            Self::Seeded { .. } | Self::Merged { .. } | Self::Flushed(_)
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "Skipped ({reason})"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Seeded { width, height } => write!(f, "Seeded {width}x{height}"),
            Self::Merged {
                frame_count,
                elapsed_seconds,
            } => write!(f, "Merged ({frame_count} frames, {elapsed_seconds:.1}s)"),
            Self::Reset(reason) => write!(f, "Reset ({reason})"),
            Self::Flushed(report) => write!(
                f,
                "Flushed {} frames ({}x{})",
                report.frame_count, report.width, report.height
            ),
        }
    }
}

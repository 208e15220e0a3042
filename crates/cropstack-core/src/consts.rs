/// Largest value a single sample can hold.
pub const MAX_SAMPLE_VALUE: u64 = u16::MAX as u64;

/// Bit depth of the only supported sample type.
pub const SAMPLE_BIT_DEPTH: u8 = 16;

/// Minimum pixel count (h*w) to use Rayon parallelism when summing buffers.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default fraction of the source width/height kept by the centered crop.
pub const DEFAULT_CROP_FRACTION: f64 = 0.2;

/// Default aggregation window in seconds.
pub const DEFAULT_AGGREGATION_WINDOW_SECONDS: f64 = 60.0;

/// Upper bound for the aggregation window in seconds.
pub const MAX_AGGREGATION_WINDOW_SECONDS: f64 = 120.0;

/// Name of the directory, next to the original frame, that receives stacked output.
pub const CROP_SUBDIRECTORY: &str = "crop";

/// Header key: number of frames summed into a stacked frame.
pub const HEADER_STACK_COUNT: &str = "STACKCNT";

/// Header key: total exposure (seconds) of the frames summed into a stacked frame.
pub const HEADER_TOTAL_EXPOSURE: &str = "TOTALEXP";

/// Header key: crop fraction the stacked frame was produced with.
pub const HEADER_CROP_FRACTION: &str = "CROPFRAC";

/// Header key: elapsed seconds from the anchor frame when the window was flushed.
pub const HEADER_STACK_SPAN: &str = "STACKSPAN";

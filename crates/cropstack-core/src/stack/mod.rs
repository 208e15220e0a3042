pub mod flush;
pub mod sum;
pub mod window;

pub use flush::FlushReport;
pub use window::{AccumulationWindow, Anchor, WindowAccumulator};

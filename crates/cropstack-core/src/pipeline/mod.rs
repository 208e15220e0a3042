pub mod config;
mod stacker;
mod types;

pub use stacker::CropStacker;
pub use types::{Outcome, ResetReason};

pub mod image_io;
pub mod manifest;
pub mod sidecar;
pub mod sink;

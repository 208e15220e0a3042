pub mod consts;
pub mod crop;
pub mod error;
pub mod frame;
pub mod ingest;
pub mod io;
pub mod pipeline;
pub mod stack;

//! Frame replay pipeline.

mod frames;
mod processor;

pub use frames::{parse_frame_line, read_frames};
pub use processor::{ProcessResult, process_file, process_frames};

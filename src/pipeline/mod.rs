//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{collect_input_files, output_dir_for, output_path_for};
pub use processor::{ProcessResult, process_recording};

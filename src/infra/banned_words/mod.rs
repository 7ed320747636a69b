// Banned-word infra layer.
// - `file_source.rs` reads the list from a newline-separated text file.

#[path = "file_source.rs"]
pub mod file_source;

pub use file_source::FileBannedWordSource;

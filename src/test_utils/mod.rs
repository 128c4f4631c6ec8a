//! Test utilities for rfscope

pub mod mock_file_system;

pub use mock_file_system::MockFileSystem;

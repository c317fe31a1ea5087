//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileOutputConfig, FileProviderConfig,
    FileReplConfig,
};
pub use loader::ConfigLoader;

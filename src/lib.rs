pub mod audio;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod logging;
pub mod narrative;
pub mod presentation;
pub mod renderer;
pub mod shell;
pub mod timer;
pub mod types;

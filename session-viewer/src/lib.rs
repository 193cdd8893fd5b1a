pub mod backend;
pub mod config;
pub mod lookup;
pub mod surface;
pub mod utils;
pub mod viewer;

// Re-export commonly used items
pub use config::AppConfig;
pub use utils::errors::{Result, ViewerError};
pub use viewer::SessionViewer;

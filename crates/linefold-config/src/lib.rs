pub mod config;

pub use config::{SidebarConfig, CONFIG_FILE_NAME};

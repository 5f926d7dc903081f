pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::directory::CityDirectory;
pub use core::engine::ReportEngine;
pub use core::pipeline::MigrationPipeline;
pub use utils::error::{MobilityError, Result};

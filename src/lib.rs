pub mod errors;
pub mod config;
pub mod detect;
pub mod rasterize;
pub mod batch;
pub mod lessons;
pub mod utils;
pub mod commands;

pub use errors::{IllustError, IllustResult};
pub use config::{AppConfig, ExtractionParams};
pub use detect::{IllustrationBox, IllustrationExtractor, Region};
pub use rasterize::{PdftoppmRasterizer, Rasterizer};
pub use batch::{discover_pages, BatchDriver, BatchSummary, PageDocument};

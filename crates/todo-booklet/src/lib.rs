mod assemble;
pub mod builder;
pub mod canvas;
#[cfg(feature = "serde")]
mod config;
pub mod constants;
pub mod layout;
pub mod metrics;
mod options;
mod preview;
pub mod registry;
mod stats;
mod types;

pub use assemble::{assemble, build_document, generate_booklet, save_pdf};
#[cfg(feature = "serde")]
pub use config::ConfigMap;
pub use layout::LayoutParameters;
pub use options::*;
pub use preview::{build_preview, generate_preview, preview_footer};
pub use stats::calculate_statistics;
pub use types::*;

//! Layout calculation for booklet pages
//!
//! This module holds the resolved parameters and all geometric calculations:
//! - Item numbering (global index, page-relative number, location)
//! - List page rows, columns, number placement and icon boxes
//! - Index table slots
//! - Detail page header and navigation positions

mod geometry;
mod types;

pub use geometry::*;
pub use types::*;

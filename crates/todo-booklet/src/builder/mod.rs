//! Page builders
//!
//! Each builder draws one kind of page through the [`Canvas`] trait:
//! - Tile pattern: the dot grid, drawn once as a reusable block
//! - Index page: links to every list page
//! - List pages: todo lines linking to their detail pages
//! - Detail chains: dot grid pages with back, index and prev/next links
//! - Title page: the optional cover
//!
//! [`Canvas`]: crate::canvas::Canvas

mod detail;
mod index;
mod list;
mod tile;
mod title;

pub use detail::{build_detail_chain, build_detail_page, detail_header};
pub use index::build_index_page;
pub use list::{ListPageLayout, build_list_page, draw_list_page};
pub use tile::{TILE_BLOCK_NAME, TilePattern};
pub use title::build_title_page;

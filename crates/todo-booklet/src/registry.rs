//! Named bookmarks and deferred link resolution
//!
//! List pages link forward to detail pages that are emitted much later, so a
//! link may name a bookmark that does not exist yet. Links are recorded as
//! [`LinkTarget::Pending`] and resolved once, after the last page.

use crate::layout::Rect;
use crate::types::{BookletError, Result};
use std::collections::BTreeMap;

/// Bookmark of the index page
pub const INDEX_BOOKMARK: &str = "index";

/// Bookmark of list page `page_number` (1-based)
pub fn list_page_bookmark(page_number: usize) -> String {
    format!("page_{page_number}")
}

/// Bookmark of detail page `detail_number` (1-based) of item `item`
pub fn detail_bookmark(item: usize, detail_number: usize) -> String {
    format!("detail_{item}_{detail_number}")
}

/// Where a link points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// The bookmark was not registered yet when the link was added
    Pending { name: String },
    Resolved { name: String, page: usize },
}

/// A clickable region recorded on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLink {
    /// 0-based page holding the region
    pub page: usize,
    pub rect: Rect,
    pub target: LinkTarget,
}

/// A clickable region with a known destination page
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    /// 0-based page holding the region
    pub page: usize,
    pub rect: Rect,
    /// Bookmark name the link was created with
    pub target: String,
    /// 0-based destination page
    pub target_page: usize,
}

/// Append-only table of bookmarks and links for one document
#[derive(Debug, Default)]
pub struct BookmarkRegistry {
    bookmarks: BTreeMap<String, usize>,
    links: Vec<PendingLink>,
}

impl BookmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as pointing at 0-based `page`
    pub fn register(&mut self, name: &str, page: usize) -> Result<()> {
        if self.bookmarks.contains_key(name) {
            return Err(BookletError::DuplicateBookmark(name.to_string()));
        }
        self.bookmarks.insert(name.to_string(), page);
        Ok(())
    }

    /// Record a link; never fails, unknown targets stay pending
    pub fn add_link(&mut self, page: usize, rect: Rect, target: &str) {
        let target = match self.bookmarks.get(target) {
            Some(&target_page) => LinkTarget::Resolved {
                name: target.to_string(),
                page: target_page,
            },
            None => LinkTarget::Pending {
                name: target.to_string(),
            },
        };
        self.links.push(PendingLink { page, rect, target });
    }

    pub fn page_of(&self, name: &str) -> Option<usize> {
        self.bookmarks.get(name).copied()
    }

    pub fn links(&self) -> &[PendingLink] {
        &self.links
    }

    /// Links whose target was unknown when they were added
    pub fn pending_count(&self) -> usize {
        self.links
            .iter()
            .filter(|link| matches!(link.target, LinkTarget::Pending { .. }))
            .count()
    }

    /// Resolve every link against the final bookmark table.
    ///
    /// A link whose target was never registered is a construction bug and
    /// fails the whole document.
    pub fn resolve(self) -> Result<(BTreeMap<String, usize>, Vec<ResolvedLink>)> {
        let mut resolved = Vec::with_capacity(self.links.len());
        for link in self.links {
            let (name, target_page) = match link.target {
                LinkTarget::Resolved { name, page } => (name, page),
                LinkTarget::Pending { name } => match self.bookmarks.get(&name) {
                    Some(&page) => (name, page),
                    None => {
                        return Err(BookletError::UnresolvedBookmark {
                            name,
                            page: link.page + 1,
                        });
                    }
                },
            };
            resolved.push(ResolvedLink {
                page: link.page,
                rect: link.rect,
                target: name,
                target_page,
            });
        }
        Ok((self.bookmarks, resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_bookmark_names() {
        assert_eq!(list_page_bookmark(2), "page_2");
        assert_eq!(detail_bookmark(3, 1), "detail_3_1");
    }

    #[test]
    fn test_backward_link_resolves_immediately() {
        let mut registry = BookmarkRegistry::new();
        registry.register(INDEX_BOOKMARK, 0).unwrap();
        registry.add_link(1, rect(), INDEX_BOOKMARK);

        assert_eq!(registry.pending_count(), 0);
        assert_eq!(
            registry.links()[0].target,
            LinkTarget::Resolved {
                name: "index".into(),
                page: 0
            }
        );
    }

    #[test]
    fn test_forward_link_resolves_at_finish() {
        let mut registry = BookmarkRegistry::new();
        registry.add_link(1, rect(), "detail_1_1");
        assert_eq!(registry.pending_count(), 1);

        registry.register("detail_1_1", 5).unwrap();
        let (_, links) = registry.resolve().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].page, 1);
        assert_eq!(links[0].target_page, 5);
        assert_eq!(links[0].target, "detail_1_1");
    }

    #[test]
    fn test_unresolved_link_is_fatal() {
        let mut registry = BookmarkRegistry::new();
        registry.add_link(3, rect(), "detail_99_1");

        match registry.resolve() {
            Err(BookletError::UnresolvedBookmark { name, page }) => {
                assert_eq!(name, "detail_99_1");
                assert_eq!(page, 4);
            }
            other => panic!("expected UnresolvedBookmark, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_bookmark_rejected() {
        let mut registry = BookmarkRegistry::new();
        registry.register("page_1", 1).unwrap();
        assert!(matches!(
            registry.register("page_1", 2),
            Err(BookletError::DuplicateBookmark(name)) if name == "page_1"
        ));
        assert_eq!(registry.page_of("page_1"), Some(1));
    }
}

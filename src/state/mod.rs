/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The per-page upload → analyse → display workflow (workflow.rs)

pub mod data;
pub mod workflow;

use crate::analysis::Page;
use workflow::PageState;

/// State of every page, kept alive while the user navigates between them
#[derive(Debug, Clone)]
pub struct Pages {
    pages: [PageState; 5],
}

impl Pages {
    pub fn new() -> Self {
        Self {
            pages: Page::ALL.map(PageState::new),
        }
    }

    pub fn get(&self, page: Page) -> &PageState {
        &self.pages[Self::index(page)]
    }

    pub fn get_mut(&mut self, page: Page) -> &mut PageState {
        &mut self.pages[Self::index(page)]
    }

    /// True while any page has a submission in flight
    pub fn any_loading(&self) -> bool {
        self.pages.iter().any(PageState::is_loading)
    }

    fn index(page: Page) -> usize {
        match page {
            Page::Variant => 0,
            Page::Elevation => 1,
            Page::Fiber => 2,
            Page::Stroke => 3,
            Page::Report => 4,
        }
    }
}

impl Default for Pages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Endpoint;
    use data::SelectedImage;

    #[test]
    fn test_pages_are_in_order() {
        let pages = Pages::new();
        for page in Page::ALL {
            assert_eq!(pages.get(page).page, page);
        }
    }

    #[test]
    fn test_any_loading() {
        let mut pages = Pages::new();
        assert!(!pages.any_loading());

        let stroke = pages.get_mut(Page::Stroke);
        stroke.select(Endpoint::Stroke, SelectedImage::new("/tmp/stroke.jpg".into()));
        stroke.begin_submit(Endpoint::Stroke);

        assert!(pages.any_loading());
        assert!(!pages.get(Page::Fiber).is_loading());
    }
}

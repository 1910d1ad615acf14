//! Demo gallery content
//!
//! The adapter's size is reported by the background loader as a raw count
//! with negative sentinels; binding a page gives it its index and a decoded
//! image.

use folio_core::host::{ContentState, GalleryAdapter};

use crate::host::CellPage;
use crate::loader::LoadResult;

#[derive(Debug, Clone)]
pub struct DemoGallery {
    size: i32,
    error: Option<String>,
    bound: usize,
}

impl Default for DemoGallery {
    fn default() -> Self {
        Self {
            size: ContentState::RAW_WAIT,
            error: None,
            bound: 0,
        }
    }
}

impl DemoGallery {
    /// Gallery whose size is already known
    pub fn with_pages(count: usize) -> Self {
        Self {
            size: raw_count(count),
            ..Self::default()
        }
    }

    /// Apply a finished load; the caller notifies the pager
    pub fn apply(&mut self, result: LoadResult) {
        match result {
            LoadResult::Ready { pages } => {
                self.size = raw_count(pages);
                self.error = None;
            }
            LoadResult::Failure { error } => {
                self.size = ContentState::RAW_ERROR;
                self.error = Some(error);
            }
        }
    }

    /// Back to the loading state
    pub fn reset(&mut self) {
        self.size = ContentState::RAW_WAIT;
        self.error = None;
    }

    /// Size as the loader reports it
    pub fn raw_size(&self) -> i32 {
        self.size
    }

    /// Number of pages currently bound to views
    pub fn bound_pages(&self) -> usize {
        self.bound
    }
}

impl GalleryAdapter<CellPage> for DemoGallery {
    fn state(&self) -> ContentState {
        ContentState::from_raw(self.size)
    }

    fn error(&self) -> Option<String> {
        self.error.clone()
    }

    fn bind(&mut self, page: &mut CellPage, index: usize) {
        page.index = Some(index);
        page.image.load();
        self.bound += 1;
    }

    fn unbind(&mut self, page: &mut CellPage) {
        page.index = None;
        page.image.unload();
        self.bound = self.bound.saturating_sub(1);
    }
}

fn raw_count(pages: usize) -> i32 {
    i32::try_from(pages).unwrap_or(i32::MAX)
}

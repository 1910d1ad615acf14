mod gallery;
mod status_bar;

pub use gallery::{cell_rect, GalleryWidget};
pub use status_bar::StatusBarWidget;

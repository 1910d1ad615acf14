pub mod anim;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod pager;

pub use config::{AppConfig, EasingType, PagerConfig, ReadingMode};
pub use error::{Error, Result};
pub use pager::{AnimationKind, Pager};

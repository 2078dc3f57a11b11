//! Core jsonbox URL types.

mod box_url;
pub mod path;

pub use box_url::BoxUrl;

//! Talk records and the source they are loaded from

mod entity;
mod source;

pub use entity::{Talk, TalkId};
pub use source::TalkSource;

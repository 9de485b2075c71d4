//! Layout engine for scroll-style cards: a top and bottom piece of artwork
//! with a repeatable middle strip that grows to fit the text.

pub mod background;
pub mod block;
pub mod core;
pub mod fit;
pub mod flow;
pub mod measure;
pub mod prelude;
#[cfg(feature = "ratatui")]
pub mod render;

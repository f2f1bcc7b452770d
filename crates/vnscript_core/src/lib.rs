//! vnscript_core: Core utilities shared by every stage of the vnscript pipeline.
//!
//! Currently this is the source-location vocabulary: every token, syntax node
//! and diagnostic carries a [`TextSpan`].

pub mod text;

pub use text::{TextPos, TextSpan};

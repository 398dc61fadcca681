//! Trellis API - Shared data model for the Trellis layout engine.
//!
//! Layouts are authored as plain data, built into a tree of `Element`s and
//! handed to a renderer. The types here are what both sides agree on.

mod component;
mod element;
mod payload;
mod value;

pub use component::*;
pub use element::*;
pub use payload::*;
pub use value::*;

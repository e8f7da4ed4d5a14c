//! Font descriptors, adaptive sizing, and Parley-backed text layout.

pub(crate) mod font;
pub(crate) mod layout;
pub(crate) mod sizing;

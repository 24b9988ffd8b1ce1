//! Small shared helpers: content hashing and path rendering.

pub mod hash;
pub mod path;

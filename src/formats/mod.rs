//! Input format types and parsers.

pub mod mtl;
pub mod obj;

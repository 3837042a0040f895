//! Library functions built on the value model.

pub mod str;

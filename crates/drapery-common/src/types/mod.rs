//! Core data types for Drapery quotations

pub mod breakdown;
pub mod line_item;
pub mod product;
pub mod template;

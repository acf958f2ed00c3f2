//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod compass;
pub mod double_display;
pub mod error_box;
pub mod footer;
pub mod glyphs;
pub mod header;
pub mod logs;
pub mod number_display;
pub mod readouts;

//! Presentation layer for visual styling and color mapping.
//!
//! Maps navigation, notice, and content state to theme colours, separate
//! from the state logic itself.

pub mod color_mapping;

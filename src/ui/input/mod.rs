//! Input handling subsystem for UI interactions.
//!
//! This module contains all input handling logic:
//! - Section navigation input (arrow keys, Home/End, wheel, swipe)

pub mod section_input_handler;

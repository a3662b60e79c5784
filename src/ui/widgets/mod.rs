//! UI widget components
//!
//! This module contains the jump-to-page input, popups and the
//! loading indicator.

pub mod jump_input;
pub mod loading;
pub mod popups;

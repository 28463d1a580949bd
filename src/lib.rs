//! Panela: constraint-aware team draw.
//!
//! Splits a roster into teams at random while keeping restricted pairs
//! ("panelinhas") apart whenever a placement allows it.
//!
//! ## State
//!
//! Everything lives in the state directory (`.panela/` by default):
//! - `.panela/state.json` - Roster, sizing, restrictions and draw history
//! - `.panela/draw.log` - Log of draws and edits (rotated to `.bak` files)

pub mod color;
pub mod config;
pub mod draw;
pub mod export;
pub mod form;
pub mod history;
pub mod log;
pub mod roster;
pub mod store;
#[doc(hidden)]
pub mod testutil;
pub mod validate;

//! Core of a vertically scrolling bullet-hell shooter.
//!
//! Everything in this crate is deterministic, fixed-tick game logic. The
//! terminal, the input thread and the frame pacing live in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod motion;
pub mod pattern;
pub mod player;
pub mod render;

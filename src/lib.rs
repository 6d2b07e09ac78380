//! The Sokoban puzzle game implemented in pure Rust, using egui.
//!
//! Start reading the documentation by having a look at the module [`level`].
//!

pub mod game;
pub mod grid;
pub mod level;
pub mod levels;
pub mod modals;

mod direction;
mod position;

pub use direction::Direction;
pub use position::Position;

//! Sliding-Puzzle Transform Engine
//!
//! Core logic for a grid puzzle where rigid pieces are slid, rotated,
//! and mirrored onto target footprints. Each piece carries a chain of
//! behavior nodes triggered by shape-space action points; this crate
//! owns the transform algebra that keeps those points consistent, the
//! collision detector, the win condition, and the undo/redo records.
//! Rendering, audio, and level file formats live with the caller.

pub mod arena;
pub mod board;
pub mod catalog;
pub mod geometry;
pub mod history;
pub mod level;
pub mod piece;
pub mod render;
pub mod shape;
pub mod transform;

pub use arena::{Arena, ArenaError};
pub use board::{DispatchOutcome, PieceSet, Target};
pub use geometry::{Axis, Coord, Direction, DirectionSet, Pointer};
pub use history::{History, MoveRecord};
pub use level::{ArenaSpec, Level, LevelError, LevelSpec, NodeSpec, PieceSpec, TargetSpec};
pub use piece::{ColorTag, PieceCore};
pub use shape::{Shape, ShapeError};
pub use transform::{ActionKind, NodeKind, TransformChain, TransformNode};

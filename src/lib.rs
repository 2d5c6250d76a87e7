//! Conway's Game of Life (B3/S23) on a fixed-size torus.

#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod grid;
mod patterns;
mod render;
pub mod rules;

pub use config::Config;
pub use engine::{Engine, ParallelEngine, SequentialEngine};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use patterns::Pattern;
pub use render::{Frame, Renderer};

pub type DefaultEngine = ParallelEngine;

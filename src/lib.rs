//! Rewrites chess games from Standard Algebraic Notation into UCI coordinate
//! moves, one game per line.

pub mod chess;

pub use chess::{Converter, ShakmatyRules, convert};

//! Word search on letter grids.
//!
//! A rectangular [`Grid`] of letters, a [`Trie`] dictionary, and a solver
//! that finds every dictionary word spellable by a path of neighboring
//! cells. Independent of the dispatcher; [`solve_from`] exists so a search
//! can be split into per-cell tasks and submitted to one.

pub mod grid;
pub mod solve;
pub mod trie;

pub use grid::Grid;
pub use solve::{solve, solve_from};
pub use trie::Trie;

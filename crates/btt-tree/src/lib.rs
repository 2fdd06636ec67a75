//! The Bruhat-Tits tree of `PGL_2(K)` for a discrete-valuation field `K`.
//!
//! - [`UnrootedTree`]: a tree given only by its neighbor relation, with
//!   paths, edge reversal and a no-backtrack depth-first traversal.
//! - [`BruhatTitsTree`]: the `(p+1)`-regular tree of lattice classes in
//!   `K^2`, with the canonical [`Vertex`] encoding, the matrix action and the
//!   translation classification of a matrix.
//! - [`RootedTree`]: a finite rooted snapshot, e.g. a depth-bounded ball.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

pub mod bruhat_tits;
pub mod rooted;
pub mod unrooted;

pub use bruhat_tits::{BruhatTitsTree, Vertex};
pub use rooted::RootedTree;
pub use unrooted::{Adj, Step, UnrootedTree};

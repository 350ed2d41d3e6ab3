//! Gem resolution engine: turns a build's bundle and drop policies into two
//! disjoint, dependency-closed gem sets and a bitmap of the gems to compile.
//!
//! Every operation is a pure function over the gem table and the policies it
//! is handed; the only side channel is the append-only [`diagnostics`] sink.

pub mod bitmap;
pub mod conflict;
pub mod diagnostics;
pub mod drop_list;
pub mod graph;
pub mod normalize;
pub mod pass_list;
pub mod resolver;
pub mod session;
pub mod set;

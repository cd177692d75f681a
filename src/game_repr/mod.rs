mod cell;
mod disc;
mod position;
mod symmetry;
pub mod bitboards;
pub mod canonical_hash;

#[cfg(test)]
mod tests;

pub use cell::*;
pub use disc::*;
pub use position::*;
pub use symmetry::*;
pub use canonical_hash::CanonicalHash;

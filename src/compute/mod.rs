//! Compute module - Numerical computation for Lenia Trails.

mod drift;
mod growth;
mod kernel;
mod lattice;
mod randomizer;
mod stats;

pub use drift::*;
pub use growth::*;
pub use kernel::*;
pub use lattice::*;
pub use randomizer::*;
pub use stats::*;

//! Lenia Trails - Continuous cellular automaton with motion-blur trails.
//!
//! A toroidal grid of scalar activations is convolved with a smooth radial
//! kernel and pushed through a polynomial growth function every step.
//! Activations are colored through a piecewise-linear gradient and blended
//! into a persistent RGB trail buffer. Parameters are re-drawn at random at
//! the start of every epoch.
//!
//! # Architecture
//!
//! - `schema`: Configuration, parameter sets and color palettes
//! - `compute`: Kernel, growth function, lattice step, randomizer, drift
//! - `render`: Color mapping and trail compositing into RGB buffers
//! - `simulation`: The owned driver that ties everything together
//!
//! # Example
//!
//! ```rust,no_run
//! use lenia_trails::{Simulation, SimulationConfig, SimulationStats};
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//!
//! // One tick per presentation frame; randomize every 90 s of frame time
//! for _ in 0..600 {
//!     sim.update(1.0 / 60.0);
//! }
//!
//! let rgb: &[u8] = sim.trail();
//! let stats = SimulationStats::from_lattice(sim.lattice());
//! println!("{} bytes, total activation {}", rgb.len(), stats.total_activation);
//! ```

pub mod compute;
pub mod render;
pub mod schema;
pub mod simulation;

// Re-export commonly used types
pub use compute::{Kernel, LatticeState, ParameterRandomizer, SimulationStats};
pub use render::{ColorMapper, TrailCompositor};
pub use schema::{Palette, SimulationConfig, SimulationParams};
pub use simulation::Simulation;

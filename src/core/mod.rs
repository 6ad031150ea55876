//! Particle state and the periodic domain it moves on.
//!
//! A simulation driver owns a population of [`Particle`]s and one [`Space`];
//! each tick it builds neighbourhoods from distances, updates headings with
//! its own alignment rule, then steps every particle exactly once.

pub mod particle;
pub mod space;

pub use particle::Particle;
pub use space::Space;

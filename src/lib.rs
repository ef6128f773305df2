//! Single particle tethered by a harmonic spring to a bath coordinate that
//! follows a generalized Langevin equation.
//!
//! [`integrator::Integrator`] owns the state and drives the run,
//! [`output::Sink`] receives sampled frames and [`config`] turns a TOML run
//! file into checked inputs.

pub mod config;
pub mod error;
pub mod integrator;
pub mod noise;
pub mod output;
pub mod particle;
pub mod state;
pub mod vec3;

pub use error::{Result, SimError};
pub use integrator::{Integrator, RunSummary};
pub use output::{Record, Recorder, Sink, XyzEnergyWriter};
pub use particle::Particle;
pub use state::{Constants, PhysicalState};
pub use vec3::Vec3;

use crate::error::{Result, SimError};
use crate::vec3::Vec3;

/// Point mass used for both the mobile particle and the bath coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f64,
}

impl Particle {

    // particles always start at rest
    pub fn at_rest(position: Vec3, mass: f64) -> Result<Particle> {
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(SimError::Config(format!("mass must be positive and finite, got {}", mass)));
        }
        if !position.is_finite() {
            return Err(SimError::Config(format!("position must be finite, got ({})", position)));
        }
        Ok(Particle{position: position, velocity: Vec3::ZERO, mass: mass})
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5*self.mass*self.velocity.norm_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

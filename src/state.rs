use crate::error::{Result, SimError};
use crate::particle::Particle;
use crate::vec3::Vec3;

/// Physical and numerical constants, fixed for the lifetime of a run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Constants {
    pub friction_coefficient: f64,
    pub coupling_coefficient: f64,
    pub k_b: f64,
    pub equilibrium_length: f64,
    pub temperature: f64,
    pub delta_t: f64,
    pub step_num: usize,
    pub save_step_num: usize,
}

impl Constants {

    // reject anything the integrator cannot divide by or sample from
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("friction_coefficient", self.friction_coefficient),
            ("coupling_coefficient", self.coupling_coefficient),
            ("K_b", self.k_b),
            ("equilibrium_length", self.equilibrium_length),
            ("temperature", self.temperature),
            ("delta_t", self.delta_t),
        ];
        for (name, value) in finite.iter() {
            if !value.is_finite() {
                return Err(SimError::Config(format!("{} must be finite, got {}", name, value)));
            }
        }
        if self.save_step_num == 0 {
            return Err(SimError::Config(String::from("save_step_num must be greater than 0")));
        }
        if self.delta_t <= 0.0 {
            return Err(SimError::Config(format!("delta_t must be positive, got {}", self.delta_t)));
        }
        if self.k_b <= 0.0 {
            return Err(SimError::Config(format!("K_b must be positive, got {}", self.k_b)));
        }
        if self.friction_coefficient < 0.0 {
            return Err(SimError::Config(format!(
                "friction_coefficient must be non-negative, got {}", self.friction_coefficient)));
        }
        if self.temperature < 0.0 {
            return Err(SimError::Config(format!(
                "temperature must be non-negative, got {}", self.temperature)));
        }
        Ok(())
    }

    /// Variance of each component of the random force acting on a bath of mass `bath_mass`.
    pub fn noise_variance(&self, bath_mass: f64) -> f64 {
        2.0*self.friction_coefficient*self.k_b*self.temperature*self.delta_t/bath_mass
    }
}

/// Everything that evolves during a run: both bodies plus the staggered noise pair.
///
/// `xi_t` is the random force at the current half step and `xi_tph` the one at the
/// next half step. The step driver shifts `xi_tph` into `xi_t` after every update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhysicalState {
    pub bath: Particle,
    pub particle: Particle,
    pub xi_t: Vec3,
    pub xi_tph: Vec3,
}

//! Time stepping for a particle tethered to a Langevin bath coordinate.
//!
//! The bath moves under linear friction and a staggered pair of random
//! forces (`xi_t`, `xi_tph`), advanced with a closed-form one-step
//! propagator. The particle feels only the harmonic coupling to the bath and
//! is advanced with velocity-Verlet. Within a step the particle always couples
//! to the bath as it was *before* that step.

use log::{debug, info};

use crate::error::{Result, SimError};
use crate::noise::NoiseSource;
use crate::output::{Record, Sink};
use crate::particle::Particle;
use crate::state::{Constants, PhysicalState};
use crate::vec3::Vec3;

/// Bath position after one step of the GLE propagator.
pub fn langevin_position(bath: &Particle, xi_t: Vec3, c: &Constants) -> Vec3 {
    let dt = c.delta_t;
    let damping = 1.0 - 0.5*c.friction_coefficient*dt;
    bath.position + bath.velocity*(dt*damping) + xi_t*(0.5*dt*dt)
}

/// Bath velocity after one step of the GLE propagator.
///
/// Damps the old velocity by `term1*term2` and kicks it with the sum of the two
/// staggered noise samples.
pub fn langevin_velocity(bath: &Particle, xi_t: Vec3, xi_tph: Vec3, c: &Constants) -> Vec3 {
    let dt = c.delta_t;
    let half_gdt = 0.5*c.friction_coefficient*dt;
    let term1 = 1.0 - half_gdt;
    let term2 = 1.0 - half_gdt + half_gdt*half_gdt;
    bath.velocity*(term1*term2) + (xi_t + xi_tph)*(0.5*dt*term2)
}

/// Harmonic force on a particle at `particle_pos` from a spring of rest length
/// `equilibrium_length` anchored at `bath_pos`.
///
/// Returns `None` when the two points coincide, since the force direction is
/// undefined there.
pub fn coupling_force(particle_pos: Vec3, bath_pos: Vec3, c: &Constants) -> Option<Vec3> {
    let dr = particle_pos - bath_pos;
    let distance = dr.norm();
    if distance == 0.0 {
        return None;
    }
    let scale = -c.coupling_coefficient*(distance - c.equilibrium_length)/distance;
    Some(dr*scale)
}

pub fn verlet_position(particle: &Particle, force: Vec3, c: &Constants) -> Vec3 {
    let dt = c.delta_t;
    particle.position + particle.velocity*dt + force*(0.5*dt*dt/particle.mass)
}

pub fn verlet_velocity(particle: &Particle, force: Vec3, next_force: Vec3, c: &Constants) -> Vec3 {
    particle.velocity + (force + next_force)*(0.5*c.delta_t/particle.mass)
}

/// Totals reported once a run finishes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub records: usize,
    pub final_kinetic_energy: f64,
}

pub struct Integrator {
    state: PhysicalState,
    constants: Constants,
    noise: NoiseSource,
    stdout_step: Option<usize>,
}

impl Integrator {

    // validate constants, seed the noise stream and draw the initial noise pair
    pub fn new(constants: Constants, bath: Particle, particle: Particle, seed: u64) -> Result<Integrator> {
        constants.validate()?;
        for (name, body) in [("bath", &bath), ("particle", &particle)].iter() {
            if !(body.mass > 0.0) || !body.mass.is_finite() {
                return Err(SimError::Config(format!("{} mass must be positive and finite, got {}", name, body.mass)));
            }
            if !body.is_finite() {
                return Err(SimError::Config(format!("{} initial state must be finite", name)));
            }
        }

        if coupling_force(particle.position, bath.position, &constants).is_none() {
            return Err(SimError::Singularity{step: 0});
        }

        let variance = constants.noise_variance(bath.mass);
        let mut noise = NoiseSource::new(seed, variance)?;
        debug!("noise variance {} from seed {}", variance, seed);

        let xi_t = noise.draw();
        let xi_tph = noise.draw();

        let state = PhysicalState{bath: bath, particle: particle, xi_t: xi_t, xi_tph: xi_tph};
        Ok(Integrator{state: state, constants: constants, noise: noise, stdout_step: None})
    }

    /// Log progress every `stdout_step` steps. `None` or `Some(0)` disables it.
    pub fn with_progress(mut self, stdout_step: Option<usize>) -> Self {
        self.stdout_step = stdout_step.filter(|&n| n > 0);
        self
    }

    pub fn state(&self) -> &PhysicalState {
        &self.state
    }

    /// Advance bath, particle and noise pair by one `delta_t`.
    ///
    /// `step` only labels errors. On failure neither the state nor the noise
    /// stream advances.
    pub fn step(&mut self, step: usize) -> Result<()> {
        let c = &self.constants;
        let cur = &self.state;

        let next_bath = Particle{
            position: langevin_position(&cur.bath, cur.xi_t, c),
            velocity: langevin_velocity(&cur.bath, cur.xi_t, cur.xi_tph, c),
            mass: cur.bath.mass,
        };

        // both force evaluations see the pre-step bath position
        let force = coupling_force(cur.particle.position, cur.bath.position, c)
            .ok_or(SimError::Singularity{step: step})?;
        let next_position = verlet_position(&cur.particle, force, c);
        let next_force = coupling_force(next_position, cur.bath.position, c)
            .ok_or(SimError::Singularity{step: step})?;
        let next_particle = Particle{
            position: next_position,
            velocity: verlet_velocity(&cur.particle, force, next_force, c),
            mass: cur.particle.mass,
        };

        if !next_bath.is_finite() || !next_particle.is_finite() {
            return Err(SimError::NonFinite{step: step});
        }

        let xi_t = cur.xi_tph;
        self.state = PhysicalState{
            bath: next_bath,
            particle: next_particle,
            xi_t: xi_t,
            xi_tph: self.noise.draw(),
        };
        Ok(())
    }

    /// Emit the initial state, then take `step_num` steps, emitting every
    /// `save_step_num`-th one.
    pub fn run<S: Sink>(&mut self, sink: &mut S) -> Result<RunSummary> {
        let step_num = self.constants.step_num;
        let save_step_num = self.constants.save_step_num;
        if save_step_num == 0 {
            return Err(SimError::Config(String::from("save_step_num must be greater than 0")));
        }

        info!("running {} steps, saving every {}", step_num, save_step_num);

        sink.record(&Record::from_state(0, &self.state))?;
        let mut records = 1;

        for step in 1..=step_num {

            self.step(step)?;

            if step % save_step_num == 0 {
                let record = Record::from_state(step, &self.state);
                debug!("step {} kinetic energy {}", step, record.kinetic_energy);
                sink.record(&record)?;
                records += 1;
            }

            if let Some(stdout_step) = self.stdout_step {
                if step % stdout_step == 0 {
                    info!("{}", step);
                }
            }
        }

        sink.finish()?;

        Ok(RunSummary{
            steps: step_num,
            records: records,
            final_kinetic_energy: self.state.particle.kinetic_energy(),
        })
    }
}

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

use crate::error::Result;
use crate::vec3::Vec3;

/// Seeded stream of Gaussian 3-vectors, components drawn in x, y, z order.
pub struct NoiseSource {
    rng: rand_pcg::Lcg128Xsl64,
    normal: rand_distr::Normal<f64>,
}

impl NoiseSource {

    pub fn new(seed: u64, variance: f64) -> Result<NoiseSource> {
        let normal = Normal::new(0.0f64, variance.sqrt())?;
        let rng = Pcg64::seed_from_u64(seed);
        Ok(NoiseSource{rng: rng, normal: normal})
    }

    // return a random force vector
    pub fn draw(&mut self) -> Vec3 {
        let mut w = [0.0f64; 3];
        for (slot, sample) in w.iter_mut().zip(self.normal.sample_iter(&mut self.rng)) {
            *slot = sample;
        }
        Vec3(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = NoiseSource::new(7, 0.3).unwrap();
        let mut b = NoiseSource::new(7, 0.3).unwrap();
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn matches_plain_pcg_normal_sequence() {
        let mut source = NoiseSource::new(42, 4.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(42);
        let normal = Normal::new(0.0, 2.0).unwrap();
        for _ in 0..10 {
            let expected = Vec3::new(normal.sample(&mut rng), normal.sample(&mut rng), normal.sample(&mut rng));
            assert_eq!(source.draw(), expected);
        }
    }

    #[test]
    fn zero_variance_draws_zero() {
        let mut source = NoiseSource::new(1, 0.0).unwrap();
        for _ in 0..10 {
            assert_eq!(source.draw(), Vec3::ZERO);
        }
    }

    #[test]
    fn negative_variance_rejected() {
        assert!(NoiseSource::new(1, -1.0).is_err());
    }

    #[test]
    fn sample_variance_close_to_requested() {
        let mut source = NoiseSource::new(3, 0.25).unwrap();
        let n = 20_000;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            sum_sq += source.draw().norm_squared();
        }
        let var = sum_sq/(3.0*n as f64);
        assert!((var - 0.25).abs() < 0.01, "sample variance {}", var);
    }
}

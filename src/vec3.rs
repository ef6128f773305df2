use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// Cartesian 3-vector used for positions, velocities, forces and noise samples.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Vec3(pub [f64; 3]);

impl Vec3 {

    pub const ZERO: Vec3 = Vec3([0.0, 0.0, 0.0]);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0[0]*other.0[0] + self.0[1]*other.0[1] + self.0[2]*other.0[2]
    }

    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3([self.0[0] + other.0[0], self.0[1] + other.0[1], self.0[2] + other.0[2]])
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3([self.0[0] - other.0[0], self.0[1] - other.0[1], self.0[2] - other.0[2]])
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, s: f64) -> Vec3 {
        Vec3([self.0[0]*s, self.0[1]*s, self.0[2]*s])
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        v*self
    }
}

// space separated, the way xyz frames expect coordinates
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_pythagorean_triple() {
        let v = Vec3::new(3.0, 4.0, 12.0);
        assert_eq!(v.norm(), 13.0);
    }

    #[test]
    fn elementwise_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, 1.0));
        assert_eq!(2.0*a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 0.5 - 2.0 + 6.0);
    }

    #[test]
    fn display_is_space_separated() {
        assert_eq!(format!("{}", Vec3::new(1.0, -0.5, 0.0)), "1 -0.5 0");
    }

    #[test]
    fn finiteness() {
        assert!(Vec3::ZERO.is_finite());
        assert!(!Vec3::new(0.0, f64::NAN, 0.0).is_finite());
        assert!(!Vec3::new(f64::INFINITY, 0.0, 0.0).is_finite());
    }
}

//! Observation and action space types.
//!
//! Gymnasium-style space definitions used to describe the environments.

mod r#box;
mod discrete;
mod multi_discrete;

pub use discrete::Discrete;
pub use multi_discrete::MultiDiscrete;
pub use r#box::Box;

use ndarray::ArrayD;
use rand::Rng;

/// Trait for observation and action spaces
pub trait Space: Clone + Send + Sync {
    /// The type of samples from this space
    type Sample;

    /// Sample a random element from this space
    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample;

    /// Check if a value is contained in this space
    fn contains(&self, value: &Self::Sample) -> bool;

    /// Get the shape of samples from this space
    fn shape(&self) -> &[usize];

    /// Get the total number of elements in a sample
    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }
}

/// Enum for dynamic space types
#[derive(Clone, Debug)]
pub enum DynSpace {
    Discrete(Discrete),
    MultiDiscrete(MultiDiscrete),
    Box(Box),
}

impl DynSpace {
    /// Get the shape of this space
    pub fn shape(&self) -> Vec<usize> {
        match self {
            DynSpace::Discrete(s) => s.shape().to_vec(),
            DynSpace::MultiDiscrete(s) => s.shape().to_vec(),
            DynSpace::Box(s) => s.shape().to_vec(),
        }
    }

    /// Number of discrete choices, for discrete spaces
    pub fn n(&self) -> Option<usize> {
        match self {
            DynSpace::Discrete(s) => Some(s.n),
            _ => None,
        }
    }

    /// Sample from this space as a flat float array
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ArrayD<f32> {
        match self {
            DynSpace::Discrete(s) => {
                let v = s.sample(rng);
                ArrayD::from_elem(ndarray::IxDyn(&[1]), v as f32)
            }
            DynSpace::MultiDiscrete(s) => {
                let v: Vec<f32> = s.sample(rng).into_iter().map(|x| x as f32).collect();
                ndarray::Array1::from(v).into_dyn()
            }
            DynSpace::Box(s) => s.sample(rng),
        }
    }

    /// Check if this space contains the value
    pub fn contains(&self, value: &ArrayD<f32>) -> bool {
        match self {
            DynSpace::Discrete(s) => match value.iter().next() {
                Some(&v) if value.len() == 1 && v >= 0.0 => s.contains(&(v.round() as usize)),
                _ => false,
            },
            DynSpace::MultiDiscrete(s) => {
                if value.len() != s.nvec.len() || value.iter().any(|&x| x < 0.0) {
                    return false;
                }
                let v: Vec<usize> = value.iter().map(|&x| x.round() as usize).collect();
                s.contains(&v)
            }
            DynSpace::Box(s) => s.contains(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_dyn_space_round_trip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let spaces = [
            DynSpace::Discrete(Discrete::new(6)),
            DynSpace::MultiDiscrete(MultiDiscrete::joint(2, 6)),
            DynSpace::Box(Box::uniform(&[5, 4, 26], 0.0, 20.0)),
        ];
        for space in &spaces {
            let sample = space.sample(&mut rng);
            assert!(space.contains(&sample));
        }
        assert_eq!(spaces[0].n(), Some(6));
        assert_eq!(spaces[1].n(), None);
        assert_eq!(spaces[2].shape(), vec![5, 4, 26]);
    }

    #[test]
    fn test_discrete_rejects_negative() {
        let space = DynSpace::Discrete(Discrete::new(6));
        assert!(!space.contains(&ArrayD::from_elem(ndarray::IxDyn(&[1]), -1.0)));
        assert!(!space.contains(&ArrayD::from_elem(ndarray::IxDyn(&[1]), 6.0)));
    }
}

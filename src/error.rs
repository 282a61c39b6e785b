//! Error types in linfa-pairwise
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while computing distances, assigning points or sampling centroids.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Points and centroids do not live in the same feature space
    #[error("feature dimension mismatch: points have {points} features, centroids have {centroids}")]
    DimensionMismatch { points: usize, centroids: usize },
    /// Nearest-centroid lookup was attempted without any centroid
    #[error("cannot assign points to an empty set of centroids")]
    EmptyCentroidSet,
    /// More distinct indices were requested than the population holds
    #[error("cannot sample {count} distinct indices from a population of {population}")]
    InsufficientPopulation { population: usize, count: usize },
    #[error("invalid sample count {count}, at least one index is required")]
    InvalidCount { count: usize },
}

//! `linfa-pairwise` implements the assignment step of k-means with `ndarray` broadcasting.
//!
//! ## The big picture
//!
//! Given `n_points` observations and `n_centroids` cluster centers living in the same
//! `n_features`-dimensional space, the assignment step answers one question: which centroid is
//! each observation closest to? This crate splits it in the three operations it is built from:
//!
//! * [`pairwise_distances`] computes the `(n_centroids, n_points)` matrix of Euclidean
//!   distances by broadcasting the centroids against the points;
//! * [`assign_nearest`] reduces that matrix to the index of the closest centroid for every
//!   point, resolving ties in favour of the lowest index;
//! * [`sample_indices`] draws distinct observation indices to seed the centroids.
//!
//! [`PairwiseAssigner`] packages a validated set of centroids with a [`Distance`] metric and
//! performs the same assignment without materialising the full distance matrix.
//!
//! ## Example
//!
//! ```
//! use linfa_pairwise::prelude::*;
//! use ndarray::array;
//!
//! let points = array![[5.49, 4.86], [5.64, 6.52], [4.76, 4.76], [6.57, 5.76]];
//! let centroids = array![[5.49, 4.86], [5.64, 6.52]];
//!
//! let distances = pairwise_distances(&points, &centroids)?;
//! let memberships = assign_nearest(&distances)?;
//! assert_eq!(memberships, array![0, 1, 0, 1]);
//!
//! // Seed an assigner with two random observations instead
//! let assigner = PairwiseAssigner::params(2).init(&points)?;
//! assert_eq!(assigner.predict(&points).len(), 4);
//! # Ok::<(), linfa_pairwise::Error>(())
//! ```
//!
//! The full k-means loop (centroid updates, convergence, restarts) is outside the scope of this
//! crate.
mod assign;
pub mod distance;
pub mod error;
pub mod prelude;

pub use assign::*;
pub use distance::{pairwise_distances, pairwise_distances_with, Distance, L1Dist, L2Dist};
pub use error::{Error, Result};
pub use linfa::{Float, ParamGuard};

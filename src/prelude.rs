//! linfa-pairwise prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use linfa::ParamGuard;

#[doc(no_inline)]
pub use linfa::traits::{Predict, PredictInplace};

#[doc(no_inline)]
pub use crate::distance::{Distance, L1Dist, L2Dist};

#[doc(no_inline)]
pub use crate::assign::{assign_nearest, sample_indices, Assignment, PairwiseAssigner};

#[doc(no_inline)]
pub use crate::distance::{pairwise_distances, pairwise_distances_with};

#[doc(no_inline)]
pub use linfa::Float;

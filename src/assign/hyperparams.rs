use std::marker::PhantomData;

use crate::assign::algorithm::PairwiseAssigner;
use crate::assign::init::random_init;
use crate::distance::Distance;
use crate::error::{Error, Result};
use linfa::{Float, ParamGuard};
use ndarray::{ArrayBase, Data, Ix2};
use rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters used to initialise a [`PairwiseAssigner`] from data.
pub struct AssignerValidParams<F: Float, R: Rng, D: Distance<F>> {
    /// The number of centroids drawn from the observations.
    n_clusters: usize,
    /// The random number generator
    rng: R,
    /// Distance metric used in the assignment step
    dist_fn: D,
    #[cfg_attr(feature = "serde", serde(skip))]
    phantom: PhantomData<F>,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](AssignerValidParams)
/// (using the builder pattern).
pub struct AssignerParams<F: Float, R: Rng, D: Distance<F>>(AssignerValidParams<F, R, D>);

impl<F: Float, R: Rng, D: Distance<F>> AssignerParams<F, R, D> {
    /// `new` lets us configure the initialisation:
    /// * `n_clusters` distinct observations become the centroids;
    /// * `rng` drives which observations are picked;
    /// * `dist_fn` is the metric of the resulting assigner.
    pub fn new(n_clusters: usize, rng: R, dist_fn: D) -> Self {
        Self(AssignerValidParams {
            n_clusters,
            rng,
            dist_fn,
            phantom: PhantomData,
        })
    }

    /// Change the value of `n_clusters`
    pub fn n_clusters(mut self, n_clusters: usize) -> Self {
        self.0.n_clusters = n_clusters;
        self
    }

    /// Replace the random number generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> AssignerParams<F, R2, D> {
        AssignerParams::new(self.0.n_clusters, rng, self.0.dist_fn)
    }

    /// Replace the distance metric
    pub fn with_dist_fn<D2: Distance<F>>(self, dist_fn: D2) -> AssignerParams<F, R, D2> {
        AssignerParams::new(self.0.n_clusters, self.0.rng, dist_fn)
    }
}

impl<F: Float, R: Rng + Clone, D: Distance<F>> AssignerParams<F, R, D> {
    /// Checks the hyperparameters, then draws the initial centroids from `observations`.
    pub fn init(
        &self,
        observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<PairwiseAssigner<F, D>> {
        self.check_ref()?.init(observations)
    }
}

impl<F: Float, R: Rng, D: Distance<F>> ParamGuard for AssignerParams<F, R, D> {
    type Checked = AssignerValidParams<F, R, D>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_clusters == 0 {
            Err(Error::InvalidCount {
                count: self.0.n_clusters,
            })
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng, D: Distance<F>> AssignerValidParams<F, R, D> {
    /// The number of centroids drawn from the observations.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Returns the distance metric
    pub fn dist_fn(&self) -> &D {
        &self.dist_fn
    }
}

impl<F: Float, R: Rng + Clone, D: Distance<F>> AssignerValidParams<F, R, D> {
    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `init` picks `n_clusters` distinct observations uniformly at random and returns an
    /// assigner using them as centroids.
    ///
    /// The generator is cloned, so the same parameters always pick the same observations.
    pub fn init(
        &self,
        observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<PairwiseAssigner<F, D>> {
        let mut rng = self.rng.clone();
        let centroids = random_init(&mut rng, self.n_clusters, observations)?;
        PairwiseAssigner::with_dist(centroids, self.dist_fn.clone())
    }
}

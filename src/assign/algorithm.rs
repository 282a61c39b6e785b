use crate::assign::hyperparams::AssignerParams;
use crate::distance::{check_features, pairwise_distances_with, Distance, L2Dist};
use crate::error::{Error, Result};
use linfa::{traits::PredictInplace, Float};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, DataMut, Ix1, Ix2, Zip};
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// Assigns observations to the nearest of a fixed set of centroids.
///
/// This is the assignment step of k-means: given the centroids, every observation belongs to
/// the cluster whose centroid is closest to it. The centroid set is never empty.
///
/// ## Tie-breaking
///
/// When several centroids are exactly equidistant from an observation, the one with the
/// lowest index wins.
///
/// ## Example
///
/// ```
/// use linfa_pairwise::prelude::*;
/// use ndarray::array;
///
/// let points = array![[5.49, 4.86], [5.64, 6.52], [4.76, 4.76], [6.57, 5.76]];
/// let assigner = PairwiseAssigner::new(array![[5.49, 4.86], [5.64, 6.52]]).unwrap();
///
/// // (n_centroids, n_points)
/// let distances = assigner.distances(&points).unwrap();
/// assert_eq!(distances.dim(), (2, 4));
///
/// let memberships = assigner.predict(&points);
/// assert_eq!(memberships, array![0, 1, 0, 1]);
/// assert_eq!(assigner.predict(&array![6.0, 6.0]), 1);
/// ```
pub struct PairwiseAssigner<F: Float, D: Distance<F> = L2Dist> {
    centroids: Array2<F>,
    dist_fn: D,
}

impl<F: Float> PairwiseAssigner<F, L2Dist> {
    /// Euclidean assigner over `centroids`, with shape `(n_centroids, n_features)`.
    pub fn new(centroids: Array2<F>) -> Result<Self> {
        Self::with_dist(centroids, L2Dist)
    }

    pub fn params(n_clusters: usize) -> AssignerParams<F, Isaac64Rng, L2Dist> {
        AssignerParams::new(n_clusters, Isaac64Rng::seed_from_u64(42), L2Dist)
    }

    pub fn params_with_rng<R: Rng>(n_clusters: usize, rng: R) -> AssignerParams<F, R, L2Dist> {
        AssignerParams::new(n_clusters, rng, L2Dist)
    }
}

impl<F: Float, D: Distance<F>> PairwiseAssigner<F, D> {
    pub fn params_with<R: Rng>(n_clusters: usize, rng: R, dist_fn: D) -> AssignerParams<F, R, D> {
        AssignerParams::new(n_clusters, rng, dist_fn)
    }

    /// Assigner over `centroids` using `dist_fn` to compare observations and centroids.
    ///
    /// Fails with [`Error::EmptyCentroidSet`] if `centroids` has no rows.
    pub fn with_dist(centroids: Array2<F>, dist_fn: D) -> Result<Self> {
        if centroids.nrows() == 0 {
            return Err(Error::EmptyCentroidSet);
        }
        Ok(Self { centroids, dist_fn })
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    pub fn dist_fn(&self) -> &D {
        &self.dist_fn
    }

    /// Distance of every observation to every centroid, with shape
    /// `(n_centroids, n_observations)`.
    pub fn distances(
        &self,
        observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    ) -> Result<Array2<F>> {
        pairwise_distances_with(&self.dist_fn, observations, &self.centroids)
    }

    /// Runs one assignment step over `observations`, keeping for each of them both the index
    /// of the closest centroid and the distance to it.
    pub fn assign(
        &self,
        observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    ) -> Result<Assignment<F>> {
        check_features(observations.ncols(), self.n_features())?;
        let n_samples = observations.nrows();
        let mut memberships = Array1::zeros(n_samples);
        let mut dists = Array1::zeros(n_samples);
        let mut rdists = Array1::zeros(n_samples);
        update_memberships_and_dists(
            &self.dist_fn,
            &self.centroids,
            observations,
            &mut memberships,
            &mut dists,
            &mut rdists,
        );

        let inertia = rdists.iter().fold(F::zero(), |acc, &r| acc + r);
        log::debug!(
            "assigned {} observations to {} centroids, inertia {}",
            n_samples,
            self.n_clusters(),
            inertia
        );

        Ok(Assignment {
            memberships,
            distances: dists,
            inertia,
            n_clusters: self.n_clusters(),
        })
    }
}

impl<F: Float, DA: Data<Elem = F>, D: Distance<F>> PredictInplace<ArrayBase<DA, Ix2>, Array1<usize>>
    for PairwiseAssigner<F, D>
{
    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `predict` returns, for each observation, the index of the closest centroid.
    ///
    /// Same result as `assign_nearest(&self.distances(observations)?)`, without building the
    /// distance matrix. Panics if the number of features differs from the centroids', use
    /// [`assign`](PairwiseAssigner::assign) to get an error instead.
    fn predict_inplace(&self, observations: &ArrayBase<DA, Ix2>, memberships: &mut Array1<usize>) {
        assert_eq!(
            observations.nrows(),
            memberships.len(),
            "The number of data points must match the number of memberships."
        );
        assert_eq!(
            observations.ncols(),
            self.n_features(),
            "The number of features must match the centroids."
        );

        update_cluster_memberships(
            &self.dist_fn,
            &self.centroids,
            &observations.view(),
            memberships,
        );
    }

    fn default_target(&self, x: &ArrayBase<DA, Ix2>) -> Array1<usize> {
        Array1::zeros(x.nrows())
    }
}

impl<F: Float, DA: Data<Elem = F>, D: Distance<F>> PredictInplace<ArrayBase<DA, Ix1>, usize>
    for PairwiseAssigner<F, D>
{
    /// Given one input observation, return the index of its closest centroid
    fn predict_inplace(&self, observation: &ArrayBase<DA, Ix1>, membership: &mut usize) {
        assert_eq!(
            observation.len(),
            self.n_features(),
            "The number of features must match the centroids."
        );
        *membership = closest_centroid(&self.dist_fn, &self.centroids, observation).0;
    }

    fn default_target(&self, _x: &ArrayBase<DA, Ix1>) -> usize {
        0
    }
}

/// The outcome of one assignment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment<F> {
    memberships: Array1<usize>,
    distances: Array1<F>,
    inertia: F,
    n_clusters: usize,
}

impl<F: Float> Assignment<F> {
    /// Index of the closest centroid, one per observation
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    /// Distance of each observation to its closest centroid
    pub fn distances(&self) -> &Array1<F> {
        &self.distances
    }

    /// Sum over all observations of the reduced distance to the closest centroid. For the
    /// Euclidean metric this is the sum of squared distances, the quantity k-means minimises.
    pub fn inertia(&self) -> F {
        self.inertia
    }

    /// Number of observations assigned to each centroid
    pub fn cluster_sizes(&self) -> Array1<usize> {
        let mut sizes = Array1::zeros(self.n_clusters);
        self.memberships.iter().for_each(|&c| sizes[c] += 1);
        sizes
    }

    pub fn into_memberships(self) -> Array1<usize> {
        self.memberships
    }
}

/// Given a distance matrix with shape `(n_centroids, n_points)`, return for every point the
/// index of the row holding its smallest distance.
///
/// Ties go to the lowest centroid index. Fails with [`Error::EmptyCentroidSet`] if the matrix
/// has no rows, whatever the number of points.
///
/// A NaN distance never compares smaller than anything. A NaN after the first row is therefore
/// skipped, while a NaN in row 0 is never replaced and that point goes to centroid 0. The fused
/// predictor follows the same rule.
///
/// ```
/// use linfa_pairwise::assign_nearest;
/// use ndarray::array;
///
/// let distances = array![[0.0, 1.6668, 0.7368, 1.4058], [1.6668, 0.0, 1.9677, 1.2010]];
/// assert_eq!(assign_nearest(&distances).unwrap(), array![0, 1, 0, 1]);
/// ```
pub fn assign_nearest<F: Float>(
    distances: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array1<usize>> {
    if distances.nrows() == 0 {
        return Err(Error::EmptyCentroidSet);
    }
    Ok(Zip::from(distances.columns()).map_collect(first_minimum))
}

fn first_minimum<F: Float>(values: ArrayView1<F>) -> usize {
    values
        .indexed_iter()
        .fold((0, values[0]), |(best, min), (idx, &value)| {
            if value < min {
                (idx, value)
            } else {
                (best, min)
            }
        })
        .0
}

// Update `cluster_memberships` with the index of the cluster each observation belongs to.
pub(crate) fn update_cluster_memberships<F: Float, D: Distance<F>>(
    dist_fn: &D,
    centroids: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .par_for_each(|observation, cluster_membership| {
            *cluster_membership = closest_centroid(dist_fn, centroids, &observation).0
        });
}

// Efficient combination of `update_cluster_memberships` and keeping both distances.
pub(crate) fn update_memberships_and_dists<F: Float, D: Distance<F>>(
    dist_fn: &D,
    centroids: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
    dists: &mut ArrayBase<impl DataMut<Elem = F>, Ix1>,
    rdists: &mut ArrayBase<impl DataMut<Elem = F>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .and(dists)
        .and(rdists)
        .par_for_each(|observation, cluster_membership, dist, rdist| {
            let (m, d, r) = closest_centroid(dist_fn, centroids, &observation);
            *cluster_membership = m;
            *dist = d;
            *rdist = r;
        });
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an observation,
/// return the index of the closest centroid (the index of the corresponding row in `centroids`)
/// along with the distance and the reduced distance to it.
///
/// Centroids are compared on the distance, so the result is the arg-min of the matrix built by
/// `pairwise_distances_with`. `centroids` must not be empty.
pub(crate) fn closest_centroid<F: Float, D: Distance<F>>(
    dist_fn: &D,
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F, F) {
    let measure = |centroid: ArrayView1<F>| {
        let rdist = dist_fn.rdistance(centroid, observation.view());
        (dist_fn.rdist_to_dist(rdist), rdist)
    };

    let mut closest_index = 0;
    let (mut minimum_distance, mut minimum_rdist) = measure(centroids.row(0));
    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate().skip(1) {
        let (distance, rdist) = measure(centroid);
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
            minimum_rdist = rdist;
        }
    }
    (closest_index, minimum_distance, minimum_rdist)
}

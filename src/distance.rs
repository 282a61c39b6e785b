//! Distance metrics and the pairwise distance kernels.
//!
//! Both kernels return a matrix with shape `(n_centroids, n_points)`: row `k` holds the
//! distance of every point to centroid `k`.
use ndarray::{Array2, ArrayBase, ArrayView1, Axis, Data, Ix2, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};
use linfa::Float;

/// A single point, borrowed from a row of a points or centroids matrix
pub type Point<'a, F> = ArrayView1<'a, F>;

/// A metric on the feature space.
///
/// `rdist_to_dist(rdistance(a, b))` must equal `distance(a, b)` exactly: the fused assignment
/// compares centroids through the reduced distance.
pub trait Distance<F: Float>: Clone + Send + Sync + Unpin {
    // Panics if a and b are not of equal dimension
    fn distance(&self, a: Point<F>, b: Point<F>) -> F;

    // Fast distance metric that keeps the order of the distance function
    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        self.distance(a, b)
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }
}

/// Euclidean distance. The reduced distance is the squared Euclidean distance.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        assert_eq!(a.len(), b.len(), "points must have the same dimension");
        a.iter().zip(b.iter()).fold(F::zero(), |acc, (&a, &b)| {
            let diff = a - b;
            acc + diff * diff
        })
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist.powi(2)
    }
}

/// Manhattan distance
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct L1Dist;

impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b).abs())
    }
}

pub(crate) fn check_features(points: usize, centroids: usize) -> Result<()> {
    if points == centroids {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { points, centroids })
    }
}

/// Euclidean distance between every centroid and every point.
///
/// `points` has shape `(n_points, n_features)` and `centroids` has shape
/// `(n_centroids, n_features)`. The result has shape `(n_centroids, n_points)`.
///
/// The computation is a single broadcast: centroids are viewed as `(n_centroids, 1, n_features)`
/// and points as `(1, n_points, n_features)`, so their difference spans every
/// `(centroid, point, feature)` triple. Squaring, summing over the feature axis and taking the
/// square root collapses it to the distance matrix. This materialises an intermediate array of
/// `n_centroids * n_points * n_features` elements; use [`pairwise_distances_with`] when that is
/// too large.
///
/// ```
/// use linfa_pairwise::pairwise_distances;
/// use ndarray::array;
///
/// let points = array![[0., 0.], [3., 4.]];
/// let centroids = array![[0., 0.]];
/// let distances = pairwise_distances(&points, &centroids).unwrap();
/// assert_eq!(distances, array![[0., 5.]]);
/// ```
pub fn pairwise_distances<F: Float>(
    points: &ArrayBase<impl Data<Elem = F>, Ix2>,
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array2<F>> {
    check_features(points.ncols(), centroids.ncols())?;
    log::trace!(
        "broadcasting {} centroids against {} points over {} features",
        centroids.nrows(),
        points.nrows(),
        points.ncols()
    );

    // (n_centroids, 1, n_features) - (1, n_points, n_features)
    let diffs = &centroids.view().insert_axis(Axis(1)) - &points.view().insert_axis(Axis(0));
    // Summed left to right, in the same order as `L2Dist::rdistance`, so both kernels and
    // the fused predictor agree bit for bit and break ties identically.
    let distances = diffs
        .mapv_into(|diff| diff * diff)
        .map_axis(Axis(2), |lane| lane.iter().fold(F::zero(), |acc, &sq| acc + sq))
        .mapv_into(|sq| sq.sqrt());
    Ok(distances)
}

/// Distance between every centroid and every point under an arbitrary metric.
///
/// Same shapes as [`pairwise_distances`]. Rows of the result are computed in parallel, one
/// centroid per task, without any intermediate allocation besides the output.
pub fn pairwise_distances_with<F: Float, D: Distance<F>>(
    dist_fn: &D,
    points: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    centroids: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
) -> Result<Array2<F>> {
    check_features(points.ncols(), centroids.ncols())?;

    let mut distances = Array2::zeros((centroids.nrows(), points.nrows()));
    Zip::from(distances.rows_mut())
        .and(centroids.rows())
        .par_for_each(|mut row, centroid| {
            Zip::from(&mut row)
                .and(points.rows())
                .for_each(|dist, point| *dist = dist_fn.distance(centroid.view(), point));
        });
    Ok(distances)
}

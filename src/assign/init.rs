use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use rand::Rng;

use crate::error::{Error, Result};
use linfa::Float;

/// Draw `n_clusters` distinct indices uniformly at random from `0..n_samples`.
///
/// The draw is a partial Fisher–Yates shuffle of the index vector: after `i` swaps the first
/// `i` slots hold a uniform sample without replacement, so stopping after `n_clusters` swaps
/// is enough. The order of the returned indices carries no meaning.
///
/// Fails with [`Error::InvalidCount`] when `n_clusters` is zero and with
/// [`Error::InsufficientPopulation`] when `n_clusters > n_samples`.
///
/// ```
/// use linfa_pairwise::sample_indices;
/// use rand::SeedableRng;
/// use rand_isaac::Isaac64Rng;
///
/// let mut rng = Isaac64Rng::seed_from_u64(42);
/// let mut indices = sample_indices(&mut rng, 4, 4).unwrap();
/// indices.sort_unstable();
/// assert_eq!(indices, vec![0, 1, 2, 3]);
/// ```
pub fn sample_indices<R: Rng + ?Sized>(
    rng: &mut R,
    n_samples: usize,
    n_clusters: usize,
) -> Result<Vec<usize>> {
    if n_clusters == 0 {
        return Err(Error::InvalidCount { count: n_clusters });
    }
    if n_clusters > n_samples {
        return Err(Error::InsufficientPopulation {
            population: n_samples,
            count: n_clusters,
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    for i in 0..n_clusters {
        let j = rng.gen_range(i..n_samples);
        indices.swap(i, j);
    }
    indices.truncate(n_clusters);
    Ok(indices)
}

/// Pick `n_clusters` distinct rows of `observations` as the initial centroids.
///
/// Returns a matrix with shape `(n_clusters, n_features)`.
pub fn random_init<F: Float, R: Rng + ?Sized>(
    rng: &mut R,
    n_clusters: usize,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array2<F>> {
    let indices = sample_indices(rng, observations.nrows(), n_clusters)?;
    log::debug!(
        "initialised {} centroids from rows {:?} of {} observations",
        n_clusters,
        indices,
        observations.nrows()
    );
    Ok(observations.select(Axis(0), &indices))
}

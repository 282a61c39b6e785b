use approx::assert_abs_diff_eq;
use ndarray::{array, Array, Array2, Axis};
use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
use rand_isaac::Isaac64Rng;
use rand_xoshiro::Xoshiro256Plus;

use linfa_pairwise::prelude::*;

fn scenario() -> (Array2<f64>, Array2<f64>) {
    let points = array![[5.49, 4.86], [5.64, 6.52], [4.76, 4.76], [6.57, 5.76]];
    let centroids = array![[5.49, 4.86], [5.64, 6.52]];
    (points, centroids)
}

#[test]
fn scenario_distances_and_assignments() {
    let (points, centroids) = scenario();

    let distances = pairwise_distances(&points, &centroids).unwrap();
    assert_abs_diff_eq!(
        distances,
        array![
            [0.0, 1.6668, 0.7368, 1.4058],
            [1.6668, 0.0, 1.9677, 1.2010]
        ],
        epsilon = 1e-4
    );
    assert_eq!(assign_nearest(&distances).unwrap(), array![0, 1, 0, 1]);

    let assigner = PairwiseAssigner::new(centroids).unwrap();
    assert_eq!(assigner.predict(&points), array![0, 1, 0, 1]);
    let assignment = assigner.assign(&points).unwrap();
    assert_abs_diff_eq!(
        assignment.distances(),
        &array![0.0, 0.0, 0.7368, 1.2010],
        epsilon = 1e-4
    );
    assert_eq!(assignment.memberships(), &array![0, 1, 0, 1]);
}

#[test]
fn sample_then_distances_then_assign() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let points: Array2<f64> = Array::random_using((40, 3), Uniform::new(-20., 20.), &mut rng);

    let indices = sample_indices(&mut rng, points.nrows(), 5).unwrap();
    let centroids = points.select(Axis(0), &indices);
    let distances = pairwise_distances(&points, &centroids).unwrap();
    let memberships = assign_nearest(&distances).unwrap();

    assert_eq!(distances.dim(), (5, 40));
    assert!(memberships.iter().all(|&k| k < 5));
    assert!(distances.iter().all(|&d| d >= 0.0));
    // sampled points sit on their own centroid
    for (k, &n) in indices.iter().enumerate() {
        assert_abs_diff_eq!(distances[[k, n]], 0.0);
        assert_eq!(memberships[n], k);
    }
}

#[test]
fn all_paths_agree_on_many_features() {
    let mut rng = Xoshiro256Plus::seed_from_u64(16);
    let points: Array2<f64> = Array::random_using((500, 16), Uniform::new(0., 1.), &mut rng);
    let indices = sample_indices(&mut rng, points.nrows(), 12).unwrap();
    let centroids = points.select(Axis(0), &indices);

    let broadcast = pairwise_distances(&points, &centroids).unwrap();
    assert_eq!(
        broadcast,
        pairwise_distances_with(&L2Dist, &points, &centroids).unwrap()
    );

    let memberships = assign_nearest(&broadcast).unwrap();
    let assigner = PairwiseAssigner::new(centroids).unwrap();
    assert_eq!(assigner.predict(&points), memberships);
    let assignment = assigner.assign(&points).unwrap();
    assert_eq!(assignment.memberships(), &memberships);
    for (n, &k) in memberships.iter().enumerate() {
        assert_eq!(assignment.distances()[n], broadcast[[k, n]]);
    }
}

#[test]
fn every_point_gets_a_valid_index() {
    let mut rng = Xoshiro256Plus::seed_from_u64(7);
    for n_clusters in 1..8 {
        let points: Array2<f32> = Array::random_using((30, 2), Uniform::new(-1., 1.), &mut rng);
        let centroids: Array2<f32> =
            Array::random_using((n_clusters, 2), Uniform::new(-1., 1.), &mut rng);
        let memberships = assign_nearest(&pairwise_distances(&points, &centroids).unwrap()).unwrap();
        assert_eq!(memberships.len(), 30);
        assert!(memberships.iter().all(|&k| k < n_clusters));
    }
}

#[test]
fn dimension_mismatch() {
    let points = array![[1., 2.], [3., 4.]];
    let centroids = array![[1., 2., 3.]];
    assert_eq!(
        pairwise_distances(&points, &centroids),
        Err(Error::DimensionMismatch {
            points: 2,
            centroids: 3
        })
    );
}

#[test]
fn full_sample_is_a_permutation() {
    let mut rng = Isaac64Rng::seed_from_u64(1);
    for n in 1..20 {
        let mut indices = sample_indices(&mut rng, n, n).unwrap();
        indices.sort_unstable();
        assert_eq!(indices, (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn sampling_errors() {
    let mut rng = Isaac64Rng::seed_from_u64(1);
    assert_eq!(
        sample_indices(&mut rng, 4, 5),
        Err(Error::InsufficientPopulation {
            population: 4,
            count: 5
        })
    );
    assert_eq!(
        sample_indices(&mut rng, 4, 0),
        Err(Error::InvalidCount { count: 0 })
    );
}

use linfa_pairwise::{assign_nearest, pairwise_distances, sample_indices, PairwiseAssigner};
use ndarray::{array, Axis};
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// Walk through the assignment step of k-means one array operation at a time,
// printing every intermediate result, then check it against the library.
fn main() -> Result<(), linfa_pairwise::Error> {
    let points = array![[5.49, 4.86], [5.64, 6.52], [4.76, 4.76], [6.57, 5.76]];
    println!("points {:?}:\n{}\n", points.shape(), points);

    // Our random number generator, seeded for reproducibility
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let indices = sample_indices(&mut rng, points.nrows(), 2)?;
    println!("centroid indices, drawn without replacement: {:?}\n", indices);

    let centroids = points.select(Axis(0), &indices);
    println!("centroids {:?}:\n{}\n", centroids.shape(), centroids);

    // Insert a unit axis so the two sets broadcast against each other
    let centroids_3d = centroids.view().insert_axis(Axis(1));
    let points_3d = points.view().insert_axis(Axis(0));
    println!(
        "centroids {:?} and points {:?} broadcast to {:?}\n",
        centroids_3d.shape(),
        points_3d.shape(),
        [centroids.nrows(), points.nrows(), points.ncols()]
    );

    let diffs = &centroids_3d - &points_3d;
    println!("differences {:?}:\n{}\n", diffs.shape(), diffs);

    let squared = diffs.mapv(|d| d * d);
    println!("squared {:?}:\n{}\n", squared.shape(), squared);

    let summed = squared.map_axis(Axis(2), |lane| lane.iter().fold(0.0, |acc, &sq| acc + sq));
    println!("summed over features {:?}:\n{}\n", summed.shape(), summed);

    let distances = summed.mapv(f64::sqrt);
    println!("distances {:?}:\n{:.4}\n", distances.shape(), distances);

    let memberships = assign_nearest(&distances)?;
    println!("closest centroid per point: {}\n", memberships);

    // The library computes the same thing in one call
    assert_eq!(distances, pairwise_distances(&points, &centroids)?);
    let assigner = PairwiseAssigner::new(centroids)?;
    let assignment = assigner.assign(&points)?;
    assert_eq!(&memberships, assignment.memberships());
    println!(
        "cluster sizes: {}, inertia: {:.4}",
        assignment.cluster_sizes(),
        assignment.inertia()
    );

    Ok(())
}

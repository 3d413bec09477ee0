//! Cluster partitioning
//!
//! Seeded k-means (k-means++ initialisation, Lloyd iterations, best of
//! several restarts by inertia). Used as a diagnostic grouping of members;
//! the result never feeds the group profile.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Tuning for [`ClusterPartitioner`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of clusters to form
    pub clusters: usize,
    /// Independent initialisations; the lowest-inertia run wins
    pub restarts: usize,
    /// Seed shared by every run so results are reproducible
    pub seed: u64,
    /// Upper bound on Lloyd iterations per restart
    pub max_iterations: usize,
    /// Convergence threshold on total squared centroid movement
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            clusters: 3,
            restarts: 10,
            seed: 42,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Result of partitioning a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Cluster label per member, in record order
    pub labels: Vec<usize>,
    /// Centroids in normalized feature space
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from members to their centroid
    pub inertia: f64,
}

impl ClusterAssignment {
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    pub fn label_for(&self, member: usize) -> Option<usize> {
        self.labels.get(member).copied()
    }

    /// Member count per cluster
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.cluster_count()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// k-means partitioner over fixed-width feature vectors
///
/// # Example
///
/// ```
/// use packvote_domain::consensus::{ClusterPartitioner, ClusteringConfig};
///
/// let points = [[0.0, 0.0], [0.1, 0.0], [5.0, 5.0], [5.1, 5.0], [10.0, 0.0]];
/// let partitioner = ClusterPartitioner::new(ClusteringConfig::default());
/// let assignment = partitioner.partition(&points);
///
/// assert_eq!(assignment.labels.len(), 5);
/// assert_eq!(assignment.labels[0], assignment.labels[1]);
/// assert_ne!(assignment.labels[0], assignment.labels[2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterPartitioner {
    config: ClusteringConfig,
}

struct Run<const N: usize> {
    labels: Vec<usize>,
    centroids: Vec<[f64; N]>,
    inertia: f64,
}

impl ClusterPartitioner {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Partition `points` into at most `config.clusters` clusters.
    ///
    /// When there are fewer points than clusters, the cluster count shrinks to
    /// the number of points. Identical points are valid input: every run still
    /// terminates and every point receives a label.
    pub fn partition<const N: usize>(&self, points: &[[f64; N]]) -> ClusterAssignment {
        let k = self.config.clusters.max(1).min(points.len());
        if k == 0 {
            return ClusterAssignment {
                labels: Vec::new(),
                centroids: Vec::new(),
                inertia: 0.0,
            };
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best = self.run_once(points, k, &mut rng);

        for _ in 1..self.config.restarts {
            let run = self.run_once(points, k, &mut rng);
            if run.inertia < best.inertia {
                best = run;
            }
        }

        ClusterAssignment {
            labels: best.labels,
            centroids: best.centroids.iter().map(|c| c.to_vec()).collect(),
            inertia: best.inertia,
        }
    }

    fn run_once<const N: usize>(&self, points: &[[f64; N]], k: usize, rng: &mut StdRng) -> Run<N> {
        let mut centroids = seed_centroids(points, k, rng);
        let mut labels = vec![0; points.len()];

        for _ in 0..self.config.max_iterations.max(1) {
            assign_labels(points, &centroids, &mut labels);

            let updated = recompute_centroids(points, &labels, &centroids);
            let shift: f64 = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| squared_distance(old, new))
                .sum();
            centroids = updated;

            if shift <= self.config.tolerance {
                break;
            }
        }

        // Labels must match the final centroids
        assign_labels(points, &centroids, &mut labels);
        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(p, &l)| squared_distance(p, &centroids[l]))
            .sum();

        Run {
            labels,
            centroids,
            inertia,
        }
    }
}

/// k-means++ seeding; falls back to uniform picks when every remaining point
/// coincides with an existing centroid.
fn seed_centroids<const N: usize>(points: &[[f64; N]], k: usize, rng: &mut StdRng) -> Vec<[f64; N]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| nearest(p, &centroids).1)
            .collect();
        let total: f64 = weights.iter().sum();

        let chosen = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut index = points.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    index = i;
                    break;
                }
                target -= w;
            }
            index
        } else {
            rng.random_range(0..points.len())
        };
        centroids.push(points[chosen]);
    }

    centroids
}

fn assign_labels<const N: usize>(points: &[[f64; N]], centroids: &[[f64; N]], labels: &mut [usize]) {
    for (label, point) in labels.iter_mut().zip(points) {
        *label = nearest(point, centroids).0;
    }
}

/// Mean of each cluster's members; an empty cluster keeps its previous centroid
fn recompute_centroids<const N: usize>(
    points: &[[f64; N]],
    labels: &[usize],
    previous: &[[f64; N]],
) -> Vec<[f64; N]> {
    let mut sums = vec![[0.0; N]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for d in 0..N {
            sums[label][d] += point[d];
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((mut sum, count), prev)| {
            if count == 0 {
                return *prev;
            }
            for value in sum.iter_mut() {
                *value /= count as f64;
            }
            sum
        })
        .collect()
}

/// Index of and squared distance to the closest centroid (lowest index on ties)
fn nearest<const N: usize>(point: &[f64; N], centroids: &[[f64; N]]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn squared_distance<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitioner() -> ClusterPartitioner {
        ClusterPartitioner::new(ClusteringConfig::default())
    }

    #[test]
    fn test_separates_obvious_clusters() {
        let points = [
            [-1.0, -1.0],
            [-1.1, -0.9],
            [0.0, 1.5],
            [0.1, 1.4],
            [1.5, -1.0],
            [1.4, -1.1],
        ];
        let assignment = partitioner().partition(&points);

        assert_eq!(assignment.cluster_count(), 3);
        assert_eq!(assignment.labels[0], assignment.labels[1]);
        assert_eq!(assignment.labels[2], assignment.labels[3]);
        assert_eq!(assignment.labels[4], assignment.labels[5]);
        assert_ne!(assignment.labels[0], assignment.labels[2]);
        assert_ne!(assignment.labels[2], assignment.labels[4]);
        assert_eq!(assignment.sizes(), vec![2, 2, 2]);
    }

    #[test]
    fn test_identical_points_terminate_with_labels() {
        let points = [[0.0, 0.0]; 5];
        let assignment = partitioner().partition(&points);

        assert_eq!(assignment.labels.len(), 5);
        assert!(assignment.labels.iter().all(|&l| l < assignment.cluster_count()));
        assert_eq!(assignment.inertia, 0.0);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let points = [[0.3, 1.2], [-0.4, 0.8], [1.9, -0.2], [0.0, 0.0], [-1.5, -1.7], [0.7, 0.9]];
        let first = partitioner().partition(&points);
        let second = partitioner().partition(&points);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fewer_points_than_clusters() {
        let assignment = partitioner().partition(&[[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(assignment.cluster_count(), 2);
        assert_ne!(assignment.labels[0], assignment.labels[1]);
    }

    #[test]
    fn test_empty_input() {
        let assignment = partitioner().partition::<2>(&[]);
        assert!(assignment.labels.is_empty());
        assert_eq!(assignment.cluster_count(), 0);
    }

    #[test]
    fn test_label_lookup() {
        let assignment = partitioner().partition(&[[0.0], [10.0], [20.0]]);
        assert!(assignment.label_for(2).is_some());
        assert!(assignment.label_for(3).is_none());
    }
}

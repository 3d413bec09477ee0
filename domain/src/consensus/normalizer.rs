//! Feature normalization
//!
//! Standardizes each feature column to zero mean and unit variance using the
//! population mean and standard deviation of the group, so that budgets in
//! the thousands and durations in days weigh comparably during clustering.

/// Per-column standard scaler fitted on one group's feature matrix
///
/// # Example
///
/// ```
/// use packvote_domain::consensus::FeatureNormalizer;
///
/// let points = [[3000.0, 4.0], [5000.0, 4.0]];
/// let normalizer = FeatureNormalizer::fit(&points);
/// let scaled = normalizer.transform(&points);
///
/// assert_eq!(scaled[0][0], -1.0);
/// assert_eq!(scaled[1][0], 1.0);
/// // zero variance column: centered, not scaled
/// assert_eq!(scaled[0][1], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureNormalizer<const N: usize> {
    means: [f64; N],
    scales: [f64; N],
}

impl<const N: usize> FeatureNormalizer<N> {
    /// Fit column means and population standard deviations.
    ///
    /// A column whose standard deviation is zero (every member submitted the
    /// same value) gets a scale of 1.0, so it is only centered.
    pub fn fit(points: &[[f64; N]]) -> Self {
        let mut means = [0.0; N];
        let mut scales = [1.0; N];

        if points.is_empty() {
            return Self { means, scales };
        }

        let count = points.len() as f64;
        for column in 0..N {
            let mean = points.iter().map(|p| p[column]).sum::<f64>() / count;
            let variance = points
                .iter()
                .map(|p| (p[column] - mean).powi(2))
                .sum::<f64>()
                / count;
            let std_dev = variance.sqrt();

            means[column] = mean;
            scales[column] = if std_dev > f64::EPSILON { std_dev } else { 1.0 };
        }

        Self { means, scales }
    }

    /// Apply the fitted transform
    pub fn transform(&self, points: &[[f64; N]]) -> Vec<[f64; N]> {
        points
            .iter()
            .map(|point| {
                let mut scaled = [0.0; N];
                for column in 0..N {
                    scaled[column] = (point[column] - self.means[column]) / self.scales[column];
                }
                scaled
            })
            .collect()
    }

    /// Fit on `points` and transform them in one step
    pub fn fit_transform(points: &[[f64; N]]) -> Vec<[f64; N]> {
        Self::fit(points).transform(points)
    }

    pub fn means(&self) -> &[f64; N] {
        &self.means
    }

    pub fn scales(&self) -> &[f64; N] {
        &self.scales
    }
}

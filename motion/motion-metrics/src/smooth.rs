//! Savitzky–Golay smoothing of derived scalar signals.
//!
//! A least-squares polynomial of order `p` is fitted over a sliding window of
//! `w` samples and evaluated at the window centre. Near either end of a run
//! the fit over the first (or last) full window is evaluated at the
//! off-centre position instead, so the output has the input's length and no
//! samples are invented by reflection.
//!
//! Smoothing operates on contiguous runs of available values only. A
//! not-available entry splits the signal; runs shorter than the window use
//! the largest odd window that fits, or are passed through unchanged if even
//! that cannot support the polynomial order.

use std::collections::BTreeMap;

use motion_types::{DerivedSample, Metric};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::config::{SmoothingConfig, validate_window};
use crate::error::{MetricsError, Result};

/// Least-squares fit for one window length and order.
///
/// Holds the centre convolution weights and the projection from a window of
/// samples to polynomial coefficients, so storage grows linearly with the
/// window.
///
/// # Example
///
/// ```
/// use motion_metrics::SavitzkyGolay;
///
/// let filter = SavitzkyGolay::new(5, 2).unwrap();
///
/// // A quadratic is reproduced exactly, including at the ends.
/// let signal: Vec<f64> = (0..8).map(|i| f64::from(i * i)).collect();
/// let smoothed = filter.apply(&signal);
/// for (a, b) in signal.iter().zip(&smoothed) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SavitzkyGolay {
    window: usize,
    order: usize,
    /// Weights for the window centre.
    center: Vec<f64>,
    /// `(order + 1) × window`; maps window samples to coefficients in `x`.
    projection: DMatrix<f64>,
}

impl SavitzkyGolay {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSmoothingConfig`] if the window is even,
    /// below 3 or below `order + 2`, and [`MetricsError::DegenerateFit`] if
    /// the least-squares system cannot be solved.
    pub fn new(window: usize, order: usize) -> Result<Self> {
        validate_window(window, order)?;

        let design = design_matrix(window, order);
        let normal = design.transpose() * &design;
        let projection = normal
            .svd(true, true)
            .solve(&design.transpose(), 1e-12)
            .map_err(|e| {
                MetricsError::degenerate_fit(format!("window {window}, order {order}: {e}"))
            })?;

        // The fitted value at x = 0 is the constant coefficient.
        let center = projection.row(0).iter().copied().collect();

        Ok(Self {
            window,
            order,
            center,
            projection,
        })
    }

    /// Window length in samples.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Polynomial order.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Weights applied at the window centre; they sum to one.
    #[must_use]
    pub fn center_weights(&self) -> &[f64] {
        &self.center
    }

    /// Smooths `series`, returning a sequence of the same length.
    ///
    /// A series shorter than the window is returned unchanged.
    #[must_use]
    pub fn apply(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let w = self.window;
        if n < w {
            return series.to_vec();
        }
        let half = w / 2;
        let mut out = vec![0.0; n];

        let lead = self.fit(&series[..w]);
        let trail = self.fit(&series[n - w..]);
        for i in 0..half {
            out[i] = evaluate(&lead, offset(i, half));
            out[n - 1 - i] = evaluate(&trail, offset(w - 1 - i, half));
        }
        for i in half..n - half {
            out[i] = dot(&self.center, &series[i - half..=i + half]);
        }
        out
    }

    /// Polynomial coefficients fitted to one full window.
    fn fit(&self, window: &[f64]) -> DVector<f64> {
        &self.projection * DVector::from_column_slice(window)
    }
}

/// Vandermonde matrix with rows `[1, x, x², …]` for `x = -half..=half`.
fn design_matrix(window: usize, order: usize) -> DMatrix<f64> {
    let half = window / 2;
    DMatrix::from_fn(window, order + 1, |row, col| {
        let x = offset(row, half);
        let mut value = 1.0;
        for _ in 0..col {
            value *= x;
        }
        value
    })
}

#[allow(clippy::cast_precision_loss)]
fn offset(index: usize, half: usize) -> f64 {
    index as f64 - half as f64
}

fn dot(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(c, y)| c * y).sum()
}

fn evaluate(coeffs: &DVector<f64>, x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Applies a [`SmoothingConfig`] to signals with gaps.
///
/// Filters are built on first use for each window length a run needs and
/// cached for the lifetime of the smoother, so one smoother can serve many
/// tracks.
#[derive(Debug, Clone)]
pub struct Smoother {
    config: SmoothingConfig,
    filters: BTreeMap<usize, SavitzkyGolay>,
}

impl Smoother {
    /// Creates a smoother.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSmoothingConfig`] if smoothing is
    /// enabled with an invalid window/order pair.
    pub fn new(config: SmoothingConfig) -> Result<Self> {
        if config.enabled {
            config.validate()?;
        }
        Ok(Self {
            config,
            filters: BTreeMap::new(),
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Smooths each contiguous run of available values independently.
    ///
    /// Not-available positions stay not available. With smoothing disabled
    /// the input is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::DegenerateFit`] if a shortened filter cannot
    /// be built.
    pub fn smooth_series(&mut self, series: &[Metric<f64>]) -> Result<Vec<Metric<f64>>> {
        let mut out = series.to_vec();
        if !self.config.enabled {
            return Ok(out);
        }

        let mut start = 0;
        while start < series.len() {
            if series[start].is_not_available() {
                start += 1;
                continue;
            }
            let mut end = start;
            let mut run = Vec::new();
            while let Some(Metric::Available(v)) = series.get(end) {
                run.push(*v);
                end += 1;
            }

            if let Some(filter) = self.filter_for(run.len())? {
                for (slot, value) in out[start..end].iter_mut().zip(filter.apply(&run)) {
                    *slot = Metric::Available(value);
                }
            }
            start = end;
        }
        Ok(out)
    }

    /// Filter for a run of `len` samples, or `None` if the run is too short
    /// to smooth at the configured order.
    fn filter_for(&mut self, len: usize) -> Result<Option<&SavitzkyGolay>> {
        let window = if len >= self.config.window {
            self.config.window
        } else {
            // Largest odd window that fits.
            let shrunk = if len % 2 == 0 { len.saturating_sub(1) } else { len };
            if validate_window(shrunk, self.config.polyorder).is_err() {
                debug!(
                    run = len,
                    window = self.config.window,
                    "Run too short to smooth; keeping raw values"
                );
                return Ok(None);
            }
            debug!(run = len, window = shrunk, "Shrinking smoothing window for short run");
            shrunk
        };

        if !self.filters.contains_key(&window) {
            let filter = SavitzkyGolay::new(window, self.config.polyorder)?;
            self.filters.insert(window, filter);
        }
        Ok(self.filters.get(&window))
    }
}

impl Smoother {
    /// Smooths speed, acceleration magnitude and angular speed of one track.
    ///
    /// Smoothed fields are written from the `*_raw` fields, which are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::DegenerateFit`] if a filter cannot be built.
    pub fn smooth_track(&mut self, samples: &mut [DerivedSample]) -> Result<()> {
        let speed_raw: Vec<_> = samples.iter().map(|s| s.speed_raw).collect();
        let accel_raw: Vec<_> = samples.iter().map(|s| s.acceleration_raw).collect();
        let angular_raw: Vec<_> = samples.iter().map(|s| s.angular_speed_raw).collect();

        let speed = self.smooth_series(&speed_raw)?;
        let accel = self.smooth_series(&accel_raw)?;
        let angular = self.smooth_series(&angular_raw)?;

        for (i, sample) in samples.iter_mut().enumerate() {
            sample.speed = speed[i];
            sample.acceleration_magnitude = accel[i];
            sample.angular_speed = angular[i];
        }
        Ok(())
    }
}

/// Smooths one track with a fresh [`Smoother`].
///
/// # Errors
///
/// Returns [`MetricsError::InvalidSmoothingConfig`] for an invalid
/// configuration and [`MetricsError::DegenerateFit`] if a filter cannot be
/// built.
pub fn smooth_track(samples: &mut [DerivedSample], config: &SmoothingConfig) -> Result<()> {
    Smoother::new(*config)?.smooth_track(samples)
}

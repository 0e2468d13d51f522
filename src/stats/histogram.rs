//! Equal-width binning for the age histogram.

/// Number of bins used for the age distribution chart.
pub const AGE_HISTOGRAM_BINS: usize = 30;

/// One histogram bin covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `[min, max]` of `values` into `bins` equal-width bins and count the
/// values in each.
///
/// A constant input is widened to `[v - 0.5, v + 0.5]`. Empty input or zero
/// bins yield no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - low) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

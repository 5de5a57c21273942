/// Equal-width frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal bins spanning
    /// `[min, max]`; the last bin is closed on the right.
    ///
    /// A constant series spans `[v - 0.5, v + 0.5]`. `None` when there are no
    /// finite values or `bins == 0`.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let finite = || values.iter().copied().filter(|v| v.is_finite());
        let lo = finite().fold(f64::INFINITY, f64::min);
        let hi = finite().fold(f64::NEG_INFINITY, f64::max);
        if lo > hi {
            return None;
        }
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
        let mut counts = vec![0; bins];
        for v in finite() {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// `[bin centre, count]` per bin.
    pub fn bars(&self) -> Vec<[f64; 2]> {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| [(edge[0] + edge[1]) / 2.0, count as f64])
            .collect()
    }
}

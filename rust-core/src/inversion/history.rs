//! Append-only record of root estimates across iterations

/// Negative root values found at the start of an iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeRootWarning {
    /// 1-based iteration index
    pub iteration: usize,

    /// Most negative root value (m)
    pub min_root_m: f64,

    /// Number of profile points below zero
    pub count: usize,
}

/// Root snapshots plus per-iteration diagnostics
///
/// Holds `num_iterations + 1` snapshots after a run: the Airy estimate
/// followed by one per correction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationHistory {
    roots: Vec<Vec<f64>>,
    residual_rms_ms2: Vec<f64>,
    warnings: Vec<NegativeRootWarning>,
}

impl IterationHistory {
    pub(crate) fn with_capacity(num_iterations: usize) -> Self {
        Self {
            roots: Vec::with_capacity(num_iterations + 1),
            residual_rms_ms2: Vec::with_capacity(num_iterations),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn push_root(&mut self, root: Vec<f64>) {
        self.roots.push(root);
    }

    pub(crate) fn push_residual_rms(&mut self, rms: f64) {
        self.residual_rms_ms2.push(rms);
    }

    pub(crate) fn push_warning(&mut self, warning: NegativeRootWarning) {
        self.warnings.push(warning);
    }

    /// All root snapshots (m), initial estimate first
    pub fn roots(&self) -> &[Vec<f64>] {
        &self.roots
    }

    /// Airy isostatic starting root
    pub fn initial(&self) -> Option<&[f64]> {
        self.roots.first().map(Vec::as_slice)
    }

    pub fn latest(&self) -> Option<&[f64]> {
        self.roots.last().map(Vec::as_slice)
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// RMS of the gravity residual (m/s^2), one entry per iteration
    pub fn residual_rms_ms2(&self) -> &[f64] {
        &self.residual_rms_ms2
    }

    pub fn negative_root_warnings(&self) -> &[NegativeRootWarning] {
        &self.warnings
    }
}

/// Minimum and count of negative entries, if any
pub(crate) fn negative_root_summary(root: &[f64]) -> Option<(f64, usize)> {
    let count = root.iter().filter(|&&v| v < 0.0).count();
    if count == 0 {
        return None;
    }
    let min = root.iter().copied().fold(f64::INFINITY, f64::min);
    Some((min, count))
}

/// Root mean square of a signal
pub(crate) fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_summary() {
        assert_eq!(negative_root_summary(&[0.0, 1.0, 2.0]), None);
        assert_eq!(negative_root_summary(&[3.0, -1.5, -4.0, 0.0]), Some((-4.0, 2)));
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[3.0, -4.0]) - (12.5_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_history_accessors() {
        let mut history = IterationHistory::with_capacity(2);
        assert!(history.is_empty());
        assert!(history.initial().is_none());

        history.push_root(vec![1.0, 2.0]);
        history.push_root(vec![3.0, 4.0]);
        history.push_residual_rms(1e-4);

        assert_eq!(history.len(), 2);
        assert_eq!(history.initial(), Some(&[1.0, 2.0][..]));
        assert_eq!(history.latest(), Some(&[3.0, 4.0][..]));
        assert_eq!(history.residual_rms_ms2(), &[1e-4]);
    }
}

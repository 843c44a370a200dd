/// Point-in-time audit of the merged dataset against the official list.
///
/// Regenerated on every verifier run and never persisted as mutable state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoverageReport {
    pub total_official: usize,
    pub total_registered: usize,
    /// Official characters the dataset fails to cover. A completeness defect
    /// to fix before a release, but not a build failure.
    pub missing: Vec<char>,
    /// Registered characters outside the official set. Informational only.
    pub extra: Vec<char>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Count of official characters the dataset does cover.
    pub fn covered(&self) -> usize {
        self.total_official - self.missing.len()
    }
}

#[cfg(test)]
mod tests {
    use super::CoverageReport;

    #[test]
    fn covered_accounts_for_missing() {
        let report = CoverageReport {
            total_official: 3,
            total_registered: 2,
            missing: vec!['丁'],
            extra: vec![],
        };
        assert_eq!(report.covered(), 2);
        assert!(!report.is_complete());
    }
}

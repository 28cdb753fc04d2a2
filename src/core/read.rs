/// The subset of a spanning-read alignment record used for dropout detection.
///
/// Every tag is optional; absence is meaningful and is never encoded as a
/// sentinel value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedRead {
    /// Query name, used only for diagnostics
    pub name: Option<String>,
    /// `TR` tag: identifier of the tandem repeat the read spans
    pub region_id: Option<String>,
    /// `rq` tag: read accuracy in [0, 1]
    pub read_quality: Option<f32>,
    /// Phred-scaled base qualities
    pub base_qualities: Option<Vec<u8>>,
    /// `HP` tag
    pub haplotype: Option<i64>,
    /// `PS` tag. Presence implies a phased read; not used for bucketing.
    pub phase_set: Option<i64>,
}

impl AlignedRead {
    pub fn new(region_id: impl Into<String>) -> Self {
        Self {
            region_id: Some(region_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_read_quality(mut self, rq: f32) -> Self {
        self.read_quality = Some(rq);
        self
    }

    #[must_use]
    pub fn with_base_qualities(mut self, quals: Vec<u8>) -> Self {
        self.base_qualities = Some(quals);
        self
    }

    #[must_use]
    pub fn with_haplotype(mut self, hp: i64) -> Self {
        self.haplotype = Some(hp);
        self
    }

    #[must_use]
    pub fn with_phase_set(mut self, ps: i64) -> Self {
        self.phase_set = Some(ps);
        self
    }
}

/// Estimate read accuracy from phred-scaled base qualities as
/// `1 - mean(10^(-q/10))`. An empty array yields 0.0.
#[must_use]
pub fn read_quality_from_base_qualities(quals: &[u8]) -> f64 {
    if quals.is_empty() {
        return 0.0;
    }

    let expected_errors: f64 = quals
        .iter()
        .map(|&q| 10f64.powf(-0.1 * f64::from(q)))
        .sum();

    #[allow(clippy::cast_precision_loss)] // Read lengths fit comfortably in f64
    let mean_error = expected_errors / quals.len() as f64;
    1.0 - mean_error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_quality_from_base_qualities() {
        assert!((read_quality_from_base_qualities(&[10]) - 0.9).abs() < 1e-9);
        assert!((read_quality_from_base_qualities(&[20]) - 0.99).abs() < 1e-9);
        assert!((read_quality_from_base_qualities(&[30, 30]) - 0.999).abs() < 1e-9);
        // Mean of error probabilities 0.1 and 0.001
        assert!((read_quality_from_base_qualities(&[10, 30]) - 0.9495).abs() < 1e-9);
        assert!(read_quality_from_base_qualities(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let read = AlignedRead::new("trA")
            .with_name("m84/1/ccs")
            .with_read_quality(0.995)
            .with_haplotype(1)
            .with_phase_set(1234);

        assert_eq!(read.region_id.as_deref(), Some("trA"));
        assert_eq!(read.name.as_deref(), Some("m84/1/ccs"));
        assert_eq!(read.haplotype, Some(1));
        assert_eq!(read.phase_set, Some(1234));
        assert!(read.base_qualities.is_none());
    }
}

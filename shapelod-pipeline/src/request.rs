//! Parameters for a decimation run

use serde::{Deserialize, Serialize};
use shapelod_core::{Error, Result};

/// Parameters for one decimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecimationRequest {
    /// Fraction of the original face count to keep, in (0, 1].
    /// A ratio of 1.0 returns an identical copy. Default: 0.5
    pub ratio: f32,

    /// Detect UV island borders and freeze their edges so texture seams
    /// survive simplification unchanged. Default: true
    pub protect_uv_seams: bool,

    /// Never collapse edges touching the mesh boundary. When false,
    /// boundary collapses are penalized instead of forbidden. Default: false
    pub preserve_boundary: bool,

    /// Penalty added to boundary edge costs when `preserve_boundary` is
    /// false. Higher values make boundary edges collapse last. Default: 100.0
    pub boundary_weight: f64,

    /// Stop collapsing once the cheapest remaining candidate exceeds this
    /// quadric error. If None, only the face target limits the run.
    pub error_threshold: Option<f64>,
}

impl Default for DecimationRequest {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            protect_uv_seams: true,
            preserve_boundary: false,
            boundary_weight: 100.0,
            error_threshold: None,
        }
    }
}

impl DecimationRequest {
    /// Create a request keeping the given fraction of faces.
    #[must_use]
    pub fn with_ratio(ratio: f32) -> Self {
        Self {
            ratio,
            ..Default::default()
        }
    }

    /// Set UV seam protection.
    #[must_use]
    pub const fn with_seam_protection(mut self, protect: bool) -> Self {
        self.protect_uv_seams = protect;
        self
    }

    /// Set hard boundary preservation.
    #[must_use]
    pub const fn with_preserve_boundary(mut self, preserve: bool) -> Self {
        self.preserve_boundary = preserve;
        self
    }

    /// Set the maximum collapse error.
    #[must_use]
    pub const fn with_error_threshold(mut self, threshold: f64) -> Self {
        self.error_threshold = Some(threshold);
        self
    }

    /// Reject ratios outside (0, 1] before any work begins.
    pub fn validate(&self) -> Result<()> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 || self.ratio > 1.0 {
            return Err(Error::InvalidRatio(self.ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = DecimationRequest::default();
        assert!((request.ratio - 0.5).abs() < 0.001);
        assert!(request.protect_uv_seams);
        assert!(!request.preserve_boundary);
        assert!(request.error_threshold.is_none());
    }

    #[test]
    fn test_builder() {
        let request = DecimationRequest::with_ratio(0.3)
            .with_seam_protection(false)
            .with_preserve_boundary(true)
            .with_error_threshold(0.01);

        assert!((request.ratio - 0.3).abs() < 0.001);
        assert!(!request.protect_uv_seams);
        assert!(request.preserve_boundary);
        assert_eq!(request.error_threshold, Some(0.01));
    }

    #[test]
    fn test_validation() {
        assert!(DecimationRequest::with_ratio(0.5).validate().is_ok());
        assert!(DecimationRequest::with_ratio(1.0).validate().is_ok());

        for bad in [0.0, -0.5, 1.01, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                DecimationRequest::with_ratio(bad).validate(),
                Err(Error::InvalidRatio(_))
            ));
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let request = DecimationRequest::with_ratio(0.25).with_preserve_boundary(true);
        let json = serde_json::to_string(&request).unwrap();
        let back: DecimationRequest = serde_json::from_str(&json).unwrap();
        assert!((back.ratio - 0.25).abs() < 0.001);
        assert!(back.preserve_boundary);
    }
}

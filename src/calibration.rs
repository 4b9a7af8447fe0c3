//! Scene calibration state
//!
//! Two reference lines drawn over the photograph define the measurement
//! frame: the ground line marks zero height, and the scale line carries a
//! user-supplied real-world length from which the pixels-per-unit ratio is
//! derived. Measurement is possible once both are set; the order in which
//! they are set does not matter.

use crate::geometry::Line;

/// Errors raised by invalid scale calibration input
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    /// The user-supplied physical length must be strictly positive
    #[error("non-positive scale length: {0}")]
    NonPositiveRealLength(f32),

    /// The drawn scale line has coincident endpoints
    #[error("scale line has zero length")]
    DegenerateScaleLine,
}

/// Calibration state for a photographed scene
///
/// Invariant: `pixels_per_unit` is set iff both the scale line and a positive
/// real length are set. The most recent assignment to a role wins; one role
/// holds one line at a time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationState {
    /// Reference line representing zero height
    ground: Option<Line>,
    /// Reference line of known physical length
    scale: Option<Line>,
    /// Physical length represented by the scale line
    real_length: Option<f32>,
    /// Derived: pixel length of the scale line per real-world unit
    pixels_per_unit: Option<f32>,
    /// Unit of measurement for reported heights (e.g., "cm", "mm")
    unit: String,
}

impl CalibrationState {
    /// Create an empty calibration state reporting heights in centimetres
    pub fn new() -> Self {
        Self::with_unit("cm")
    }

    /// Create an empty calibration state with an explicit measurement unit
    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self {
            ground: None,
            scale: None,
            real_length: None,
            pixels_per_unit: None,
            unit: unit.into(),
        }
    }

    /// Replace the ground line unconditionally
    ///
    /// A degenerate (zero-length) ground line is accepted; heights measured
    /// against it come out as NaN rather than an error.
    pub fn set_ground(&mut self, line: Line) {
        self.ground = Some(line);
    }

    /// Replace the scale line and the real-world length it represents
    ///
    /// Rejects a non-positive real length or a degenerate line, leaving any
    /// prior calibration untouched. On success the derived pixels-per-unit
    /// ratio is updated; the last successful call wins.
    pub fn set_scale(&mut self, line: Line, real_length: f32) -> Result<(), CalibrationError> {
        if real_length <= 0.0 {
            return Err(CalibrationError::NonPositiveRealLength(real_length));
        }
        if line.is_degenerate() {
            return Err(CalibrationError::DegenerateScaleLine);
        }

        self.scale = Some(line);
        self.real_length = Some(real_length);
        self.pixels_per_unit = Some(line.length() / real_length);
        Ok(())
    }

    /// Get the ground line, if set
    pub fn ground(&self) -> Option<&Line> {
        self.ground.as_ref()
    }

    /// Get the scale line, if set
    pub fn scale(&self) -> Option<&Line> {
        self.scale.as_ref()
    }

    /// Get the real-world length assigned to the scale line, if set
    pub fn real_length(&self) -> Option<f32> {
        self.real_length
    }

    /// Get the derived pixels-per-unit ratio, if set
    pub fn pixels_per_unit(&self) -> Option<f32> {
        self.pixels_per_unit
    }

    /// Get the measurement unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Check whether measurement is possible
    ///
    /// True iff both the ground line and the scale ratio are set. This is a
    /// two-flag gate, not an ordered state machine.
    pub fn is_calibrated(&self) -> bool {
        self.ground.is_some() && self.pixels_per_unit.is_some()
    }

    /// Convert a pixel distance to real-world units
    ///
    /// Returns `None` until the scale has been set.
    pub fn to_real_world(&self, pixels: f32) -> Option<f32> {
        self.pixels_per_unit.map(|ratio| pixels / ratio)
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new()
    }
}

//! Measurement engine
//!
//! Derives the real-world height of every annotated point from the current
//! calibration. The table is recomputed from scratch after any calibration
//! or annotation change; stale rows must never be trusted.

use crate::annotation::{AnnotationId, AnnotationStore};
use crate::calibration::CalibrationState;
use crate::geometry::{point_to_line_distance, Point};

/// A derived measurement for one annotation
///
/// `annotation_id` is the stable annotation id. The display/export row index
/// is the position in the recomputed sequence and is a separate concept:
/// row indices reset on every recompute, ids never do.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementRow {
    /// Stable id of the measured annotation
    pub annotation_id: AnnotationId,

    /// Height above the ground line in real-world units
    ///
    /// NaN when the ground line is degenerate.
    pub height: f32,

    /// Group ("tube") label of the annotation
    pub group: String,

    /// Marked position in pixel coordinates
    pub position: Point,
}

/// Recompute the measurement table from scratch
///
/// Returns one row per annotation in insertion order, or an empty sequence
/// while calibration is incomplete. Pure and deterministic with respect to
/// its two inputs: calling it twice with no intervening mutation yields
/// identical output.
pub fn recompute(calibration: &CalibrationState, store: &AnnotationStore) -> Vec<MeasurementRow> {
    let (ground, pixels_per_unit) = match (calibration.ground(), calibration.pixels_per_unit()) {
        (Some(ground), Some(ratio)) => (ground, ratio),
        _ => return Vec::new(),
    };

    store
        .all()
        .iter()
        .map(|annotation| {
            let position = annotation.position();
            let height_px = point_to_line_distance(&position, ground).unwrap_or(f32::NAN);
            MeasurementRow {
                annotation_id: annotation.id(),
                height: height_px / pixels_per_unit,
                group: annotation.group().to_string(),
                position,
            }
        })
        .collect()
}

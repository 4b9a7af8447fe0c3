//! Measurement session orchestration
//!
//! [`MeasurementSession`] is the entry point the presentation layer drives:
//! it owns the calibration state and the annotation store, enforces the
//! calibration gate before points can be added, and rebuilds the derived
//! measurement table after every mutation.
//!
//! The session is single-threaded and synchronous: each mutation is handled
//! to completion before the next, so readers always see a table consistent
//! with the current calibration and annotations.

use crate::annotation::{Annotation, AnnotationId, AnnotationStore};
use crate::calibration::{CalibrationError, CalibrationState};
use crate::csv_export::{self, CsvExportConfig, CsvExportResult};
use crate::geometry::{Line, Point};
use crate::measurement::{self, MeasurementRow};
use std::io::Write;
use std::path::Path;

/// Errors raised by session-level operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A point was added before both reference lines were defined
    #[error("define the ground line and scale before adding points")]
    NotCalibrated,
}

/// A measurement session over one photograph
#[derive(Debug, Default)]
pub struct MeasurementSession {
    calibration: CalibrationState,
    store: AnnotationStore,
    rows: Vec<MeasurementRow>,
}

impl MeasurementSession {
    /// Create an empty session reporting heights in centimetres
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with an explicit measurement unit
    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self {
            calibration: CalibrationState::with_unit(unit),
            ..Default::default()
        }
    }

    /// Replace the ground line and rebuild the table
    pub fn set_ground_line(&mut self, line: Line) {
        log::debug!("ground line set, length {:.2} px", line.length());
        self.calibration.set_ground(line);
        self.refresh();
    }

    /// Replace the scale line and its real-world length, then rebuild the table
    ///
    /// On error the previous calibration and the table are left untouched.
    pub fn set_scale_line(&mut self, line: Line, real_length: f32) -> Result<(), CalibrationError> {
        self.calibration.set_scale(line, real_length)?;
        log::debug!(
            "scale set: {:.2} px = {} {}",
            line.length(),
            real_length,
            self.calibration.unit()
        );
        self.refresh();
        Ok(())
    }

    /// Mark a fly point at `position` under the current group
    ///
    /// Rejected with [`SessionError::NotCalibrated`] until both the ground
    /// line and the scale have been defined.
    pub fn add_point(&mut self, position: Point) -> Result<AnnotationId, SessionError> {
        if !self.calibration.is_calibrated() {
            log::warn!(
                "point at ({:.1}, {:.1}) rejected: calibration incomplete",
                position.x,
                position.y
            );
            return Err(SessionError::NotCalibrated);
        }

        let id = self.store.add(position).id();
        self.refresh();
        Ok(id)
    }

    /// Remove the annotation with `id`
    ///
    /// Unknown ids are a no-op returning `None`; the table is untouched.
    pub fn remove_point(&mut self, id: AnnotationId) -> Option<Annotation> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.refresh();
        }
        removed
    }

    /// Change the group label applied to subsequently added points
    pub fn set_group(&mut self, label: impl Into<String>) {
        self.store.set_current_group(label);
    }

    /// The current measurement table, one row per annotation in insertion order
    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    /// Read access to the calibration state
    pub fn calibration(&self) -> &CalibrationState {
        &self.calibration
    }

    /// Read access to the annotation store
    pub fn annotations(&self) -> &AnnotationStore {
        &self.store
    }

    /// Write the current table as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> CsvExportResult<()> {
        csv_export::export_rows_csv(
            writer,
            &self.rows,
            self.calibration.unit(),
            &CsvExportConfig::default(),
        )
    }

    /// Export the current table to a CSV file at `destination`
    ///
    /// Export reads state only; a failed write leaves the session unchanged.
    pub fn export_csv(&self, destination: &Path) -> CsvExportResult<()> {
        csv_export::export_rows_to_path(destination, &self.rows, self.calibration.unit())
    }

    fn refresh(&mut self) {
        self.rows = measurement::recompute(&self.calibration, &self.store);
    }
}

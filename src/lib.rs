//! Fly Height Measurement Core
//!
//! Calibration and measurement model for a photo-based height-measurement
//! tool. An operator calibrates a photographed scene with a reference ground
//! line and a scale line of known physical length, then marks point
//! annotations ("flies") whose perpendicular distance to the ground line is
//! reported as a real-world height and exported as CSV.
//!
//! The presentation layer (image display, drawing, tables) is an external
//! collaborator that drives [`MeasurementSession`] and renders its rows.

pub mod annotation;
pub mod calibration;
pub mod csv_export;
pub mod geometry;
pub mod measurement;
pub mod session;

pub use annotation::{Annotation, AnnotationId, AnnotationStore, DEFAULT_GROUP};
pub use calibration::{CalibrationError, CalibrationState};
pub use csv_export::{
    export_rows_csv, export_rows_to_path, CsvExportConfig, CsvExportError, CsvExportResult,
};
pub use geometry::{point_to_line_distance, Line, Point};
pub use measurement::{recompute, MeasurementRow};
pub use session::{MeasurementSession, SessionError};

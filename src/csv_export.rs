//! CSV export for the measurement table
//!
//! Writes the derived measurement rows as comma-separated values for
//! analysis in external tools.

use crate::measurement::MeasurementRow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Error types for CSV export
#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CsvExportResult<T> = Result<T, CsvExportError>;

/// Configuration for CSV export
#[derive(Debug, Clone)]
pub struct CsvExportConfig {
    /// Include the column header row in the output
    pub include_headers: bool,

    /// CSV delimiter character
    pub delimiter: u8,
}

impl Default for CsvExportConfig {
    fn default() -> Self {
        Self {
            include_headers: true,
            delimiter: b',',
        }
    }
}

/// Export measurement rows to CSV format
///
/// CSV columns:
/// - ID: 0-based display index of the row, not the stable annotation id
/// - Height (`<unit>`): height above the ground line, 2-decimal fixed
/// - Group: group ("tube") label
/// - Position X (px): marked x position, 2-decimal fixed
/// - Position Y (px): marked y position, 2-decimal fixed
///
/// Rows are written in the given order. The export reads state only; a
/// failed write never corrupts calibration or annotations.
pub fn export_rows_csv<W: Write>(
    writer: W,
    rows: &[MeasurementRow],
    unit: &str,
    config: &CsvExportConfig,
) -> CsvExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.include_headers)
        .from_writer(writer);

    if config.include_headers {
        let height_header = format!("Height ({})", unit);
        csv_writer.write_record([
            "ID",
            height_header.as_str(),
            "Group",
            "Position X (px)",
            "Position Y (px)",
        ])?;
    }

    for (index, row) in rows.iter().enumerate() {
        csv_writer.write_record(&[
            index.to_string(),
            format!("{:.2}", row.height),
            row.group.clone(),
            format!("{:.2}", row.position.x),
            format!("{:.2}", row.position.y),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export measurement rows to a CSV file at `path`
///
/// The destination is created or truncated. IO failures surface as
/// [`CsvExportError::Io`].
pub fn export_rows_to_path(path: &Path, rows: &[MeasurementRow], unit: &str) -> CsvExportResult<()> {
    let file = File::create(path)?;
    export_rows_csv(file, rows, unit, &CsvExportConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationId;
    use crate::geometry::Point;

    fn row(annotation_id: AnnotationId, height: f32, group: &str, x: f32, y: f32) -> MeasurementRow {
        MeasurementRow {
            annotation_id,
            height,
            group: group.to_string(),
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_header_carries_unit() {
        let mut output = Vec::new();
        export_rows_csv(&mut output, &[], "cm", &CsvExportConfig::default()).unwrap();

        let content = String::from_utf8(output).unwrap();
        assert_eq!(
            content.trim_end(),
            "ID,Height (cm),Group,Position X (px),Position Y (px)"
        );
    }

    #[test]
    fn test_single_row_export() {
        let mut output = Vec::new();
        let rows = vec![row(0, 10.0, "Tube 1", 50.0, 50.0)];
        export_rows_csv(&mut output, &rows, "cm", &CsvExportConfig::default()).unwrap();

        let content = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "0,10.00,Tube 1,50.00,50.00");
    }

    #[test]
    fn test_id_column_is_display_index() {
        // Annotation ids 3 and 7 survive earlier removals; the export still
        // numbers rows from zero
        let rows = vec![
            row(3, 1.5, "A", 10.0, 20.0),
            row(7, 2.25, "B", 30.0, 40.0),
        ];

        let mut output = Vec::new();
        export_rows_csv(&mut output, &rows, "cm", &CsvExportConfig::default()).unwrap();

        let content = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "0,1.50,A,10.00,20.00");
        assert_eq!(lines[2], "1,2.25,B,30.00,40.00");
    }

    #[test]
    fn test_two_decimal_rounding() {
        let rows = vec![row(0, 1.2345, "A", 0.456, 99.999)];
        let mut output = Vec::new();
        export_rows_csv(&mut output, &rows, "cm", &CsvExportConfig::default()).unwrap();

        let content = String::from_utf8(output).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "0,1.23,A,0.46,100.00");
    }

    #[test]
    fn test_without_headers() {
        let rows = vec![row(0, 2.0, "A", 1.0, 2.0)];
        let mut output = Vec::new();
        let config = CsvExportConfig {
            include_headers: false,
            ..Default::default()
        };
        export_rows_csv(&mut output, &rows, "cm", &config).unwrap();

        let content = String::from_utf8(output).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("0,2.00"));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measurements.csv");

        let rows = vec![row(0, 10.0, "Tube 1", 50.0, 50.0)];
        export_rows_to_path(&path, &rows, "cm").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("ID,Height (cm)"));
        assert!(content.contains("0,10.00,Tube 1,50.00,50.00"));
    }

    #[test]
    fn test_export_to_unwritable_path_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("measurements.csv");

        let err = export_rows_to_path(&path, &[], "cm").unwrap_err();
        assert!(matches!(err, CsvExportError::Io(_)));
    }
}

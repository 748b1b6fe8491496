//! Protest events CSV loader.
//!
//! Column names come from the config so datasets exported from different
//! spreadsheets can be mapped without editing them. Coordinate columns must
//! parse as finite numbers in range; anything else is malformed input and
//! fails the load.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use geo::Point;

use crate::config::InputConfig;
use crate::{ProtestMapError, Result};

use super::ProtestRecord;

/// Resolved header positions for the configured columns.
struct ColumnIndices {
    description: usize,
    location: usize,
    event_type: usize,
    longitude: usize,
    latitude: usize,
}

/// Read the protest CSV at `path` into records.
pub fn load_protests(path: &Path, input: &InputConfig) -> Result<Vec<ProtestRecord>> {
    let file = File::open(path).map_err(|e| {
        ProtestMapError::DataError(format!(
            "Failed to open protest CSV {}: {}",
            path.display(),
            e
        ))
    })?;
    let mut rdr = ReaderBuilder::new().from_reader(file);
    let headers = rdr
        .headers()
        .map_err(|e| {
            ProtestMapError::DataError(format!(
                "Failed to read CSV headers from {}: {}",
                path.display(),
                e
            ))
        })?
        .clone();

    let idx = ColumnIndices {
        description: find_column(&headers, &input.description_column)?,
        location: find_column(&headers, &input.location_column)?,
        event_type: find_column(&headers, &input.event_type_column)?,
        longitude: find_column(&headers, &input.longitude_column)?,
        latitude: find_column(&headers, &input.latitude_column)?,
    };

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        // Spreadsheet-style line number: header is line 1.
        let line = row + 2;
        let record = result.map_err(|e| {
            ProtestMapError::DataError(format!("Malformed CSV row at line {}: {}", line, e))
        })?;

        let longitude = parse_coordinate(&record, idx.longitude, line, "longitude")?;
        let latitude = parse_coordinate(&record, idx.latitude, line, "latitude")?;
        if longitude.abs() > 180.0 {
            return Err(ProtestMapError::DataError(format!(
                "Longitude {} out of range at line {}",
                longitude, line
            )));
        }
        // Strictly below the poles: +/-90 cannot be projected to Mercator.
        if latitude.abs() >= 90.0 {
            return Err(ProtestMapError::DataError(format!(
                "Latitude {} out of range at line {}",
                latitude, line
            )));
        }

        records.push(ProtestRecord {
            description: field(&record, idx.description),
            location: field(&record, idx.location),
            event_type: field(&record, idx.event_type),
            point: Point::new(longitude, latitude),
        });
    }

    Ok(records)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        ProtestMapError::DataError(format!("Column '{}' not found in protest CSV", name))
    })
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").to_string()
}

fn parse_coordinate(record: &StringRecord, idx: usize, line: usize, label: &str) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    let value: f64 = raw.parse().map_err(|_| {
        ProtestMapError::DataError(format!(
            "Coordinate {} '{}' at line {} is not a number",
            label, raw, line
        ))
    })?;
    if !value.is_finite() {
        return Err(ProtestMapError::DataError(format!(
            "Coordinate {} at line {} is not finite",
            label, line
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("protests.csv");
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_basic_rows() {
        let (_dir, path) = write_csv(
            "Description,Location,Event Type,Longitude,Latitude\n\
             March on the green,State College,March,-77.86,40.79\n\
             Sit-in at the library,City University,Sit-in,2.35,48.85\n",
        );
        let records = load_protests(&path, &InputConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, "State College");
        assert_eq!(records[1].event_type, "Sit-in");
        assert_eq!(records[1].point.x(), 2.35);
        assert_eq!(records[1].point.y(), 48.85);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err =
            load_protests(Path::new("/nonexistent/p.csv"), &InputConfig::default()).unwrap_err();
        assert!(matches!(err, ProtestMapError::DataError(_)));
    }

    #[test]
    fn test_missing_column_reported_by_name() {
        let (_dir, path) = write_csv("Description,Location,Longitude,Latitude\na,b,0,0\n");
        let err = load_protests(&path, &InputConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Event Type"));
    }

    #[test]
    fn test_bad_coordinate_is_data_error() {
        let (_dir, path) = write_csv(
            "Description,Location,Event Type,Longitude,Latitude\n\
             a,b,c,not-a-number,40.0\n",
        );
        let err = load_protests(&path, &InputConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("longitude"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_polar_latitude_rejected() {
        let (_dir, path) = write_csv(
            "Description,Location,Event Type,Longitude,Latitude\n\
             a,b,c,0.0,90.0\n",
        );
        assert!(load_protests(&path, &InputConfig::default()).is_err());
    }

    #[test]
    fn test_headers_only_gives_empty_set() {
        let (_dir, path) = write_csv("Description,Location,Event Type,Longitude,Latitude\n");
        let records = load_protests(&path, &InputConfig::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_renamed_columns() {
        let (_dir, path) = write_csv(
            "Description of Protest,School Name,Event Type (F3),Lon,Lat\n\
             Walkout,Tech Institute,Walkout,13.4,52.5\n",
        );
        let input = InputConfig {
            description_column: "Description of Protest".to_string(),
            location_column: "School Name".to_string(),
            event_type_column: "Event Type (F3)".to_string(),
            longitude_column: "Lon".to_string(),
            latitude_column: "Lat".to_string(),
            ..InputConfig::default()
        };
        let records = load_protests(&path, &input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "Tech Institute");
    }
}

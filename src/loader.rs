//! CSV catalog ingestion.
//!
//! Parses the two catalog inputs:
//!
//! - segment CSV with header `id,start_m,end_m,cost_resurfacing`
//! - distress CSV with header `id,location_m,deduction,cost_local`
//!
//! Rows with an empty `id` are skipped; a reversed extent (`end < start`)
//! is normalized by swapping the bounds. A file with headers but no data
//! rows is an [`InvalidCatalog`](crate::error::Error::InvalidCatalog)
//! error. Structural validation beyond that (negative costs, duplicate
//! IDs) is the catalog's job at run entry.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Action, Distress, Extent};

#[derive(Debug, Deserialize)]
struct SegmentRecord {
    id: String,
    start_m: f64,
    end_m: f64,
    cost_resurfacing: f64,
}

#[derive(Debug, Deserialize)]
struct DistressRecord {
    id: String,
    location_m: f64,
    deduction: f64,
    cost_local: f64,
}

/// Reads resurfacing-segment actions from CSV.
pub fn segments_from_csv<R: Read>(reader: R) -> Result<Vec<Action>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut actions = Vec::new();

    for record in csv_reader.deserialize() {
        let record: SegmentRecord = record?;
        if record.id.trim().is_empty() {
            continue;
        }

        let (start, end) = if record.end_m < record.start_m {
            (record.end_m, record.start_m)
        } else {
            (record.start_m, record.end_m)
        };

        actions.push(Action {
            id: record.id.trim().to_string(),
            extent: Some(Extent::new(start, end)),
            cost: record.cost_resurfacing,
            benefit: 0.0,
        });
    }

    if actions.is_empty() {
        return Err(Error::InvalidCatalog(
            "segment CSV contains no data rows".into(),
        ));
    }
    Ok(actions)
}

/// Reads distresses from CSV.
pub fn distresses_from_csv<R: Read>(reader: R) -> Result<Vec<Distress>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut distresses = Vec::new();

    for record in csv_reader.deserialize() {
        let record: DistressRecord = record?;
        if record.id.trim().is_empty() {
            continue;
        }
        distresses.push(Distress::new(
            record.id.trim(),
            record.location_m,
            record.deduction,
            record.cost_local,
        ));
    }

    if distresses.is_empty() {
        return Err(Error::InvalidCatalog(
            "distress CSV contains no data rows".into(),
        ));
    }
    Ok(distresses)
}

/// Reads segment actions from a CSV file.
pub fn segments_from_path(path: impl AsRef<Path>) -> Result<Vec<Action>> {
    segments_from_csv(File::open(path)?)
}

/// Reads distresses from a CSV file.
pub fn distresses_from_path(path: impl AsRef<Path>) -> Result<Vec<Distress>> {
    distresses_from_csv(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEGMENT_CSV: &str = "\
id,start_m,end_m,cost_resurfacing
S1,0,300,9000
S2,300,700,14000
S3,650,900,11000
";

    const DISTRESS_CSV: &str = "\
id,location_m,deduction,cost_local
D1,100,20,400
D2,250,15,350
";

    #[test]
    fn test_parse_segments() {
        let actions = segments_from_csv(SEGMENT_CSV.as_bytes()).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].id, "S1");
        let extent = actions[1].extent.unwrap();
        assert_eq!(extent.start, 300.0);
        assert_eq!(extent.end, 700.0);
        assert_eq!(actions[2].cost, 11_000.0);
    }

    #[test]
    fn test_parse_distresses() {
        let distresses = distresses_from_csv(DISTRESS_CSV.as_bytes()).unwrap();
        assert_eq!(distresses.len(), 2);
        assert_eq!(distresses[0].id, "D1");
        assert_eq!(distresses[1].deduction, 15.0);
        assert_eq!(distresses[1].cost_local, 350.0);
    }

    #[test]
    fn test_reversed_extent_normalized() {
        let csv = "id,start_m,end_m,cost_resurfacing\nS1,300,0,9000\n";
        let actions = segments_from_csv(csv.as_bytes()).unwrap();
        let extent = actions[0].extent.unwrap();
        assert_eq!(extent.start, 0.0);
        assert_eq!(extent.end, 300.0);
    }

    #[test]
    fn test_empty_id_rows_skipped() {
        let csv = "id,start_m,end_m,cost_resurfacing\n,0,300,9000\nS2,300,700,14000\n";
        let actions = segments_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, "S2");
    }

    #[test]
    fn test_header_only_is_error() {
        let csv = "id,location_m,deduction,cost_local\n";
        assert!(matches!(
            distresses_from_csv(csv.as_bytes()),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "id,start_m,end_m\nS1,0,300\n";
        assert!(matches!(
            segments_from_csv(csv.as_bytes()),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_non_numeric_field_is_csv_error() {
        let csv = "id,start_m,end_m,cost_resurfacing\nS1,zero,300,9000\n";
        assert!(matches!(
            segments_from_csv(csv.as_bytes()),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEGMENT_CSV.as_bytes()).unwrap();

        let actions = segments_from_path(file.path()).unwrap();
        assert_eq!(actions.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            segments_from_path("/nonexistent/segments.csv"),
            Err(Error::Io(_))
        ));
    }
}

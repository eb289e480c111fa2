//! Events dataset: loaded once at startup, read-only afterwards

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::models::EarthquakeRecord;

/// Columns the charts depend on
pub const REQUIRED_COLUMNS: [&str; 5] = ["year", "date", "mag", "latitude", "longitude"];

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug)]
pub struct Dataset {
    records: Vec<EarthquakeRecord>,
    years: Vec<i32>,
    source: String,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let source = path.display().to_string();
        let file = File::open(path).map_err(|e| DataError::Io {
            path: source.clone(),
            source: e,
        })?;
        Self::from_reader(file, source)
    }

    /// Parse CSV from any reader, checking the header before any row
    pub fn from_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<Self, DataError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for result in rdr.deserialize::<EarthquakeRecord>() {
            let record = result.map_err(|e| DataError::MalformedRecord {
                line: e.position().map(|p| p.line()).unwrap_or_default(),
                message: e.to_string(),
            })?;
            records.push(record);
        }

        let years = records
            .iter()
            .filter_map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            records,
            years,
            source: source.into(),
        })
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    /// Distinct years, ascending; rows without a year are left out
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_CSV: &str = "\
time,year,date,mag,latitude,longitude,depth,magType
2023-03-01T10:00:00Z,2023,2023-03-01,4.1,35.1,-117.6,8.2,ml
2024-01-05T02:11:00Z,2024,2024-01-05,5.3,38.3,142.4,24.0,mww
2022-07-19T23:40:00Z,2022,2022-07-19,3.2,19.4,-155.3,1.1,md
2024-06-01T12:00:00Z,2024,2024-06-01,6.0,-33.5,-70.6,35.0,mww
2023-11-20T08:30:00Z,2023,2023-11-20,4.8,36.2,28.0,10.0,mb
";

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_complete_csv() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), "sample").unwrap();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.years(), &[2022, 2023, 2024]);
        assert_eq!(dataset.records()[1].mag, Some(5.3));
        assert_eq!(dataset.records()[1].date.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn test_missing_mag_column_is_named() {
        let csv = "year,date,latitude,longitude\n2024,2024-01-01,1.0,2.0\n";
        let err = Dataset::from_reader(csv.as_bytes(), "sample").unwrap_err();
        match &err {
            DataError::MissingColumns(cols) => assert_eq!(cols, &vec!["mag".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("mag"));
    }

    #[test]
    fn test_all_missing_columns_reported() {
        let csv = "time,depth\n2024-01-01,10.0\n";
        let err = Dataset::from_reader(csv.as_bytes(), "sample").unwrap_err();
        match err {
            DataError::MissingColumns(cols) => assert_eq!(cols, REQUIRED_COLUMNS.to_vec()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let csv = "year,date,mag,latitude,longitude\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "sample").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.years().is_empty());
    }

    #[test]
    fn test_float_year_column() {
        let csv = "year,date,mag,latitude,longitude\n2021.0,2021-05-05,4.0,1.0,2.0\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "sample").unwrap();
        assert_eq!(dataset.years(), &[2021]);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let csv = "year,date,mag,latitude,longitude\n2024,2024-01-01,4.0,1.0,2.0\n2024,2024-01-02,big,1.0,2.0\n";
        let err = Dataset::from_reader(csv.as_bytes(), "sample").unwrap_err();
        match err {
            DataError::MalformedRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cells_load_as_missing() {
        let csv = "year,date,mag,latitude,longitude\n2024,2024-01-01,4.0,1.0,2.0\n2024,2024-01-02,,1.0,2.0\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "sample").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].mag, Some(4.0));
        assert_eq!(dataset.records()[1].mag, None);
        assert_eq!(dataset.records()[1].latitude, Some(1.0));
    }

    #[test]
    fn test_empty_cells_in_every_typed_column() {
        let csv = "year,date,mag,latitude,longitude\n2023,2023-01-01,3.0,1.0,2.0\n, ,,,\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "sample").unwrap();
        assert_eq!(
            dataset.records()[1],
            EarthquakeRecord {
                year: None,
                date: None,
                mag: None,
                latitude: None,
                longitude: None,
            }
        );
        assert_eq!(dataset.years(), &[2023]);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.source(), file.path().display().to_string());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/events.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

use std::{
    collections::{hash_map::Entry, HashMap},
    fs::File,
    io::Read,
    path::Path,
};

use csv::StringRecord;
use flate2::read::GzDecoder;
use kdam::tqdm;

use super::{normalize_local_authority_code, normalize_region_code, StopCoordinate};
use crate::{
    config::{DuplicateStopPolicy, StopTableColumns},
    TxcError,
};

/// lookup from stop identifier to its coordinate and administrative areas.
///
/// built once per run and never modified afterward. archive workers share
/// it by reference, as all access is read-only.
#[derive(Debug, Default)]
pub struct StopIndex {
    stops: HashMap<String, StopCoordinate>,
    duplicates: usize,
    excluded: usize,
}

impl StopIndex {
    /// reads a stop coordinate table. a `.gz` suffix is decompressed.
    ///
    /// rows with a missing or non-numeric latitude or longitude are excluded.
    /// the region and local-authority columns are optional; when absent, every
    /// stop is indexed without those areas.
    pub fn try_from_csv(
        path: &Path,
        columns: &StopTableColumns,
        duplicate_policy: DuplicateStopPolicy,
    ) -> Result<StopIndex, TxcError> {
        let filename = path.to_string_lossy().to_string();
        let file = File::open(path).map_err(|e| TxcError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let gzipped = path.extension().is_some_and(|e| e == "gz");
        let reader: Box<dyn Read> = if gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| TxcError::StopTableError(filename.clone(), e.to_string()))?
            .clone();

        let required = |name: &str| {
            column_position(&headers, name).ok_or_else(|| {
                TxcError::StopTableError(filename.clone(), format!("missing column '{name}'"))
            })
        };
        let id_col = required(&columns.stop_id)?;
        let lat_col = required(&columns.latitude)?;
        let lon_col = required(&columns.longitude)?;
        let region_col = column_position(&headers, &columns.region);
        let la_col = column_position(&headers, &columns.local_authority);
        if region_col.is_none() {
            log::warn!("stop table {filename} has no '{}' column", columns.region);
        }
        if la_col.is_none() {
            log::warn!(
                "stop table {filename} has no '{}' column",
                columns.local_authority
            );
        }

        let mut index = StopIndex::default();
        let row_iter = tqdm!(csv_reader.records(), desc = format!("reading {filename}"));
        for (row_idx, row) in row_iter.enumerate() {
            let record = row.map_err(|e| {
                TxcError::StopTableError(filename.clone(), format!("row {row_idx}: {e}"))
            })?;
            let stop_id = record.get(id_col).map(str::trim).unwrap_or_default();
            let latitude = parse_coordinate(record.get(lat_col));
            let longitude = parse_coordinate(record.get(lon_col));
            match (stop_id, latitude, longitude) {
                ("", _, _) | (_, None, _) | (_, _, None) => index.excluded += 1,
                (id, Some(lat), Some(lon)) => {
                    let region = region_col
                        .and_then(|c| record.get(c))
                        .and_then(normalize_region_code);
                    let local_authority = la_col
                        .and_then(|c| record.get(c))
                        .and_then(normalize_local_authority_code);
                    let stop = StopCoordinate::new(id.to_string(), lat, lon, region, local_authority);
                    index.insert(stop, duplicate_policy);
                }
            }
        }
        eprintln!();

        index.log_statistics(&filename);
        Ok(index)
    }

    /// builds an index from coordinates already in memory.
    pub fn from_coordinates<I>(stops: I, duplicate_policy: DuplicateStopPolicy) -> StopIndex
    where
        I: IntoIterator<Item = StopCoordinate>,
    {
        let mut index = StopIndex::default();
        for stop in stops {
            index.insert(stop, duplicate_policy);
        }
        index
    }

    fn insert(&mut self, stop: StopCoordinate, duplicate_policy: DuplicateStopPolicy) {
        match self.stops.entry(stop.stop_id.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(stop);
            }
            Entry::Occupied(mut entry) => {
                self.duplicates += 1;
                if duplicate_policy == DuplicateStopPolicy::LastWins {
                    entry.insert(stop);
                }
            }
        }
    }

    fn log_statistics(&self, source: &str) {
        log::info!("indexed {} stops from {source}", self.stops.len());
        if self.excluded > 0 {
            log::info!(
                "excluded {} rows of {source} with missing coordinates",
                self.excluded
            );
        }
        if self.duplicates > 0 {
            log::warn!(
                "{} duplicate stop identifiers found in {source}",
                self.duplicates
            );
        }
    }

    pub fn get(&self, stop_id: &str) -> Option<&StopCoordinate> {
        self.stops.get(stop_id)
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.stops.contains_key(stop_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// number of rows that repeated an identifier already in the index
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// number of table rows dropped for a missing identifier or coordinate
    pub fn excluded(&self) -> usize {
        self.excluded
    }
}

fn column_position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod test {
    use super::StopIndex;
    use crate::config::{DuplicateStopPolicy, StopTableColumns};
    use crate::stops::StopCoordinate;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;
    use std::path::PathBuf;

    fn test_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("txc-metrics-stops-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test dir should be creatable");
        dir
    }

    fn stop(id: &str, lat: f64) -> StopCoordinate {
        StopCoordinate::new(id.to_string(), lat, -1.0, None, None)
    }

    const STOPS_CSV: &str = "\
stop_id,latitude,longitude,region_code,local_authority_code
S1,51.5,-0.12,L,1.0
S2,,-0.13,L,1.0
S3,53.48,-2.24,NW,nan
S4,53.40,not-a-number,NW,4
S1,51.6,-0.14,L,2.0
";

    #[test]
    fn test_duplicates_last_wins() {
        let index = StopIndex::from_coordinates(
            vec![stop("A", 1.0), stop("A", 2.0)],
            DuplicateStopPolicy::LastWins,
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.get("A").map(|s| s.latitude), Some(2.0));
    }

    #[test]
    fn test_duplicates_first_wins() {
        let index = StopIndex::from_coordinates(
            vec![stop("A", 1.0), stop("A", 2.0)],
            DuplicateStopPolicy::FirstWins,
        );
        assert_eq!(index.get("A").map(|s| s.latitude), Some(1.0));
    }

    #[test]
    fn test_read_csv_excludes_missing_coordinates() {
        let path = test_dir().join("stops.csv");
        std::fs::write(&path, STOPS_CSV).expect("write stops");
        let index = StopIndex::try_from_csv(
            &path,
            &StopTableColumns::default(),
            DuplicateStopPolicy::LastWins,
        )
        .expect("stop table should load");

        assert_eq!(index.len(), 2);
        assert_eq!(index.excluded(), 2);
        assert_eq!(index.duplicates(), 1);
        assert!(!index.contains("S2"));
        assert!(!index.contains("S4"));

        let s1 = index.get("S1").expect("S1 indexed");
        assert_eq!(s1.latitude, 51.6);
        assert_eq!(s1.local_authority.as_deref(), Some("2"));
        let s3 = index.get("S3").expect("S3 indexed");
        assert_eq!(s3.region.as_deref(), Some("NW"));
        assert_eq!(s3.local_authority, None);
    }

    #[test]
    fn test_read_gzipped_csv() {
        let path = test_dir().join("stops.csv.gz");
        let file = std::fs::File::create(&path).expect("create gz");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(STOPS_CSV.as_bytes()).expect("write gz");
        encoder.finish().expect("finish gz");

        let index = StopIndex::try_from_csv(
            &path,
            &StopTableColumns::default(),
            DuplicateStopPolicy::FirstWins,
        )
        .expect("gzipped stop table should load");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("S1").map(|s| s.latitude), Some(51.5));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let path = test_dir().join("no_latitude.csv");
        std::fs::write(&path, "stop_id,lat,longitude\nS1,51.5,-0.1\n").expect("write stops");
        let result = StopIndex::try_from_csv(
            &path,
            &StopTableColumns::default(),
            DuplicateStopPolicy::LastWins,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_area_columns() {
        let path = test_dir().join("no_areas.csv");
        std::fs::write(&path, "stop_id,latitude,longitude\nS1,51.5,-0.1\n").expect("write stops");
        let index = StopIndex::try_from_csv(
            &path,
            &StopTableColumns::default(),
            DuplicateStopPolicy::LastWins,
        )
        .expect("stop table should load");
        let s1 = index.get("S1").expect("S1 indexed");
        assert_eq!(s1.region, None);
        assert_eq!(s1.local_authority, None);
    }
}

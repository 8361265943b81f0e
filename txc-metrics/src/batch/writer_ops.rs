use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use flate2::{write::GzEncoder, Compression};
use kdam::tqdm;

use super::{AreaSummary, BatchSummary, FailureRow};
use crate::{metrics::RouteMetricsRecord, TxcError};

/// writes the route metrics table in one pass. a `.gz` suffix gzips the output.
///
/// # Arguments
///
/// * `path` - output file
/// * `records` - rows in output order
/// * `extended` - write the extended column set
/// * `geometry` - add the route WKT column, extended only
/// * `overwrite` - replace an existing file instead of failing
pub fn write_records<'a, I>(
    path: &Path,
    records: I,
    extended: bool,
    geometry: bool,
    overwrite: bool,
) -> Result<usize, TxcError>
where
    I: IntoIterator<Item = &'a RouteMetricsRecord>,
{
    let filename = path.to_string_lossy().to_string();
    let mut writer = create_writer(path, overwrite)?;
    writer
        .write_record(RouteMetricsRecord::csv_header(extended, geometry))
        .map_err(|e| TxcError::CsvWriteError(filename.clone(), e))?;
    let mut n_rows = 0;
    for record in tqdm!(records.into_iter(), desc = "write route metrics") {
        writer
            .write_record(record.csv_row(extended, geometry))
            .map_err(|e| TxcError::CsvWriteError(filename.clone(), e))?;
        n_rows += 1;
    }
    eprintln!();
    finish_writer(writer, &filename)?;
    log::info!("wrote {n_rows} route records to {filename}");
    Ok(n_rows)
}

/// writes one row per region and local authority touched by the records
pub fn write_area_summaries(
    path: &Path,
    summaries: &[AreaSummary],
    overwrite: bool,
) -> Result<(), TxcError> {
    write_rows(path, &AreaSummary::CSV_HEADER, summaries, overwrite)?;
    log::info!(
        "wrote {} area summaries to {}",
        summaries.len(),
        path.to_string_lossy()
    );
    Ok(())
}

/// writes the failure log, one row per unreadable input or failed document
pub fn write_failures(path: &Path, failures: &[FailureRow], overwrite: bool) -> Result<(), TxcError> {
    write_rows(path, &FailureRow::CSV_HEADER, failures, overwrite)?;
    log::info!(
        "wrote {} failures to {}",
        failures.len(),
        path.to_string_lossy()
    );
    Ok(())
}

pub fn write_summary_json(
    path: &Path,
    summary: &BatchSummary,
    overwrite: bool,
) -> Result<(), TxcError> {
    let filename = path.to_string_lossy().to_string();
    check_overwrite(path, overwrite)?;
    if let Some(parent) = path.parent() {
        create_dirs(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| TxcError::FileWriteError(filename.clone(), e.to_string()))?;
    std::fs::write(path, json).map_err(|e| TxcError::FileWriteError(filename, e.to_string()))
}

/// fails when an output exists and may not be replaced. called for every
/// output before a run starts so that no work is wasted.
pub fn check_overwrite(path: &Path, overwrite: bool) -> Result<(), TxcError> {
    if path.exists() && !overwrite {
        Err(TxcError::InvalidUserInput(format!(
            "output file {} already exists, use --overwrite to replace it",
            path.to_string_lossy()
        )))
    } else {
        Ok(())
    }
}

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), TxcError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if dirspath.as_os_str().is_empty() || dirspath.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dirspath).map_err(|e| {
        TxcError::InvalidUserInput(format!(
            "error building output directory '{}': {e}",
            dirspath.to_string_lossy()
        ))
    })
}

/// writes the header first so that a table without rows is still well formed
fn write_rows<T: serde::Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
    overwrite: bool,
) -> Result<(), TxcError> {
    let filename = path.to_string_lossy().to_string();
    let mut writer = create_writer(path, overwrite)?;
    writer
        .write_record(header)
        .map_err(|e| TxcError::CsvWriteError(filename.clone(), e))?;
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| TxcError::CsvWriteError(filename.clone(), e))?;
    }
    finish_writer(writer, &filename)
}

/// helper function to build a csv writer for either a .csv or .csv.gz file
/// while respecting the user's overwrite preference.
fn create_writer(path: &Path, overwrite: bool) -> Result<csv::Writer<Box<dyn Write>>, TxcError> {
    check_overwrite(path, overwrite)?;
    if let Some(parent) = path.parent() {
        create_dirs(parent)?;
    }
    let file = File::create(path).map_err(|e| {
        TxcError::FileWriteError(path.to_string_lossy().to_string(), e.to_string())
    })?;
    let gzipped = path.extension().is_some_and(|e| e == "gz");
    let buffer: Box<dyn Write> = if gzipped {
        Box::new(GzEncoder::new(BufWriter::new(file), Compression::default()))
    } else {
        Box::new(BufWriter::new(file))
    };
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(buffer))
}

/// flushes the csv writer and closes the underlying stream, which completes the
/// gzip trailer for compressed outputs
fn finish_writer(writer: csv::Writer<Box<dyn Write>>, filename: &str) -> Result<(), TxcError> {
    let mut inner = writer
        .into_inner()
        .map_err(|e| TxcError::FileWriteError(filename.to_string(), e.to_string()))?;
    inner
        .flush()
        .map_err(|e| TxcError::FileWriteError(filename.to_string(), e.to_string()))?;
    drop(inner);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{
        check_overwrite, write_area_summaries, write_failures, write_records, write_summary_json,
    };
    use crate::batch::{process_archives, AreaSummary, BatchSummary, FailureRow};
    use crate::config::TxcMetricsConfig;
    use crate::test_fixtures::{test_directory, test_stop_index, txc_xml, write_file, zip_bytes};
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn run_and_write(name: &str, output: &str, parallelism: usize) -> Vec<u8> {
        let dir = test_directory(name);
        let xml = txc_xml(
            "X5",
            &[("JPS1", &["S1", "S2", "S3"]), ("JPS2", &["S3", "MAN"])],
            &[("JP1", &["JPS1"]), ("JP2", &["JPS1", "JPS2"])],
            &[("JP1", "07:00"), ("JP2", "17:45:00"), ("JP2", "23:10:00")],
        );
        let mut paths = vec![];
        for idx in 0..4 {
            let path = dir.join(format!("region-{idx}.zip"));
            write_file(&path, &zip_bytes(&[("service.xml", xml.as_bytes())]));
            paths.push(path);
        }
        let config = TxcMetricsConfig {
            extended_metrics: true,
            write_geometry: true,
            parallelism,
            ..Default::default()
        };
        let result = process_archives(&paths, &test_stop_index(), &config).expect("batch");
        let out = dir.join(output);
        write_records(&out, result.records(), true, true, false).expect("write");
        std::fs::read(&out).expect("read back")
    }

    #[test]
    fn test_identical_runs_write_identical_bytes() {
        let first = run_and_write("writer-run-1", "routes.csv", 1);
        let second = run_and_write("writer-run-2", "routes.csv", 1);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        let parallel = run_and_write("writer-run-3", "routes.csv", 3);
        assert_eq!(first, parallel);
    }

    #[test]
    fn test_gzip_output_decompresses_to_plain_output() {
        let plain = run_and_write("writer-plain", "routes.csv", 1);
        let gzipped = run_and_write("writer-gz", "routes.csv.gz", 1);
        let mut decoded = vec![];
        GzDecoder::new(gzipped.as_slice())
            .read_to_end(&mut decoded)
            .expect("valid gzip");
        assert_eq!(plain, decoded);
        let text = String::from_utf8(decoded).expect("utf8");
        let header = text.lines().next().expect("header");
        assert!(header.starts_with("source_file,pattern_id,line_name,route_length_km"));
        assert!(header.ends_with("trips_night,route_wkt"));
        // one header plus two patterns in each of four archives
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_existing_output_requires_overwrite() {
        let dir = test_directory("writer-overwrite");
        let path = dir.join("failures.csv");
        write_file(&path, b"old");
        assert!(check_overwrite(&path, false).is_err());
        assert!(write_failures(&path, &[], false).is_err());
        let rows = vec![FailureRow {
            source_file: String::from("b.zip"),
            document: None,
            reason: String::from("truncated"),
        }];
        write_failures(&path, &rows, true).expect("overwrite allowed");
        let text = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(text, "source_file,document,reason\nb.zip,,truncated\n");
    }

    #[test]
    fn test_clean_run_tables_keep_their_header() {
        let dir = test_directory("writer-empty-tables");
        let failures = dir.join("failures.csv");
        write_failures(&failures, &[], false).expect("write failures");
        let text = std::fs::read_to_string(&failures).expect("read back");
        assert_eq!(text, "source_file,document,reason\n");

        let areas = dir.join("areas.csv.gz");
        write_area_summaries(&areas, &[], false).expect("write areas");
        let mut decoded = String::new();
        GzDecoder::new(std::fs::File::open(&areas).expect("open"))
            .read_to_string(&mut decoded)
            .expect("valid gzip");
        assert_eq!(decoded, format!("{}\n", AreaSummary::CSV_HEADER.join(",")));
    }

    #[test]
    fn test_summary_json_creates_parent_directories() {
        let dir = test_directory("writer-summary");
        let path = dir.join("reports").join("summary.json");
        let summary = BatchSummary {
            archives_attempted: 2,
            records: 5,
            ..Default::default()
        };
        write_summary_json(&path, &summary, false).expect("write summary");
        let text = std::fs::read_to_string(&path).expect("read back");
        let decoded: BatchSummary = serde_json::from_str(&text).expect("json");
        assert_eq!(decoded, summary);
    }
}

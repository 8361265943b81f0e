//! shared builders for TransXChange documents, archives and stop tables used by unit tests.
use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use zip::{write::SimpleFileOptions, ZipWriter};

use crate::{
    config::DuplicateStopPolicy,
    stops::{StopCoordinate, StopIndex},
};

/// an empty directory unique to this test process and test name
pub fn test_directory(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("txc-metrics-{}-{name}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("stale test dir should be removable");
    }
    std::fs::create_dir_all(&dir).expect("test dir should be creatable");
    dir
}

/// builds an in-memory ZIP archive from (entry name, contents) pairs
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("zip entry should start");
        writer.write_all(contents).expect("zip entry should write");
    }
    writer.finish().expect("zip should finish").into_inner()
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).expect("test file should be writable");
}

/// a TransXChange document where each section is a chain of timing links over
/// the listed stops, e.g. `[A, B, C]` produces links A->B and B->C.
pub fn txc_xml(
    line_name: &str,
    sections: &[(&str, &[&str])],
    patterns: &[(&str, &[&str])],
    journeys: &[(&str, &str)],
) -> String {
    let sections_xml = sections
        .iter()
        .map(|(section_id, stops)| {
            let links = stops
                .iter()
                .tuple_windows()
                .enumerate()
                .map(|(idx, (from, to))| {
                    format!(
                        "<JourneyPatternTimingLink id=\"{section_id}-L{idx}\">\
                         <From SequenceNumber=\"{idx}\"><StopPointRef>{from}</StopPointRef></From>\
                         <To><StopPointRef>{to}</StopPointRef></To>\
                         <RunTime>PT2M</RunTime></JourneyPatternTimingLink>"
                    )
                })
                .join("");
            format!("<JourneyPatternSection id=\"{section_id}\">{links}</JourneyPatternSection>")
        })
        .join("");
    let patterns_xml = patterns
        .iter()
        .map(|(pattern_id, refs)| {
            let refs_xml = refs
                .iter()
                .map(|r| format!("<JourneyPatternSectionRefs>{r}</JourneyPatternSectionRefs>"))
                .join("");
            format!("<JourneyPattern id=\"{pattern_id}\"><Direction>outbound</Direction>{refs_xml}</JourneyPattern>")
        })
        .join("");
    let journeys_xml = journeys
        .iter()
        .enumerate()
        .map(|(idx, (pattern_id, departure))| {
            format!(
                "<VehicleJourney><VehicleJourneyCode>VJ{idx}</VehicleJourneyCode>\
                 <JourneyPatternRef>{pattern_id}</JourneyPatternRef>\
                 <DepartureTime>{departure}</DepartureTime></VehicleJourney>"
            )
        })
        .join("");
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <TransXChange xmlns=\"http://www.transxchange.org.uk/\" SchemaVersion=\"2.4\">\
         <JourneyPatternSections>{sections_xml}</JourneyPatternSections>\
         <Services><Service><ServiceCode>SVC1</ServiceCode>\
         <Lines><Line id=\"L1\"><LineName>{line_name}</LineName></Line></Lines>\
         <StandardService>{patterns_xml}</StandardService></Service></Services>\
         <VehicleJourneys>{journeys_xml}</VehicleJourneys>\
         </TransXChange>"
    )
}

/// stops S1..S3 along a north-south line in London, plus a stop in Manchester
pub fn test_stop_index() -> StopIndex {
    let stops = vec![
        StopCoordinate::new(
            String::from("S1"),
            51.50,
            -0.12,
            Some(String::from("L")),
            Some(String::from("1")),
        ),
        StopCoordinate::new(
            String::from("S2"),
            51.51,
            -0.12,
            Some(String::from("L")),
            Some(String::from("1")),
        ),
        StopCoordinate::new(
            String::from("S3"),
            51.52,
            -0.12,
            Some(String::from("L")),
            Some(String::from("2")),
        ),
        StopCoordinate::new(
            String::from("MAN"),
            53.4808,
            -2.2426,
            Some(String::from("NW")),
            None,
        ),
    ];
    StopIndex::from_coordinates(stops, DuplicateStopPolicy::LastWins)
}

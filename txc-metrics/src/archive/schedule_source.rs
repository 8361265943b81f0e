use std::{
    fs::File,
    io::{Cursor, Read, Seek},
    path::{Path, PathBuf},
};

use zip::ZipArchive;

use super::RawDocument;
use crate::TxcError;

/// levels of archives expanded below the input archive; deeper ones are skipped
const MAX_NESTED_ARCHIVE_DEPTH: usize = 3;

/// ZIP local file header, empty archive and spanned archive signatures
const ZIP_SIGNATURES: [[u8; 4]; 3] = [
    [b'P', b'K', 0x03, 0x04],
    [b'P', b'K', 0x05, 0x06],
    [b'P', b'K', 0x07, 0x08],
];

/// a schedule input on disk, classified once by its file signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    /// a ZIP archive containing one or more schedule documents
    Archive { path: PathBuf },
    /// a single schedule document
    PlainDocument { path: PathBuf },
}

impl ScheduleSource {
    pub fn try_from_path(path: &Path) -> Result<ScheduleSource, TxcError> {
        let mut file = File::open(path).map_err(|e| TxcError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut signature = Vec::with_capacity(4);
        file.by_ref()
            .take(4)
            .read_to_end(&mut signature)
            .map_err(|e| TxcError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
        let is_zip = ZIP_SIGNATURES.iter().any(|s| signature.as_slice() == s);
        let path = path.to_path_buf();
        if is_zip {
            Ok(ScheduleSource::Archive { path })
        } else {
            Ok(ScheduleSource::PlainDocument { path })
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ScheduleSource::Archive { path } => path,
            ScheduleSource::PlainDocument { path } => path,
        }
    }

    /// file name of this source, used to label documents and log lines
    pub fn basename(&self) -> String {
        self.path()
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path().to_string_lossy().to_string())
    }

    /// passes every schedule document in this source to the visitor, in
    /// archive entry order, returning the number of documents visited.
    ///
    /// an entry that cannot be decompressed is still visited, carrying the
    /// read error in place of its contents. an error is returned only when the
    /// source as a whole cannot be read.
    pub fn visit_documents<F>(&self, visitor: &mut F) -> Result<usize, TxcError>
    where
        F: FnMut(RawDocument),
    {
        match self {
            ScheduleSource::PlainDocument { path } => {
                let bytes = std::fs::read(path).map_err(|e| TxcError::FileReadError {
                    path: path.clone(),
                    source: e,
                })?;
                let contents = String::from_utf8_lossy(&bytes).into_owned();
                visitor(RawDocument::new(self.basename(), Ok(contents)));
                Ok(1)
            }
            ScheduleSource::Archive { path } => {
                let file = File::open(path).map_err(|e| TxcError::FileReadError {
                    path: path.clone(),
                    source: e,
                })?;
                visit_archive(file, None, 0, visitor).map_err(|e| TxcError::ArchiveReadError {
                    path: path.clone(),
                    source: e,
                })
            }
        }
    }
}

fn visit_archive<R, F>(
    reader: R,
    prefix: Option<&str>,
    depth: usize,
    visitor: &mut F,
) -> Result<usize, zip::result::ZipError>
where
    R: Read + Seek,
    F: FnMut(RawDocument),
{
    let mut archive = ZipArchive::new(reader)?;
    let mut visited = 0;
    for entry_idx in 0..archive.len() {
        let mut entry = match archive.by_index(entry_idx) {
            Ok(entry) => entry,
            Err(e) => {
                let name = qualified_name(prefix, &format!("entry #{entry_idx}"));
                let error = TxcError::ArchiveEntryError(name.clone(), e.to_string());
                visitor(RawDocument::new(name, Err(error)));
                visited += 1;
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = qualified_name(prefix, entry.name());
        let lowercase = entry.name().to_lowercase();
        if lowercase.ends_with(".xml") {
            let mut bytes = Vec::new();
            let contents = entry
                .read_to_end(&mut bytes)
                .map(|_| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|e| TxcError::ArchiveEntryError(name.clone(), e.to_string()));
            visitor(RawDocument::new(name, contents));
            visited += 1;
        } else if lowercase.ends_with(".zip") {
            if depth >= MAX_NESTED_ARCHIVE_DEPTH {
                log::warn!("skipping archive '{name}' nested more than {MAX_NESTED_ARCHIVE_DEPTH} levels deep");
                continue;
            }
            let mut bytes = Vec::new();
            let nested = entry
                .read_to_end(&mut bytes)
                .map_err(zip::result::ZipError::Io)
                .and_then(|_| visit_archive(Cursor::new(bytes), Some(&name), depth + 1, visitor));
            match nested {
                Ok(count) => visited += count,
                Err(e) => {
                    let error = TxcError::ArchiveEntryError(name.clone(), e.to_string());
                    visitor(RawDocument::new(name, Err(error)));
                    visited += 1;
                }
            }
        }
    }
    Ok(visited)
}

fn qualified_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{p}/{name}"),
        None => name.to_string(),
    }
}

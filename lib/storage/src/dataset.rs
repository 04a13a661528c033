//! CSV dataset loading
//!
//! Reads the raw games table, drops bundles and downloadable content, and
//! normalizes each remaining row into a [`CatalogRecord`].

use gamerec_core::{CatalogRecord, Error, RawFields, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "types",
    "game_details",
    "publisher",
    "developer",
    "genre",
    "popular_tags",
];

const BUNDLE_MARKER: &str = "bundle";
const DLC_MARKER: &str = "Downloadable Content";

struct Columns {
    name: usize,
    types: usize,
    game_details: usize,
    publisher: usize,
    developer: usize,
    genre: usize,
    popular_tags: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| Error::MissingColumn(column.to_string()))
        };
        Ok(Self {
            name: find("name")?,
            types: find("types")?,
            game_details: find("game_details")?,
            publisher: find("publisher")?,
            developer: find("developer")?,
            genre: find("genre")?,
            popular_tags: find("popular_tags")?,
        })
    }
}

/// Whether a row is a bundle or downloadable content
pub fn is_excluded(types: &str, game_details: &str) -> bool {
    types.to_ascii_lowercase().contains(BUNDLE_MARKER) || game_details.contains(DLC_MARKER)
}

/// Load and normalize the catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::DatasetLoad(format!("{}: {}", path.display(), e)))?;
    let catalog = read_catalog(BufReader::new(file))?;
    info!("Loaded {} games from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Read the catalog from any CSV source
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<CatalogRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| Error::DatasetLoad(e.to_string()))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut catalog = Vec::new();
    let mut skipped = 0usize;
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| Error::DatasetLoad(format!("row {}: {}", line + 1, e)))?;
        // Missing trailing cells read as empty
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();

        if is_excluded(&cell(columns.types), &cell(columns.game_details)) {
            skipped += 1;
            continue;
        }

        catalog.push(CatalogRecord::from_raw(&RawFields {
            name: cell(columns.name),
            genre: cell(columns.genre),
            game_details: cell(columns.game_details),
            popular_tags: cell(columns.popular_tags),
            developer: cell(columns.developer),
            publisher: cell(columns.publisher),
        }));
    }

    debug!("Skipped {} bundle/DLC rows", skipped);
    Ok(catalog)
}

/// SHA-256 of the dataset contents, hex encoded
pub fn fingerprint<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
url,types,name,developer,publisher,popular_tags,game_details,genre
u1,app,DOOM,id Software,Bethesda,\"FPS,Action\",\"Single-player,Multi-player\",Action
u2,bundle,DOOM Pack,id Software,Bethesda,FPS,Single-player,Action
u3,Bundle Pack,Mega Bundle,Various,Various,Indie,Single-player,Indie
u4,app,DOOM - Soundtrack,id Software,Bethesda,FPS,\"Downloadable Content,Single-player\",Action
u5,app,Caf\u{e9} Story,,,,,
";

    #[test]
    fn test_read_catalog_filters_bundles_and_dlc() {
        let catalog = read_catalog(CSV.as_bytes()).unwrap();
        let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["DOOM", "Caf Story"]);
        assert_eq!(catalog[0].tags, vec!["fps", "action"]);
        assert_eq!(catalog[1].searchable_name, "cafstory");
        assert_eq!(catalog[1].genres, vec![""]);
    }

    #[test]
    fn test_missing_column() {
        let err = read_catalog("name,types\nDOOM,app\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "game_details"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog("/nonexistent/games.csv").unwrap_err();
        assert!(matches!(err, Error::DatasetLoad(_)));
    }

    #[test]
    fn test_is_excluded() {
        assert!(is_excluded("bundle", ""));
        assert!(is_excluded("Bundle Pack", ""));
        assert!(is_excluded("app", "Downloadable Content"));
        assert!(!is_excluded("app", "downloadable content"));
        assert!(!is_excluded("sub", "Single-player"));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        std::fs::write(&path, CSV).unwrap();
        let first = fingerprint(&path).unwrap();
        assert_eq!(first.len(), 64);
        assert_eq!(first, fingerprint(&path).unwrap());

        std::fs::write(&path, format!("{CSV}u6,app,Extra,,,,,\n")).unwrap();
        assert_ne!(first, fingerprint(&path).unwrap());
    }
}

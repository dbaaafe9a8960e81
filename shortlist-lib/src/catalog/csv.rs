use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::catalog::{Catalog, RawRecord};
use crate::{Error, Result};

/// Column indices resolved from a CSV header row.
struct Columns {
    name: usize,
    url: usize,
    description: Option<usize>,
    test_type: Option<usize>,
    duration: Option<usize>,
    remote_support: Option<usize>,
    adaptive_support: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
        };
        let require = |column: &str| {
            find(column).ok_or_else(|| {
                Error::CatalogLoad(format!("catalog source is missing required column '{column}'"))
            })
        };

        Ok(Self {
            name: require("name")?,
            url: require("url")?,
            description: find("description"),
            test_type: find("test_type"),
            duration: find("duration"),
            remote_support: find("remote_support"),
            adaptive_support: find("adaptive_support"),
        })
    }

    fn record(&self, row: &StringRecord) -> RawRecord {
        let cell = |i: Option<usize>| i.and_then(|i| row.get(i)).map(str::to_string);

        RawRecord {
            name: cell(Some(self.name)),
            url: cell(Some(self.url)),
            description: cell(self.description),
            test_type: cell(self.test_type),
            duration: cell(self.duration),
            remote_support: cell(self.remote_support),
            adaptive_support: cell(self.adaptive_support),
        }
    }
}

impl Catalog {
    /// Load a catalog from a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::CatalogLoad(format!("failed to open '{}': {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), "reading catalog csv");
        Self::from_csv_reader(file)
    }

    /// Load a catalog from any CSV stream with a header row.
    ///
    /// Header names are matched case-insensitively; `name` and `url` are
    /// required, other known columns are optional and unknown ones ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::CatalogLoad(format!("failed to read csv headers: {e}")))?
            .clone();
        let columns = Columns::resolve(&headers)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                Error::CatalogLoad(format!("failed to read csv record {}: {e}", i + 1))
            })?;
            records.push(columns.record(&row));
        }

        Self::load(records)
    }
}

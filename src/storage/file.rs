use super::{Error, Result, Storage};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};
use url::Url;

/// On-disk layout: `origin -> key -> value`.
type Document = BTreeMap<String, BTreeMap<String, String>>;

/// JSON-file store partitioned by origin.
///
/// Every call re-reads the document, so writes made by another process are
/// visible on the next read. Writes go through a sibling temp file followed by
/// a rename.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    origin: String,
}

impl FileStorage {
    /// Opens the store at `path` for the given origin. The file is created on
    /// the first write.
    ///
    /// # Errors
    /// Returns an error if `origin` is not a URL with a scheme and host.
    pub fn open(path: impl Into<PathBuf>, origin: &str) -> Result<Self> {
        let origin = normalize_origin(origin)?;
        Ok(Self {
            path: path.into(),
            origin,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn load(&self) -> Result<Document> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Document::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Document::new()),
            Err(source) => Err(Error::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let write_err = |source| Error::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(document)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!("store saved: {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    #[instrument(skip(self), fields(origin = %self.origin))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut document = self.load()?;
        Ok(document
            .remove(&self.origin)
            .and_then(|mut entries| entries.remove(key)))
    }

    #[instrument(skip(self, value), fields(origin = %self.origin))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut document = self.load()?;
        document
            .entry(self.origin.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save(&document)
    }

    #[instrument(skip(self), fields(origin = %self.origin))]
    fn remove(&self, key: &str) -> Result<()> {
        let mut document = self.load()?;
        let Some(entries) = document.get_mut(&self.origin) else {
            return Ok(());
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            document.remove(&self.origin);
        }
        self.save(&document)
    }
}

/// Reduce a URL to its `scheme://host[:port]` origin.
///
/// # Errors
/// Returns an error if the value does not parse as a URL or has an opaque
/// origin (for example `data:` or `file:` URLs).
pub fn normalize_origin(origin: &str) -> Result<String> {
    let url = Url::parse(origin.trim())
        .map_err(|err| Error::InvalidOrigin(format!("{origin}: {err}")))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(Error::InvalidOrigin(format!("{url}: opaque origin")));
    }
    Ok(origin.ascii_serialization())
}

//! Signature files: discovery by extension, YAML decoding, and the
//! read-only table handed to the dispatcher.

use crate::error::{ReconError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions that mark a path as a signature file.
pub const SIGNATURE_EXTENSIONS: [&str; 2] = [".yml", ".yaml"];

/// What a check does with its templates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckType {
    /// Open every `url` template directly. Also selected by an empty or missing type.
    #[default]
    Browser,
    /// Run every `search` template as a Google query
    Google,
    /// Run every `search` template as a Shodan query
    Shodan,
    Unknown(String),
}

impl From<Option<String>> for CheckType {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None | Some("") | Some("browser") | Some("browse") => CheckType::Browser,
            Some("google") => CheckType::Google,
            Some("shodan") => CheckType::Shodan,
            Some(other) => CheckType::Unknown(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for CheckType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(CheckType::from)
    }
}

/// One unit of action inside a signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Check {
    #[serde(rename = "type", default)]
    pub kind: CheckType,
    #[serde(rename = "url", default, deserialize_with = "null_as_default")]
    pub urls: Vec<String>,
    #[serde(rename = "search", default, deserialize_with = "null_as_default")]
    pub searches: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// The parsed content of one signature file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Signature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks: Vec<Check>,
}

impl Signature {
    /// Decode the first document of a signature file; later documents are ignored.
    /// An empty file yields an empty signature.
    pub fn from_yaml(bytes: &[u8]) -> std::result::Result<Self, serde_yaml::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Signature::default());
        }
        let Some(document) = serde_yaml::Deserializer::from_slice(bytes).next() else {
            return Ok(Signature::default());
        };
        let parsed = Option::<Signature>::deserialize(document)?;
        Ok(parsed.unwrap_or_default())
    }
}

// `key:` with no value decodes as null; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep the candidates whose path mentions a signature extension.
///
/// This is substring containment, not a suffix test: `rules.yaml.d/README`
/// or `/srv/yaml/notes.txt` qualify too. Such files then go through the
/// decoder like any other signature file.
pub fn find_sig_files(candidates: &[PathBuf]) -> Vec<PathBuf> {
    candidates
        .iter()
        .filter(|path| {
            let path = path.to_string_lossy();
            SIGNATURE_EXTENSIONS.iter().any(|ext| path.contains(ext))
        })
        .cloned()
        .collect()
}

/// Read and decode one signature file.
///
/// A read failure is logged and degrades to an empty signature. A decode
/// failure is returned to the caller, which treats it as fatal.
pub fn parse_sig_file(path: &Path) -> Result<Signature> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read signature file {}: {}", path.display(), e);
            Vec::new()
        }
    };

    Signature::from_yaml(&bytes).map_err(|source| ReconError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Signature id derived from a file name: the base name without its extension.
pub fn id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every loaded signature, keyed by source path.
///
/// Built once before dispatch and only read afterwards. Keys iterate in
/// path order.
#[derive(Debug, Default, Clone)]
pub struct SignatureTable {
    signatures: BTreeMap<PathBuf, Signature>,
}

impl SignatureTable {
    /// Parse every file sequentially. The first decode failure aborts the load.
    pub fn load(sig_files: &[PathBuf]) -> Result<Self> {
        let mut table = SignatureTable::default();
        for path in sig_files {
            debug!("Parsing signature file: {}", path.display());
            let signature = parse_sig_file(path)?;
            table.insert(path.clone(), signature);
        }
        info!("Number of signature files: {}", table.len());
        Ok(table)
    }

    /// Insert a signature, filling in an empty id from the file name.
    pub fn insert(&mut self, path: PathBuf, mut signature: Signature) {
        if signature.id.is_empty() {
            signature.id = id_from_path(&path);
        }
        self.signatures.insert(path, signature);
    }

    pub fn get(&self, path: &Path) -> Option<&Signature> {
        self.signatures.get(path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PathBuf> {
        self.signatures.keys()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn check_count(&self) -> usize {
        self.signatures.values().map(|s| s.checks.len()).sum()
    }
}

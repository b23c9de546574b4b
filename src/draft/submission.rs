//! Submission form state and link payload assembly.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::models::{ArtifactDigest, Link};

/// One file row in the submission form: a filename and its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub sha256: String,
}

/// The submission form: a name plus ordered material (pre-commit) and
/// product (post-commit) file entries.
///
/// Entries are kept as an ordered list until assembly; the wire format is a
/// filename-keyed map, so a filename listed twice resolves last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub name: String,
    materials: Vec<FileEntry>,
    products: Vec<FileEntry>,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a draft from an existing link, for edit-and-resubmit.
    pub fn from_link(link: &Link) -> Self {
        let to_entries = |map: &BTreeMap<String, ArtifactDigest>| {
            map.iter()
                .map(|(filename, digest)| FileEntry {
                    filename: filename.clone(),
                    sha256: digest.sha256.clone(),
                })
                .collect()
        };
        Self {
            name: link.name.clone(),
            materials: to_entries(&link.materials),
            products: to_entries(&link.products),
        }
    }

    pub fn add_material(&mut self, filename: &str, sha256: &str) {
        self.materials.push(FileEntry {
            filename: filename.to_string(),
            sha256: sha256.to_string(),
        });
    }

    pub fn add_product(&mut self, filename: &str, sha256: &str) {
        self.products.push(FileEntry {
            filename: filename.to_string(),
            sha256: sha256.to_string(),
        });
    }

    /// Hash `path` and record it as a material, keyed by its file name.
    pub fn add_material_from_path(&mut self, path: &Path) -> Result<()> {
        let (filename, sha256) = hash_file(path)?;
        self.add_material(&filename, &sha256);
        Ok(())
    }

    /// Hash `path` and record it as a product, keyed by its file name.
    pub fn add_product_from_path(&mut self, path: &Path) -> Result<()> {
        let (filename, sha256) = hash_file(path)?;
        self.add_product(&filename, &sha256);
        Ok(())
    }

    pub fn materials(&self) -> &[FileEntry] {
        &self.materials
    }

    pub fn products(&self) -> &[FileEntry] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.products.is_empty()
    }

    /// Assemble the link payload for one project/issue pair.
    ///
    /// Duplicate filenames collapse to the entry added last. The command
    /// triple records what was submitted against what.
    pub fn into_link(self, project_id: &str, issue_id: &str) -> Link {
        Link {
            payload_type: "link".to_string(),
            name: if self.name.trim().is_empty() {
                "submit".to_string()
            } else {
                self.name.trim().to_string()
            },
            command: vec![
                "submit".to_string(),
                format!("project:{}", project_id),
                format!("issue:{}", issue_id),
            ],
            materials: collect_digests(self.materials),
            products: collect_digests(self.products),
        }
    }
}

fn collect_digests(entries: Vec<FileEntry>) -> BTreeMap<String, ArtifactDigest> {
    let mut map = BTreeMap::new();
    for entry in entries {
        map.insert(entry.filename, ArtifactDigest { sha256: entry.sha256 });
    }
    map
}

/// Compute the hex SHA-256 of a file, returning `(file_name, digest)`.
pub fn hash_file(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
    let digest = Sha256::digest(&bytes);
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((filename, hex))
}

/// Parse a `filename=sha256` pair as given on the command line.
pub fn parse_file_entry(raw: &str) -> Result<FileEntry> {
    let (filename, sha256) = raw
        .split_once('=')
        .with_context(|| format!("Expected <filename>=<sha256>, got '{}'", raw))?;
    let filename = filename.trim();
    let sha256 = sha256.trim();
    anyhow::ensure!(!filename.is_empty(), "Empty filename in '{}'", raw);
    anyhow::ensure!(!sha256.is_empty(), "Empty digest in '{}'", raw);
    Ok(FileEntry {
        filename: filename.to_string(),
        sha256: sha256.to_string(),
    })
}

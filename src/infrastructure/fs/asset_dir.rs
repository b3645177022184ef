//! Local asset directory
//!
//! Lists the working directory once and answers pattern lookups from that
//! snapshot. Patterns are turned into gitignore-style globs so the `ignore`
//! crate does the matching.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::GitignoreBuilder;

use crate::domain::ports::AssetDirectory;
use crate::domain::services::naming::{contains_placeholder, PLACEHOLDER_MIN};
use crate::error::{StevedoreError, StevedoreResult};

/// Detached signature and checksum files that sit next to assets
pub const SIGNATURE_SUFFIXES: &[&str] = &[".asc", ".cms", ".p7s", ".crl", ".sha256"];

/// Snapshot of the regular files in the asset directory
#[derive(Debug, Clone)]
pub struct LocalAssetDirectory {
    root: PathBuf,
    names: Vec<String>,
}

impl LocalAssetDirectory {
    /// List `root` once.
    pub fn open(root: &Path) -> StevedoreResult<Self> {
        if !root.is_dir() {
            return Err(StevedoreError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!("skipping non UTF-8 file name {raw:?}"),
            }
        }

        Ok(Self::from_names(root, names))
    }

    /// Build a snapshot from known file names.
    pub fn from_names<I, S>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !is_signature_file(name))
            .collect();
        names.sort();
        names.dedup();

        Self {
            root: root.to_path_buf(),
            names,
        }
    }

    pub fn file_count(&self) -> usize {
        self.names.len()
    }

    fn matching_names(&self, pattern: &str) -> Vec<&str> {
        if !contains_placeholder(pattern) {
            return self
                .names
                .iter()
                .filter(|name| name.as_str() == pattern)
                .map(String::as_str)
                .collect();
        }

        let glob = pattern_to_glob(pattern);
        let mut builder = GitignoreBuilder::new(&self.root);
        let matcher = match builder.add_line(None, &glob).and_then(|b| b.build()) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!("invalid asset pattern '{pattern}': {e}");
                return Vec::new();
            }
        };

        self.names
            .iter()
            .filter(|name| matcher.matched(self.root.join(name), false).is_ignore())
            .map(String::as_str)
            .collect()
    }
}

impl AssetDirectory for LocalAssetDirectory {
    fn root(&self) -> &Path {
        &self.root
    }

    fn find(&self, pattern: &str) -> Vec<PathBuf> {
        self.matching_names(pattern)
            .into_iter()
            .map(|name| self.root.join(name))
            .collect()
    }
}

fn is_signature_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SIGNATURE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

fn push_escaped(out: &mut String, c: char) {
    let special = matches!(c, '*' | '?' | '[' | ']' | '\\')
        || (out.is_empty() && matches!(c, '!' | '#'));
    if special {
        out.push('\\');
    }
    out.push(c);
}

/// Turn a manifest pattern into a glob: placeholder runs become `*`, every
/// other gitignore metacharacter matches literally.
fn pattern_to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        let run = chars[i..].iter().take_while(|c| **c == 'x').count();
        if run >= PLACEHOLDER_MIN {
            out.push('*');
            i += run;
        } else {
            push_escaped(&mut out, chars[i]);
            i += 1;
        }
    }
    out
}

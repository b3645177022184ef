//! Filename → asset identity naming rules
//!
//! Asset files follow the convention `<name>[_-]<version>[_-]<arch>.<ext>`,
//! for example `mas-api_1.2.0_x86_64.tar` or `redis-7.0.12.tar.gz`.
//! Manifests may write the version as a placeholder run (`xxx`), which
//! matches any version on disk. Only lowercase `x` counts; `XXX` is literal
//! text.

use crate::domain::value_objects::AssetId;

/// Archive extensions an asset file may carry (longest first)
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".tar.gz", ".tgz", ".tar", ".zip"];

/// Architecture suffixes stripped from the stem
pub const ARCH_SUFFIXES: &[&str] = &["x86_64", "amd64", "aarch64", "arm64", "noarch"];

/// Build suffix prefixes (`b123`, `build123`) stripped from the stem
pub const BUILD_PREFIXES: &[&str] = &["build", "b"];

/// Minimum run of `x` treated as a placeholder
pub const PLACEHOLDER_MIN: usize = 3;

const SEPARATORS: &[char] = &['_', '-'];

/// Why a manifest line could not be turned into an asset identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("empty filename")]
    Empty,

    #[error("filename contains whitespace or a path separator")]
    InvalidCharacters,

    #[error("unrecognized archive extension (expected one of .tar.gz, .tgz, .tar, .zip)")]
    UnknownExtension,

    #[error("no asset name left after stripping version and suffixes")]
    EmptyName,
}

/// Derive the canonical `(name, tag)` identity from an asset filename.
pub fn identity_from_filename(filename: &str) -> Result<AssetId, NamingError> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(NamingError::Empty);
    }
    if filename
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        return Err(NamingError::InvalidCharacters);
    }

    let stem = strip_archive_extension(filename).ok_or(NamingError::UnknownExtension)?;
    let stem = strip_suffixes(stem);

    let (name, tag) = match split_version(stem) {
        Some((name, version)) if contains_placeholder(version) => (name, AssetId::DEFAULT_TAG),
        Some((name, version)) => (name, version),
        None => (stem, AssetId::DEFAULT_TAG),
    };

    let name = name.trim_matches(SEPARATORS);
    if name.is_empty() {
        return Err(NamingError::EmptyName);
    }

    Ok(AssetId::new(name.to_lowercase(), tag))
}

/// Strip one known archive extension (case-insensitive)
pub fn strip_archive_extension(filename: &str) -> Option<&str> {
    let lower = filename.to_ascii_lowercase();
    ARCHIVE_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext) && lower.len() > ext.len())
        .map(|ext| &filename[..filename.len() - ext.len()])
}

/// Whether the text contains a placeholder run of lowercase `x`
pub fn contains_placeholder(text: &str) -> bool {
    let mut run = 0;
    for c in text.chars() {
        if c == 'x' {
            run += 1;
            if run >= PLACEHOLDER_MIN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Repeatedly strip trailing architecture and build suffixes.
fn strip_suffixes(mut stem: &str) -> &str {
    loop {
        let before = stem;
        for arch in ARCH_SUFFIXES {
            if let Some(rest) = strip_separated_suffix(stem, |s| s.eq_ignore_ascii_case(arch)) {
                stem = rest;
            }
        }
        if let Some(rest) = strip_separated_suffix(stem, is_build_token) {
            stem = rest;
        }
        if stem == before {
            return stem;
        }
    }
}

/// Strip `<sep><token>` from the end of `stem` when `matches(token)`.
///
/// The token may itself contain `_` (as in `x86_64`), so every separator
/// position is tried from the right.
fn strip_separated_suffix(stem: &str, matches: impl Fn(&str) -> bool) -> Option<&str> {
    stem.char_indices()
        .rev()
        .filter(|(_, c)| SEPARATORS.contains(c))
        .find(|(i, _)| *i > 0 && matches(&stem[i + 1..]))
        .map(|(i, _)| &stem[..i])
}

fn is_build_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    BUILD_PREFIXES.iter().any(|prefix| {
        lower
            .strip_prefix(prefix)
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Split `stem` at the first separator followed by a version-like token.
fn split_version(stem: &str) -> Option<(&str, &str)> {
    stem.char_indices()
        .filter(|(_, c)| SEPARATORS.contains(c))
        .find(|(i, _)| *i > 0 && is_version_start(&stem[i + 1..]))
        .map(|(i, _)| (&stem[..i], &stem[i + 1..]))
}

fn is_version_start(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('v') | Some('V') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some('x') => rest.chars().take_while(|c| *c == 'x').count() >= PLACEHOLDER_MIN,
        _ => false,
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One resource ever seen by the pipeline.
///
/// `origin` is the remote URL the bytes were last sourced from; it is blanked
/// when the resource stops appearing in discovery. `path` is where the bytes
/// are reachable (a public raw URL when a repository prefix is configured,
/// otherwise the relative local path). `hash` is the opaque change-detection
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub hash: String,
    pub origin: String,
    pub path: String,
}

/// The persisted record of all known resources.
///
/// Invariant: `count == entries.len()` after every mutation. Entries live in
/// a `BTreeMap` so every dump comes out key-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub count: usize,
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Load a previously written manifest.
    ///
    /// An absent or unreadable file is an empty manifest, not an error; the
    /// prior run's data is simply unavailable and everything gets re-fetched.
    pub fn load(path: &Path) -> Manifest {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Manifest>(&raw) {
                Ok(manifest) => {
                    info!(path = %path.display(), count = manifest.count, "loaded manifest");
                    manifest
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "manifest unreadable, starting empty");
                    Manifest::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Manifest::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "manifest unreadable, starting empty");
                Manifest::default()
            }
        }
    }
}

/// Merge freshly synced entries into the previous manifest.
///
/// Entries missing from the fresh set are tombstoned first (origin blanked,
/// path and hash kept), then every fresh entry is inserted, overwriting the
/// tombstone for any name present in both. The order is an invariant: a name
/// present in the fresh set always ends up with fresh data.
pub fn merge(fresh: &BTreeMap<String, ManifestEntry>, previous: &Manifest) -> Manifest {
    let mut entries = previous.entries.clone();

    for (name, entry) in entries.iter_mut() {
        if !fresh.contains_key(name) {
            entry.origin = String::new();
        }
    }

    entries.extend(fresh.iter().map(|(k, v)| (k.clone(), v.clone())));

    Manifest {
        count: entries.len(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, hash: &str, origin: &str) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            hash: hash.to_string(),
            origin: origin.to_string(),
            path: format!("images/{name}.png"),
        }
    }

    fn manifest_of(entries: Vec<ManifestEntry>) -> Manifest {
        let entries: BTreeMap<_, _> = entries
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();
        Manifest {
            count: entries.len(),
            entries,
        }
    }

    #[test]
    fn test_merge_tombstones_missing_entries() {
        let previous = manifest_of(vec![entry("de_dust2", "h1", "http://x/old.png")]);
        let fresh = BTreeMap::new();

        let merged = merge(&fresh, &previous);

        let d = &merged.entries["de_dust2"];
        assert_eq!(d.origin, "");
        assert_eq!(d.hash, "h1");
        assert_eq!(d.path, "images/de_dust2.png");
    }

    #[test]
    fn test_merge_fresh_overrides_previous() {
        let previous = manifest_of(vec![entry("de_dust2", "h1", "http://x/old.png")]);
        let fresh: BTreeMap<_, _> = [(
            "de_dust2".to_string(),
            entry("de_dust2", "h2", "http://x/new.png"),
        )]
        .into();

        let merged = merge(&fresh, &previous);

        assert_eq!(merged.entries["de_dust2"], fresh["de_dust2"]);
    }

    #[test]
    fn test_merge_count_matches_entries() {
        let previous = manifest_of(vec![entry("a", "h1", "u1"), entry("b", "h2", "u2")]);
        let fresh: BTreeMap<_, _> = [("c".to_string(), entry("c", "h3", "u3"))].into();

        let merged = merge(&fresh, &previous);

        assert_eq!(merged.count, 3);
        assert_eq!(merged.count, merged.entries.len());
    }

    #[test]
    fn test_merge_is_idempotent_and_leaves_inputs_alone() {
        let previous = manifest_of(vec![entry("a", "h1", "u1"), entry("b", "h2", "u2")]);
        let fresh: BTreeMap<_, _> = [("a".to_string(), entry("a", "h9", "u9"))].into();

        let previous_before = previous.clone();
        let fresh_before = fresh.clone();

        let once = merge(&fresh, &previous);
        let twice = merge(&fresh, &previous);

        assert_eq!(once, twice);
        assert_eq!(previous, previous_before);
        assert_eq!(fresh, fresh_before);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(&dir.path().join("available.json"));
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("available.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Manifest::load(&path), Manifest::default());
    }

    #[test]
    fn test_load_round_trips_written_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("available.json");
        let manifest = manifest_of(vec![entry("de_mirage", "h3", "http://x/mirage.png")]);
        std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

        assert_eq!(Manifest::load(&path), manifest);
    }
}

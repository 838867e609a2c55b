use std::path::Path;

use tabled::{Table, Tabled, settings::Style};
use tracing::{error, info};

use crate::entry::Manifest;
use crate::error::ManifestError;

pub const JSON_DUMP: &str = "available.json";
pub const CSV_DUMP: &str = "available.csv";
pub const MD_DUMP: &str = "available.md";

/// Structured full-fidelity dump, pretty-printed and key-sorted.
pub fn write_json(manifest: &Manifest, data_dir: &Path) -> Result<(), ManifestError> {
    let raw = serde_json::to_string_pretty(manifest)?;
    std::fs::write(data_dir.join(JSON_DUMP), raw)?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Tabular dump, one row per entry, rows sorted by name.
pub fn write_csv(manifest: &Manifest, data_dir: &Path) -> Result<(), ManifestError> {
    let mut lines = vec!["map_name,hash,origin,path".to_string()];
    for (name, entry) in &manifest.entries {
        lines.push(format!(
            "{},{},{},{}",
            csv_field(name),
            csv_field(&entry.hash),
            csv_field(&entry.origin),
            csv_field(&entry.path),
        ));
    }
    std::fs::write(data_dir.join(CSV_DUMP), lines.join("\n") + "\n")?;
    Ok(())
}

#[derive(Tabled)]
struct MdRow<'a> {
    map_name: &'a str,
    hash: &'a str,
    origin: &'a str,
    path: &'a str,
}

/// Human-readable pipe-delimited table, same rows and order as the CSV.
pub fn write_md(manifest: &Manifest, data_dir: &Path) -> Result<(), ManifestError> {
    let rows = manifest.entries.iter().map(|(name, entry)| MdRow {
        map_name: name,
        hash: &entry.hash,
        origin: &entry.origin,
        path: &entry.path,
    });
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    std::fs::write(data_dir.join(MD_DUMP), table.to_string() + "\n")?;
    Ok(())
}

/// Write all three dump artifacts, each attempted independently.
///
/// One artifact failing never prevents the others from being written.
/// Returns the number of artifacts that failed.
pub fn write_all(manifest: &Manifest, data_dir: &Path) -> usize {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        error!(dir = %data_dir.display(), error = %e, "cannot create data dir");
        return 3;
    }

    let artifacts: [(&str, Result<(), ManifestError>); 3] = [
        (JSON_DUMP, write_json(manifest, data_dir)),
        (CSV_DUMP, write_csv(manifest, data_dir)),
        (MD_DUMP, write_md(manifest, data_dir)),
    ];

    let mut failed = 0;
    for (artifact, result) in artifacts {
        match result {
            Ok(()) => info!("dumped all data to {artifact}"),
            Err(e) => {
                error!(artifact, error = %e, "dump failed");
                failed += 1;
            }
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::entry::ManifestEntry;

    fn sample() -> Manifest {
        let entries: BTreeMap<_, _> = ["b", "a", "c"]
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    ManifestEntry {
                        name: name.to_string(),
                        hash: format!("h_{name}"),
                        origin: format!("http://x/{name}.png"),
                        path: format!("images/{name}.png"),
                    },
                )
            })
            .collect();
        Manifest {
            count: entries.len(),
            entries,
        }
    }

    #[test]
    fn test_csv_rows_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(&sample(), dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(CSV_DUMP)).unwrap();
        let lines: Vec<&str> = raw.lines().collect();

        assert_eq!(lines[0], "map_name,hash,origin,path");
        assert!(lines[1].starts_with("a,"));
        assert!(lines[2].starts_with("b,"));
        assert!(lines[3].starts_with("c,"));
    }

    #[test]
    fn test_csv_escapes_embedded_commas() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_md_has_header_separator_and_sorted_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_md(&sample(), dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(MD_DUMP)).unwrap();
        let lines: Vec<&str> = raw.lines().collect();

        assert!(lines[0].contains("map_name"));
        assert!(lines[1].contains("---"));
        let a = raw.find("| a").unwrap();
        let b = raw.find("| b").unwrap();
        let c = raw.find("| c").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_json_dump_is_key_sorted_and_full_fidelity() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = sample();
        write_json(&manifest, dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(JSON_DUMP)).unwrap();
        let parsed: Manifest = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed, manifest);
        let a = raw.find("\"a\"").unwrap();
        let b = raw.find("\"b\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_write_all_attempts_each_artifact_independently() {
        let dir = tempfile::tempdir().unwrap();
        // Occupy the JSON path with a directory so that artifact cannot be
        // written.
        std::fs::create_dir_all(dir.path().join(JSON_DUMP)).unwrap();

        let failed = write_all(&sample(), dir.path());

        assert_eq!(failed, 1);
        assert!(dir.path().join(CSV_DUMP).is_file());
        assert!(dir.path().join(MD_DUMP).is_file());
    }

    #[test]
    fn test_write_all_overwrites_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CSV_DUMP), "stale").unwrap();

        let failed = write_all(&sample(), dir.path());

        assert_eq!(failed, 0);
        let raw = std::fs::read_to_string(dir.path().join(CSV_DUMP)).unwrap();
        assert!(raw.starts_with("map_name,"));
    }
}

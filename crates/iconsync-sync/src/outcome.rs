use iconsync_manifest::ManifestEntry;

/// Successful per-resource result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First time this resource was seen; bytes fetched and persisted.
    New(ManifestEntry),
    /// Fingerprint changed (or local asset was missing); re-fetched.
    Updated(ManifestEntry),
    /// Probe fingerprint matched the stored one and the asset exists on disk;
    /// no bytes transferred, no write.
    Unchanged(ManifestEntry),
}

impl Outcome {
    pub fn into_entry(self) -> ManifestEntry {
        match self {
            Outcome::New(e) | Outcome::Updated(e) | Outcome::Unchanged(e) => e,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::New(_) => "new",
            Outcome::Updated(_) => "updated",
            Outcome::Unchanged(_) => "unchanged",
        }
    }
}

/// End-of-run tallies for the summary log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub new: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::New(_) => self.new += 1,
            Outcome::Updated(_) => self.updated += 1,
            Outcome::Unchanged(_) => self.unchanged += 1,
        }
    }
}

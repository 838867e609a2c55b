use tracing::{debug, warn};

const DEFAULT_REPO: &str = "MurkyYT/cs2-map-icons";
const DEFAULT_BRANCH: &str = "main";

fn var_or_default(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) => {
            debug!("{name}: {value}");
            value
        }
        Err(_) => {
            warn!("{name} not set, defaulting to {default}");
            default.to_string()
        }
    }
}

/// Public URL prefix for manifest `path` fields.
///
/// Built from `GITHUB_REPOSITORY` and `DEFAULT_BRANCH` (with the upstream
/// defaults when unset). Setting `GITHUB_REPOSITORY` to an empty string
/// disables the prefix; entries then record relative local paths.
pub fn public_url_prefix() -> Option<String> {
    let repo = var_or_default("GITHUB_REPOSITORY", DEFAULT_REPO);
    let branch = var_or_default("DEFAULT_BRANCH", DEFAULT_BRANCH);

    if repo.is_empty() {
        warn!("empty GITHUB_REPOSITORY, omitting public URL prefix");
        return None;
    }
    let branch = if branch.is_empty() {
        DEFAULT_BRANCH.to_string()
    } else {
        branch
    };

    Some(format!(
        "https://raw.githubusercontent.com/{repo}/{branch}/images"
    ))
}

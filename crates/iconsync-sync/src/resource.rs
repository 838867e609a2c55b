/// One named remote asset for the duration of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Lowercase stable identifier, unique within a run.
    pub name: String,
    /// Remote URL produced by discovery.
    pub url: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Deterministic local file name: `{name}.{extension}`, extension taken
    /// from the URL's trailing segment after the last `.`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, extension_of(&self.url))
    }
}

fn extension_of(url: &str) -> &str {
    match url.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => ext,
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_url_extension() {
        let r = Resource::new("de_dust2", "http://x/icons/de_dust2.svg");
        assert_eq!(r.file_name(), "de_dust2.svg");
    }

    #[test]
    fn test_file_name_defaults_when_url_has_no_extension() {
        let r = Resource::new("de_dust2", "http://x/icons/de_dust2");
        assert_eq!(r.file_name(), "de_dust2.png");
    }

    #[test]
    fn test_dot_in_host_is_not_an_extension() {
        let r = Resource::new("de_nuke", "http://example.com/nuke");
        assert_eq!(r.file_name(), "de_nuke.png");
    }
}

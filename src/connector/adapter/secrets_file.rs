use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::application::SecretsLookup;
use crate::domain::DomainError;

/// Secrets read from a flat TOML file of string keys:
///
/// ```toml
/// PERPLEXITY_API_KEY = "pplx-..."
/// ```
///
/// Non-string values are skipped.
#[derive(Default)]
pub struct SecretsFile {
    values: HashMap<String, String>,
}

impl SecretsFile {
    pub fn parse(contents: &str) -> Result<Self, DomainError> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| DomainError::parse(format!("invalid secrets file: {e}")))?;

        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Loads `path` if it exists. A missing file yields an empty mapping; an
    /// unreadable or malformed one is logged and also yields an empty mapping.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            debug!("No secrets file at {}", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(secrets) => {
                debug!("Loaded {} secrets from {}", secrets.len(), path.display());
                secrets
            }
            Err(e) => {
                warn!("Ignoring secrets file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SecretsLookup for SecretsFile {
    fn get(&self, key: &str) -> Option<SecretString> {
        self.values.get(key).map(|v| SecretString::new(v.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn parses_string_keys_only() {
        let secrets = SecretsFile::parse(
            r#"
PERPLEXITY_API_KEY = "pplx-123"
RETRIES = 3
"#,
        )
        .unwrap();

        assert_eq!(secrets.len(), 1);
        assert_eq!(
            secrets.get("PERPLEXITY_API_KEY").unwrap().expose_secret(),
            "pplx-123"
        );
        assert!(secrets.get("RETRIES").is_none());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(SecretsFile::parse("= nope").err().unwrap().is_parse_error());
    }

    #[test]
    fn load_reads_keys_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PERPLEXITY_API_KEY = \"pplx-file\"").unwrap();

        let secrets = SecretsFile::load(file.path()).unwrap();
        assert_eq!(
            secrets.get("PERPLEXITY_API_KEY").unwrap().expose_secret(),
            "pplx-file"
        );
    }

    #[test]
    fn missing_or_broken_files_yield_empty_mappings() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SecretsFile::load_or_empty(&dir.path().join("absent.toml")).is_empty());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "PERPLEXITY_API_KEY = ").unwrap();
        assert!(SecretsFile::load_or_empty(&broken).is_empty());
    }
}

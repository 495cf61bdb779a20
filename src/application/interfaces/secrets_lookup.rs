use std::collections::HashMap;

use secrecy::SecretString;

/// A read-only key/value store of secrets injected at startup.
pub trait SecretsLookup: Send + Sync {
    /// Returns the secret stored under `key`, if any.
    fn get(&self, key: &str) -> Option<SecretString>;
}

impl SecretsLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<SecretString> {
        HashMap::get(self, key).map(|v| SecretString::new(v.clone()))
    }
}

use std::collections::BTreeMap;

/// Per-engine configuration overrides.
///
/// A plain string-to-string store with dot-separated keys
/// (`service.session.cookie.key`), installed before the pipeline is wired
/// up so application code reads these values instead of file-based
/// configuration. Each engine owns its store; parallel engines never share
/// one.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys under a dot-separated prefix, e.g. `service.session`.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.values.iter().filter_map(move |(k, v)| {
            let rest = k.strip_prefix(prefix)?;
            let rest = rest.strip_prefix('.')?;
            Some((rest, v.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

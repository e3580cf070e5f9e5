use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, StreamError};

pub const DEFAULT_CHUNK_SIZE: u64 = 1024;

/// Capability tag every stream must carry.
pub const MODE_READ: &str = "read";

const RECOGNIZED_KEYS: [&str; 5] = [
    "chunk_size",
    "mode",
    "type",
    "read_all",
    "default_file_name",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Binary,
    Text,
}

impl Default for StreamKind {
    fn default() -> Self {
        StreamKind::Binary
    }
}

impl StreamKind {
    fn from_tag(tag: &str) -> Result<StreamKind> {
        match tag {
            "binary" => Ok(StreamKind::Binary),
            "text" => Ok(StreamKind::Text),
            other => Err(StreamError::InvalidConfiguration(format!(
                "unknown stream type: {}",
                other
            ))),
        }
    }
}

/// Stream configuration, immutable once the stream is constructed.
///
/// `chunk_size` is the number of bytes materialized per chunk load,
/// `mode` the set of capability tags (must contain `"read"`), `kind`
/// selects the binary or text variant, `read_all` marks streams whose
/// consumers are expected to drain to the end, and `default_file_name`
/// is display metadata only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub chunk_size: u64,
    pub mode: BTreeSet<String>,
    pub kind: StreamKind,
    pub read_all: bool,
    pub default_file_name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        let mut mode = BTreeSet::new();
        mode.insert(MODE_READ.to_string());
        StreamConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            mode,
            kind: StreamKind::default(),
            read_all: false,
            default_file_name: String::new(),
        }
    }
}

impl StreamConfig {
    /// Build a config from an external key/value mapping. An absent mapping
    /// and absent keys fall back to defaults; unrecognized keys or
    /// unparseable values abort construction.
    pub fn from_map(map: Option<&HashMap<String, String>>) -> Result<StreamConfig> {
        let mut config = StreamConfig::default();
        let map = match map {
            Some(map) => map,
            None => return Ok(config),
        };

        for key in map.keys() {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                return Err(StreamError::InvalidConfiguration(format!(
                    "unrecognized key: {}",
                    key
                )));
            }
        }

        if let Some(raw) = map.get("chunk_size") {
            config.chunk_size = raw.parse::<u64>().map_err(|_| {
                StreamError::InvalidConfiguration(format!("chunk_size is not an integer: {}", raw))
            })?;
        }
        if let Some(raw) = map.get("mode") {
            config.mode = raw
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect();
        }
        if let Some(raw) = map.get("type") {
            config.kind = StreamKind::from_tag(raw)?;
        }
        if let Some(raw) = map.get("read_all") {
            config.read_all = raw.parse::<bool>().map_err(|_| {
                StreamError::InvalidConfiguration(format!("read_all is not a boolean: {}", raw))
            })?;
        }
        if let Some(raw) = map.get("default_file_name") {
            config.default_file_name = raw.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(StreamError::InvalidConfiguration(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if !self.mode.contains(MODE_READ) {
            return Err(StreamError::InvalidConfiguration(format!(
                "mode must contain \"{}\"",
                MODE_READ
            )));
        }
        Ok(())
    }

    pub fn is_text(&self) -> bool {
        self.kind == StreamKind::Text
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{StreamConfig, StreamKind, DEFAULT_CHUNK_SIZE};
    use crate::error::StreamError;

    fn map_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_map_yields_defaults() {
        let config = StreamConfig::from_map(None).unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.kind, StreamKind::Binary);
        assert!(!config.read_all);
        assert!(config.mode.contains("read"));
    }

    #[test]
    fn full_map_parses() {
        let map = map_of(&[
            ("chunk_size", "16"),
            ("mode", "read, seek"),
            ("type", "text"),
            ("read_all", "true"),
            ("default_file_name", "blob.txt"),
        ]);
        let config = StreamConfig::from_map(Some(&map)).unwrap();
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.kind, StreamKind::Text);
        assert!(config.read_all);
        assert_eq!(config.default_file_name, "blob.txt");
        assert!(config.mode.contains("seek"));
    }

    #[test]
    fn unrecognized_key_is_rejected() {
        let map = map_of(&[("chunkiness", "16")]);
        let err = StreamConfig::from_map(Some(&map)).unwrap_err();
        assert!(matches!(err, StreamError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let map = map_of(&[("chunk_size", "0")]);
        let err = StreamConfig::from_map(Some(&map)).unwrap_err();
        assert!(matches!(err, StreamError::InvalidConfiguration(_)));
    }

    #[test]
    fn mode_without_read_is_rejected() {
        let map = map_of(&[("mode", "seek")]);
        let err = StreamConfig::from_map(Some(&map)).unwrap_err();
        assert!(matches!(err, StreamError::InvalidConfiguration(_)));
    }

    #[test]
    fn bad_type_and_bool_are_rejected() {
        let map = map_of(&[("type", "octet")]);
        assert!(StreamConfig::from_map(Some(&map)).is_err());

        let map = map_of(&[("read_all", "yes")]);
        assert!(StreamConfig::from_map(Some(&map)).is_err());
    }
}

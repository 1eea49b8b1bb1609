//! Parsing of `key: value` option strings shared by suites and observers.
//!
//! Options are whitespace separated; a key is terminated by a colon and
//! followed by a single value token (`dimensions: 2,3,5`). The compact form
//! `key:value` is accepted too.

use std::collections::HashSet;

use crate::errors::ConfigError;

/// Ordered `key: value` pairs. Later duplicates win on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<(String, String)>,
}

impl OptionList {
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        let mut pending: Option<String> = None;

        for token in input.split_whitespace() {
            if let Some(key) = pending.take() {
                if token.ends_with(':') {
                    return Err(ConfigError::MissingOptionValue { key });
                }
                entries.push((key, token.to_string()));
                continue;
            }

            match token.split_once(':') {
                Some((key, "")) if !key.is_empty() => pending = Some(key.to_string()),
                Some((key, value)) if !key.is_empty() => {
                    entries.push((key.to_string(), value.to_string()));
                }
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "unexpected token '{token}' in options '{input}'"
                    )));
                }
            }
        }

        if let Some(key) = pending {
            return Err(ConfigError::MissingOptionValue { key });
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fails on the first key not contained in `known`.
    pub fn ensure_known(&self, context: &str, known: &[&str]) -> Result<(), ConfigError> {
        match self.iter().find(|(k, _)| !known.contains(k)) {
            Some((key, _)) => Err(ConfigError::UnknownOptionKey {
                context: context.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Parses a comma separated list of indices with inclusive ranges, e.g.
/// `1-3,5` becomes `[1, 2, 3, 5]`. Duplicates keep their first position.
pub fn parse_index_list(key: &str, value: &str) -> Result<Vec<usize>, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidOptionValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    };

    let mut indices = Vec::new();
    let mut seen = HashSet::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (
                a.trim().parse::<usize>().map_err(|_| invalid("not an index range"))?,
                b.trim().parse::<usize>().map_err(|_| invalid("not an index range"))?,
            ),
            None => {
                let single = part.parse::<usize>().map_err(|_| invalid("not an index"))?;
                (single, single)
            }
        };
        if start > end {
            return Err(invalid("range start exceeds range end"));
        }
        for index in start..=end {
            if seen.insert(index) {
                indices.push(index);
            }
        }
    }

    if indices.is_empty() {
        return Err(invalid("empty index list"));
    }
    Ok(indices)
}

/// Parses `0`/`1` (and `false`/`true`).
pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidOptionValue {
            key: key.to_string(),
            value: value.to_string(),
            message: "expected 0 or 1".to_string(),
        }),
    }
}

pub fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidOptionValue {
        key: key.to_string(),
        value: value.to_string(),
        message: "expected a non-negative integer".to_string(),
    })
}

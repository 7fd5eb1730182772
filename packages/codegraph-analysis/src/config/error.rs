//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown field in YAML
    #[error("Unknown field '{field}' in section '{section}'. {suggestion}")]
    UnknownField {
        field: String,
        section: String,
        suggestion: String,
        valid_fields: Vec<String>,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Semantic validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an unknown field error with suggestion
    pub fn unknown_field_with_suggestion(
        field: impl Into<String>,
        section: impl Into<String>,
        valid_fields: Vec<String>,
    ) -> Self {
        let field = field.into();
        let suggestion = find_closest_match(&field, &valid_fields);

        Self::UnknownField {
            field,
            section: section.into(),
            suggestion,
            valid_fields,
        }
    }

    /// Map a YAML error raised by `deny_unknown_fields` to [`ConfigError::UnknownField`];
    /// any other error is kept as [`ConfigError::Yaml`].
    ///
    /// The message has the form "[path: ]unknown field ..., expected ..."; the
    /// path names the section and the expected clause lists the valid fields.
    pub fn from_yaml_error(err: serde_yaml::Error) -> Self {
        let message = err.to_string();
        let Some(start) = message.find("unknown field `") else {
            return Self::Yaml(err);
        };
        let rest = &message[start + "unknown field `".len()..];
        let Some(end) = rest.find('`') else {
            return Self::Yaml(err);
        };
        let field = &rest[..end];

        let section = message[..start].trim_end().trim_end_matches(':');
        let section = if section.is_empty() { "<root>" } else { section };

        let expected = rest[end + 1..]
            .split(" at line ")
            .next()
            .unwrap_or_default();
        let valid_fields = expected
            .split('`')
            .skip(1)
            .step_by(2)
            .map(str::to_string)
            .collect();

        Self::unknown_field_with_suggestion(field, section, valid_fields)
    }
}

/// Find closest match using simple edit distance
fn find_closest_match(target: &str, candidates: &[String]) -> String {
    candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(target, candidate))
        .map(|closest| format!("Did you mean '{}'?", closest))
        .unwrap_or_else(|| "No valid fields available".to_string())
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s2: Vec<char> = s2.chars().collect();
    let mut prev: Vec<usize> = (0..=s2.len()).collect();

    for (i, c1) in s1.chars().enumerate() {
        let mut row = vec![i + 1; s2.len() + 1];
        for (j, &c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }

    prev[s2.len()]
}

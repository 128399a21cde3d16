use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Deserializer;
use t4_source::Severity;

/// Configured severity of a diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Off,
    Error,
    Warning,
    Info,
    Hint,
}

impl DiagnosticSeverity {
    /// The rendering severity, or `None` when the diagnostic is turned off.
    #[must_use]
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            DiagnosticSeverity::Off => None,
            DiagnosticSeverity::Error => Some(Severity::Error),
            DiagnosticSeverity::Warning => Some(Severity::Warning),
            DiagnosticSeverity::Info => Some(Severity::Info),
            DiagnosticSeverity::Hint => Some(Severity::Hint),
        }
    }
}

/// Per-code diagnostic severities.
///
/// Every diagnostic is an error unless configured otherwise. Keys are either
/// full codes or code prefixes, stored upper-cased, and the longest matching
/// key wins:
///
/// ```toml
/// [diagnostics.severity]
/// S = "warning"    # all schema diagnostics
/// S101 = "off"     # except unknown attributes
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct DiagnosticsConfig {
    #[serde(default, deserialize_with = "uppercase_keys")]
    pub severity: FxHashMap<String, DiagnosticSeverity>,
}

impl DiagnosticsConfig {
    /// Set the severity of a code or prefix, replacing any key that differs
    /// only in case.
    pub fn set(&mut self, code: &str, severity: DiagnosticSeverity) {
        self.severity.insert(code.to_ascii_uppercase(), severity);
    }

    /// # Examples
    /// ```
    /// # use t4_conf::{DiagnosticsConfig, DiagnosticSeverity};
    /// let mut config = DiagnosticsConfig::default();
    /// config.severity.insert("T".to_string(), DiagnosticSeverity::Warning);
    /// config.severity.insert("T102".to_string(), DiagnosticSeverity::Off);
    ///
    /// assert_eq!(config.get_severity("T102"), DiagnosticSeverity::Off);
    /// assert_eq!(config.get_severity("T100"), DiagnosticSeverity::Warning);
    /// assert_eq!(config.get_severity("S100"), DiagnosticSeverity::Error);
    /// ```
    #[must_use]
    pub fn get_severity(&self, code: &str) -> DiagnosticSeverity {
        self.severity
            .iter()
            .filter(|(pattern, _)| starts_with_ignore_case(code, pattern))
            .max_by_key(|(pattern, _)| (pattern.len(), pattern.as_str()))
            .map_or(DiagnosticSeverity::Error, |(_, &severity)| severity)
    }

    #[must_use]
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_severity(code) != DiagnosticSeverity::Off
    }
}

fn uppercase_keys<'de, D>(
    deserializer: D,
) -> Result<FxHashMap<String, DiagnosticSeverity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, DiagnosticSeverity>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(code, severity)| (code.to_ascii_uppercase(), severity))
        .collect())
}

fn starts_with_ignore_case(code: &str, prefix: &str) -> bool {
    code.len() >= prefix.len()
        && code.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entries: &[(&str, DiagnosticSeverity)]) -> DiagnosticsConfig {
        DiagnosticsConfig {
            severity: entries
                .iter()
                .map(|(code, severity)| ((*code).to_string(), *severity))
                .collect(),
        }
    }

    #[test]
    fn test_default_is_error() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.get_severity("T100"), DiagnosticSeverity::Error);
        assert!(config.is_enabled("S103"));
    }

    #[test]
    fn test_exact_code() {
        let config = config(&[("S101", DiagnosticSeverity::Off)]);
        assert_eq!(config.get_severity("S101"), DiagnosticSeverity::Off);
        assert_eq!(config.get_severity("S102"), DiagnosticSeverity::Error);
        assert!(!config.is_enabled("S101"));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let config = config(&[
            ("S", DiagnosticSeverity::Hint),
            ("S10", DiagnosticSeverity::Info),
            ("S103", DiagnosticSeverity::Warning),
        ]);
        assert_eq!(config.get_severity("S103"), DiagnosticSeverity::Warning);
        assert_eq!(config.get_severity("S100"), DiagnosticSeverity::Info);
        assert_eq!(config.get_severity("S200"), DiagnosticSeverity::Hint);
        assert_eq!(config.get_severity("T100"), DiagnosticSeverity::Error);
    }

    #[test]
    fn test_keys_ignore_case() {
        let config = config(&[("t10", DiagnosticSeverity::Hint)]);
        assert_eq!(config.get_severity("T102"), DiagnosticSeverity::Hint);
    }

    #[test]
    fn test_set_replaces_keys_differing_in_case() {
        let mut config = config(&[("S101", DiagnosticSeverity::Hint)]);
        config.set("s101", DiagnosticSeverity::Off);
        assert_eq!(config.severity.len(), 1);
        assert_eq!(config.get_severity("S101"), DiagnosticSeverity::Off);
    }

    #[test]
    fn test_case_only_duplicates_resolve_the_same_way_every_time() {
        let config = config(&[
            ("S101", DiagnosticSeverity::Hint),
            ("s101", DiagnosticSeverity::Off),
        ]);
        let first = config.get_severity("S101");
        for _ in 0..16 {
            assert_eq!(config.clone().get_severity("S101"), first);
        }
        assert_eq!(first, DiagnosticSeverity::Off);
    }

    #[test]
    fn test_to_severity() {
        assert_eq!(DiagnosticSeverity::Off.to_severity(), None);
        assert_eq!(
            DiagnosticSeverity::Warning.to_severity(),
            Some(Severity::Warning)
        );
    }
}

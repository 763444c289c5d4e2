//! Parsing of metric declarations.
//!
//! A declaration has the form `oid[:name[:diff[:stacked]]]`. Malformed input
//! never produces an error: declarations without a name are skipped and
//! unreadable flags fall back to `false`. Both cases are reported as named
//! outcomes so callers can tell them apart from a clean parse.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field separator inside a declaration.
pub const DECLARATION_SEPARATOR: char = ':';

/// One polled quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Every colon-separated field of the declaration. The first entry is the
    /// object identifier handed to the session.
    pub identifiers: Vec<String>,
    /// Metric name, also used as its label
    pub name: String,
    /// Graph the per-minute rate instead of the raw value
    pub is_differential: bool,
    /// Render as part of a stacked area
    pub is_stacked: bool,
}

impl MetricSpec {
    /// The object identifier to fetch, if the field list is not empty.
    pub fn oid(&self) -> Option<&str> {
        self.identifiers.first().map(String::as_str)
    }
}

/// Why a declaration produced no metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two colon-separated fields
    MissingName,
    /// The name field is present but empty
    EmptyName,
}

/// Result of parsing one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationOutcome {
    Parsed(MetricSpec),
    Skipped(SkipReason),
}

impl DeclarationOutcome {
    /// The parsed metric, if any.
    pub fn into_spec(self) -> Option<MetricSpec> {
        match self {
            Self::Parsed(spec) => Some(spec),
            Self::Skipped(_) => None,
        }
    }
}

/// A boolean flag field as read from a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    True,
    False,
    /// Unrecognised text; treated as `false`
    Invalid,
}

impl FlagValue {
    /// Read a flag, accepting `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn parse(text: &str) -> Self {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Self::True,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Self::False,
            _ => Self::Invalid,
        }
    }

    pub fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

/// Parse a single declaration.
pub fn parse_declaration(declaration: &str) -> DeclarationOutcome {
    let identifiers: Vec<String> = declaration
        .split(DECLARATION_SEPARATOR)
        .map(str::to_string)
        .collect();

    if identifiers.len() < 2 {
        debug!("Skipping declaration without a metric name: {:?}", declaration);
        return DeclarationOutcome::Skipped(SkipReason::MissingName);
    }

    if identifiers[1].is_empty() {
        debug!("Skipping declaration with an empty metric name: {:?}", declaration);
        return DeclarationOutcome::Skipped(SkipReason::EmptyName);
    }

    let is_differential = read_flag(&identifiers, 2, "diff");
    let is_stacked = read_flag(&identifiers, 3, "stacked");
    let name = identifiers[1].clone();

    DeclarationOutcome::Parsed(MetricSpec {
        identifiers,
        name,
        is_differential,
        is_stacked,
    })
}

/// Parse declarations in order, dropping the skipped ones.
pub fn parse_declarations<I, S>(declarations: I) -> Vec<MetricSpec>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    declarations
        .into_iter()
        .filter_map(|declaration| parse_declaration(declaration.as_ref()).into_spec())
        .collect()
}

fn read_flag(fields: &[String], index: usize, label: &str) -> bool {
    let Some(text) = fields.get(index) else {
        return false;
    };

    let flag = FlagValue::parse(text);
    if flag == FlagValue::Invalid {
        debug!("Unrecognised {} flag {:?} on {}, using false", label, text, fields[1]);
    }
    flag.as_bool()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(declaration: &str) -> MetricSpec {
        match parse_declaration(declaration) {
            DeclarationOutcome::Parsed(spec) => spec,
            other => panic!("expected a metric for {declaration:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_name_only() {
        let spec = parsed("1.3.6.1:cpu");
        assert_eq!(spec.oid(), Some("1.3.6.1"));
        assert_eq!(spec.name, "cpu");
        assert!(!spec.is_differential);
        assert!(!spec.is_stacked);
        assert_eq!(spec.identifiers, vec!["1.3.6.1", "cpu"]);
    }

    #[test]
    fn test_diff_and_stacked_flags() {
        let spec = parsed("1.3.6.1:cpu:true:false");
        assert!(spec.is_differential);
        assert!(!spec.is_stacked);

        let spec = parsed("1.3.6.1:cpu:0:1");
        assert!(!spec.is_differential);
        assert!(spec.is_stacked);
    }

    #[test]
    fn test_missing_name_is_skipped() {
        assert_eq!(
            parse_declaration("justanoid"),
            DeclarationOutcome::Skipped(SkipReason::MissingName)
        );
        assert_eq!(
            parse_declaration(""),
            DeclarationOutcome::Skipped(SkipReason::MissingName)
        );
    }

    #[test]
    fn test_invalid_flag_defaults_to_false() {
        assert_eq!(FlagValue::parse("yes"), FlagValue::Invalid);
        assert_eq!(FlagValue::parse("tRuE"), FlagValue::Invalid);
        let spec = parsed("1.3.6.1:cpu:yes:maybe");
        assert!(!spec.is_differential);
        assert!(!spec.is_stacked);
    }

    #[test]
    fn test_flag_spellings() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(FlagValue::parse(text), FlagValue::True, "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(FlagValue::parse(text), FlagValue::False, "{text}");
        }
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let spec = parsed("1.3.6.1.2.1.2.2.1.10.1:ifInOctets:1:1:extra");
        assert_eq!(spec.identifiers.len(), 5);
        assert_eq!(spec.identifiers[4], "extra");
        assert!(spec.is_differential && spec.is_stacked);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        assert_eq!(
            parse_declaration("1.3.6.1:"),
            DeclarationOutcome::Skipped(SkipReason::EmptyName)
        );
        assert_eq!(
            parse_declaration("1.3.6.1::1"),
            DeclarationOutcome::Skipped(SkipReason::EmptyName)
        );
    }

    #[test]
    fn test_oid_of_empty_field_list() {
        let spec = MetricSpec {
            identifiers: Vec::new(),
            name: "orphan".to_string(),
            is_differential: false,
            is_stacked: false,
        };
        assert_eq!(spec.oid(), None);

        let spec: MetricSpec = serde_json::from_str(
            r#"{"identifiers":[],"name":"x","is_differential":false,"is_stacked":false}"#,
        )
        .unwrap();
        assert_eq!(spec.oid(), None);
    }

    #[test]
    fn test_parse_declarations_preserves_order() {
        let specs = parse_declarations(["1.1:a", "bogus", "1.2:b:1", "1.3:a"]);
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }
}

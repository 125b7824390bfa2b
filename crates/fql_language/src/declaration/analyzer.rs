//! Declaration analyzer implementation.
//!
//! Contains the `DeclarationAnalyzer` struct and all analysis methods.

use fql_foundation::{Error, ErrorContext, ErrorKind, Result};
use serde_json::{Map, Value};

use super::types::{
    AlternativeDecl, EntryDecl, FeatureDecl, META_RESOURCE, PositionDecl, RuleSetDecl,
};

/// Key of the positional half of an alternative.
pub const POS_KEY: &str = "pos";

/// Key of the count half of an alternative.
pub const NPOS_KEY: &str = "Npos";

/// Analyzes raw JSON and extracts typed declarations.
pub struct DeclarationAnalyzer;

impl DeclarationAnalyzer {
    // =========================================================================
    // Text Entry Points
    // =========================================================================

    /// Parse a whole query (a JSON array of rule sets).
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or any rule set is invalid.
    pub fn parse_query(text: &str) -> Result<Vec<RuleSetDecl>> {
        Self::analyze_query(&Self::parse_json(text)?)
    }

    /// Parse a single rule set (a JSON array of alternatives).
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or the rule set is invalid.
    pub fn parse_rule_set(text: &str) -> Result<RuleSetDecl> {
        Self::analyze_rule_set(&Self::parse_json(text)?)
    }

    fn parse_json(text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| Error::new(ErrorKind::Json(e.to_string())))
    }

    // =========================================================================
    // Query and Rule Set Analysis
    // =========================================================================

    /// Analyze a query: an array of rule sets.
    ///
    /// # Errors
    /// Returns an error if the value is not an array or any rule set is invalid.
    pub fn analyze_query(value: &Value) -> Result<Vec<RuleSetDecl>> {
        let Value::Array(sets) = value else {
            return Err(Error::invalid_rule(
                "a query must be an array of rule sets",
                value.to_string(),
            ));
        };

        sets.iter()
            .enumerate()
            .map(|(i, set)| {
                Self::analyze_rule_set(set)
                    .map_err(|e| e.with_context(ErrorContext::new().with_set(i)))
            })
            .collect()
    }

    /// Analyze a rule set: an array of alternatives.
    ///
    /// # Errors
    /// Returns an error if the value is not an array or any alternative is invalid.
    pub fn analyze_rule_set(value: &Value) -> Result<RuleSetDecl> {
        let Value::Array(alternatives) = value else {
            return Err(Error::invalid_rule(
                "a rule set must be an array of alternatives",
                value.to_string(),
            ));
        };

        let alternatives = alternatives
            .iter()
            .enumerate()
            .map(|(i, alt)| {
                Self::analyze_alternative(alt)
                    .map_err(|e| e.with_context(ErrorContext::new().with_alternative(i)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleSetDecl { alternatives })
    }

    // =========================================================================
    // Alternative Analysis
    // =========================================================================

    /// Analyze one alternative object with optional `pos` and `Npos` lists.
    ///
    /// # Errors
    /// Returns an error if the alternative is not an object, declares
    /// neither half, or contains an invalid entry.
    pub fn analyze_alternative(value: &Value) -> Result<AlternativeDecl> {
        let Value::Object(obj) = value else {
            return Err(Error::invalid_rule(
                "an alternative must be an object",
                value.to_string(),
            ));
        };

        let pos = match obj.get(POS_KEY) {
            Some(list) => Some(Self::analyze_pos(list)?),
            None => None,
        };
        let npos = match obj.get(NPOS_KEY) {
            Some(list) => Some(Self::analyze_npos(list)?),
            None => None,
        };

        if pos.is_none() && npos.is_none() {
            return Err(Error::invalid_rule(
                "an alternative must declare pos or Npos",
                value.to_string(),
            ));
        }

        Ok(AlternativeDecl { pos, npos })
    }

    fn analyze_pos(list: &Value) -> Result<Vec<PositionDecl>> {
        let entries = Self::expect_list(list, POS_KEY)?;
        entries
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::analyze_position(item)
                    .map_err(|e| e.with_context(ErrorContext::new().with_entry(POS_KEY, i)))
            })
            .collect()
    }

    fn analyze_npos(list: &Value) -> Result<Vec<EntryDecl>> {
        let entries = Self::expect_list(list, NPOS_KEY)?;
        entries
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::analyze_entry(item)
                    .map_err(|e| e.with_context(ErrorContext::new().with_entry(NPOS_KEY, i)))
            })
            .collect()
    }

    fn expect_list<'v>(list: &'v Value, key: &str) -> Result<&'v [Value]> {
        match list {
            Value::Array(items) if items.is_empty() => Err(Error::invalid_rule(
                format!("{key} must not be empty"),
                list.to_string(),
            )),
            Value::Array(items) => Ok(items),
            other => Err(Error::invalid_rule(
                format!("{key} must be an array"),
                other.to_string(),
            )),
        }
    }

    // =========================================================================
    // Entry Analysis
    // =========================================================================

    /// Analyze one `pos` slot: an entry object or an AND-group array of them.
    ///
    /// # Errors
    /// Returns an error if the slot is an empty group, a nested array, or
    /// any entry is invalid.
    pub fn analyze_position(value: &Value) -> Result<PositionDecl> {
        match value {
            Value::Array(items) if items.is_empty() => Err(Error::invalid_rule(
                "an AND-group must not be empty",
                value.to_string(),
            )),
            Value::Array(items) => items
                .iter()
                .map(Self::analyze_entry)
                .collect::<Result<Vec<_>>>()
                .map(PositionDecl::Group),
            _ => Self::analyze_entry(value).map(PositionDecl::Single),
        }
    }

    /// Analyze a single entry object.
    ///
    /// Entries tagged `"resource": "fql"` are meta entries. Every other
    /// entry must declare both `resource` and `feature`.
    ///
    /// # Errors
    /// Returns an error naming the missing field(s) and the raw object.
    pub fn analyze_entry(value: &Value) -> Result<EntryDecl> {
        let Value::Object(obj) = value else {
            return Err(Error::invalid_rule(
                "a rule entry must be an object",
                value.to_string(),
            ));
        };
        let raw = value.to_string();

        let resource = Self::string_field(obj, "resource", &raw)?;
        let feature = Self::string_field(obj, "feature", &raw)?;
        let count = Self::string_field(obj, "count", &raw)?;

        if resource == Some(META_RESOURCE) {
            return Ok(EntryDecl::Meta {
                feature: feature.map(str::to_string),
                raw,
            });
        }

        match (resource, feature) {
            (Some(resource), Some(feature)) => Ok(EntryDecl::Feature(FeatureDecl {
                resource: resource.to_string(),
                feature: feature.to_string(),
                count: count.map(str::to_string),
                raw,
            })),
            (None, None) => Err(Error::invalid_rule(
                "rule entry must declare both resource and feature",
                raw,
            )),
            (None, Some(_)) => Err(Error::invalid_rule("rule entry is missing resource", raw)),
            (Some(_), None) => Err(Error::invalid_rule("rule entry is missing feature", raw)),
        }
    }

    fn string_field<'v>(
        obj: &'v Map<String, Value>,
        key: &str,
        raw: &str,
    ) -> Result<Option<&'v str>> {
        match obj.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(Error::invalid_rule(format!("{key} must be a string"), raw)),
        }
    }
}

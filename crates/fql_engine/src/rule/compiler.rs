//! Rule compiler - lowers rule declarations into compiled rules.
//!
//! Compiles `RuleSetDecl` from the language crate into [`QuerySet`] for
//! matching. The resources each set references are returned alongside the
//! compiled rules rather than accumulated in shared state.

use std::collections::BTreeSet;

use fql_foundation::{CountRange, Error, ErrorContext, FeatureToken, Result};
use fql_language::declaration::{
    AlternativeDecl, END_ANCHOR, EntryDecl, FeatureDecl, NPOS_KEY, POS_KEY, PositionDecl,
    RuleSetDecl, START_ANCHOR,
};
use fql_language::parse_count;
use log::{debug, warn};

use super::{
    Alternative, CompiledCountRule, CompiledInstruction, CompiledPosition,
    CompiledPositionalRule, CountConstraint, Pattern, Query, QuerySet,
};
use crate::config::EngineConfig;

/// Marker that turns a feature into a wildcard.
const WILDCARD_MARKER: &str = ".*";

/// The bare wildcard users tend to write, which is rejected.
const BARE_WILDCARD: &str = "*";

// =============================================================================
// Rule Compiler
// =============================================================================

/// Compiles rule declarations into executable rules.
pub struct RuleCompiler;

impl RuleCompiler {
    /// Compile every rule set of a query.
    ///
    /// Compilation fails fast: the first invalid rule aborts the whole query.
    ///
    /// # Errors
    /// Returns an error if any rule set fails to compile.
    pub fn compile_query(sets: &[RuleSetDecl], config: &EngineConfig) -> Result<Query> {
        let sets = sets
            .iter()
            .enumerate()
            .map(|(i, set)| {
                Self::compile_rule_set(set, config)
                    .map_err(|e| e.with_context(ErrorContext::new().with_set(i)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Query { sets })
    }

    /// Compile one rule set.
    ///
    /// # Errors
    /// Returns an error if any alternative fails to compile.
    pub fn compile_rule_set(set: &RuleSetDecl, config: &EngineConfig) -> Result<QuerySet> {
        let mut alternatives = Vec::with_capacity(set.alternatives.len());
        let mut resources = BTreeSet::new();

        for (i, decl) in set.alternatives.iter().enumerate() {
            let (alternative, used) = Self::compile_alternative(decl, config)
                .map_err(|e| e.with_context(ErrorContext::new().with_alternative(i)))?;
            alternatives.push(alternative);
            resources.extend(used);
        }

        debug!(
            "compiled rule set: {} alternative(s), resources {:?}",
            alternatives.len(),
            resources
        );

        Ok(QuerySet {
            alternatives,
            resources,
        })
    }

    /// Compile one alternative, returning it with the resources it references.
    ///
    /// # Errors
    /// Returns an error if an entry is invalid.
    pub fn compile_alternative(
        decl: &AlternativeDecl,
        config: &EngineConfig,
    ) -> Result<(Alternative, BTreeSet<String>)> {
        let mut resources = BTreeSet::new();

        let positional = match &decl.pos {
            Some(pos) => Some(Self::compile_positional(pos, config, &mut resources)?),
            None => None,
        };
        let count = match &decl.npos {
            Some(npos) => Some(Self::compile_count(npos, config, &mut resources)?),
            None => None,
        };

        Ok((Alternative { positional, count }, resources))
    }

    // =========================================================================
    // Positional Rules
    // =========================================================================

    fn compile_positional(
        pos: &[PositionDecl],
        config: &EngineConfig,
        resources: &mut BTreeSet<String>,
    ) -> Result<CompiledPositionalRule> {
        let last = pos.len().saturating_sub(1);
        let mut hard_start = false;
        let mut hard_stop = false;
        let mut positions = Vec::with_capacity(pos.len());

        for (i, slot) in pos.iter().enumerate() {
            let located = |e: Error| e.with_context(ErrorContext::new().with_entry(POS_KEY, i));

            if let Some(entry @ EntryDecl::Meta { feature, .. }) = slot.as_single() {
                match feature.as_deref() {
                    Some(START_ANCHOR) if i == 0 => hard_start = true,
                    Some(END_ANCHOR) if i == last => hard_stop = true,
                    _ => Self::drop_meta(entry, Some(i), config).map_err(located)?,
                }
                continue;
            }

            let mut instructions = Vec::with_capacity(slot.entries().len());
            for entry in slot.entries() {
                match entry {
                    EntryDecl::Meta { .. } => Self::drop_meta(entry, None, config).map_err(located)?,
                    EntryDecl::Feature(feature) => {
                        instructions.push(Self::compile_instruction(feature).map_err(located)?);
                        resources.insert(feature.resource.clone());
                    }
                }
            }

            if !instructions.is_empty() {
                positions.push(CompiledPosition::new(instructions));
            }
        }

        if positions.is_empty() {
            let raw: Vec<&str> = pos
                .iter()
                .flat_map(PositionDecl::entries)
                .map(EntryDecl::raw)
                .collect();
            return Err(Error::invalid_rule(
                "pos declares no feature positions",
                format!("[{}]", raw.join(",")),
            ));
        }

        // Anchored at both ends, an unbounded quantifier is capped at one.
        if hard_start && hard_stop {
            for instr in positions.iter_mut().flat_map(|p| p.instructions.iter_mut()) {
                if instr.range.is_unbounded() {
                    instr.range.max = Some(1);
                }
            }
        }

        Ok(CompiledPositionalRule {
            hard_start,
            hard_stop,
            positions,
        })
    }

    fn compile_instruction(decl: &FeatureDecl) -> Result<CompiledInstruction> {
        let pattern = Self::compile_pattern(decl)?;
        let range = Self::compile_range(decl)?;
        Ok(CompiledInstruction::new(pattern, range))
    }

    fn compile_pattern(decl: &FeatureDecl) -> Result<Pattern> {
        if decl.feature == BARE_WILDCARD {
            return Err(Error::disallowed_wildcard(decl.raw.clone()));
        }
        if decl.feature.contains(WILDCARD_MARKER) {
            return Ok(Pattern::Wildcard);
        }
        Ok(Pattern::Literal(FeatureToken::new(
            decl.feature.as_str(),
            decl.resource.as_str(),
        )))
    }

    fn compile_range(decl: &FeatureDecl) -> Result<CountRange> {
        decl.count
            .as_deref()
            .map_or(Ok(CountRange::DEFAULT), parse_count)
    }

    /// Meta entries other than a correctly placed anchor are dropped, or
    /// rejected in strict mode.
    fn drop_meta(entry: &EntryDecl, index: Option<usize>, config: &EngineConfig) -> Result<()> {
        let anchor = [START_ANCHOR, END_ANCHOR]
            .into_iter()
            .find(|a| entry.is_meta_feature(a));

        if config.strict_anchors {
            return Err(match (anchor, index) {
                (Some(anchor), Some(index)) => Error::misplaced_anchor(anchor, index),
                _ => Error::invalid_rule("fql meta entry is not allowed here", entry.raw()),
            });
        }

        warn!("ignoring fql meta entry {}", entry.raw());
        Ok(())
    }

    // =========================================================================
    // Count Rules
    // =========================================================================

    fn compile_count(
        npos: &[EntryDecl],
        config: &EngineConfig,
        resources: &mut BTreeSet<String>,
    ) -> Result<CompiledCountRule> {
        let mut constraints = Vec::with_capacity(npos.len());

        for (i, entry) in npos.iter().enumerate() {
            let located = |e: Error| e.with_context(ErrorContext::new().with_entry(NPOS_KEY, i));
            match entry {
                EntryDecl::Meta { .. } => Self::drop_meta(entry, None, config).map_err(located)?,
                EntryDecl::Feature(feature) => {
                    constraints.push(Self::compile_count_constraint(feature).map_err(located)?);
                    resources.insert(feature.resource.clone());
                }
            }
        }

        Ok(CompiledCountRule { constraints })
    }

    fn compile_count_constraint(decl: &FeatureDecl) -> Result<CountConstraint> {
        match Self::compile_pattern(decl)? {
            Pattern::Literal(token) => Ok(CountConstraint {
                needle: token.to_string(),
                range: Self::compile_range(decl)?,
            }),
            Pattern::Wildcard => Err(Error::invalid_rule(
                "wildcards are not supported in Npos",
                decl.raw.clone(),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

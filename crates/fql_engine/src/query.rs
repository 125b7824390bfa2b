//! The query engine.
//!
//! A [`QueryEngine`] owns a compiled [`Query`] and evaluates items against
//! every set independently. Within a set alternatives are combined with
//! OR; within an alternative the positional and count halves are combined
//! with AND.
//!
//! The engine holds no mutable state, so one instance can be shared across
//! threads and used for any number of concurrent evaluations.

use fql_foundation::{FeatureSource, Result, TokenSequence};
use fql_language::{DeclarationAnalyzer, RuleSetDecl};
use log::debug;

use crate::config::EngineConfig;
use crate::count::CountConstraintEvaluator;
use crate::explain::{AlternativeReport, SetReport};
use crate::rule::{Alternative, Query, QuerySet, RuleCompiler};
use crate::sequence::SequentialPositionalEvaluator;

/// Evaluates items against a compiled query.
#[derive(Clone, Debug, Default)]
pub struct QueryEngine {
    query: Query,
    config: EngineConfig,
}

impl QueryEngine {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wrap an already compiled query.
    #[must_use]
    pub fn new(query: Query, config: EngineConfig) -> Self {
        Self { query, config }
    }

    /// Compile `sets` into an engine.
    ///
    /// # Errors
    /// Fails on the first invalid rule; no partial query is produced.
    pub fn compile(sets: &[RuleSetDecl], config: EngineConfig) -> Result<Self> {
        let query = RuleCompiler::compile_query(sets, &config)?;
        Ok(Self::new(query, config))
    }

    /// Parse and compile a JSON array of rule sets.
    ///
    /// # Errors
    /// Fails if the text is not JSON or any rule is invalid.
    pub fn from_json(text: &str, config: EngineConfig) -> Result<Self> {
        let sets = DeclarationAnalyzer::parse_query(text)?;
        Self::compile(&sets, config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The compiled query.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The configuration the query was compiled with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Every resource any set references.
    #[must_use]
    pub fn required_resources(&self) -> Vec<&str> {
        self.query.required_resources().into_iter().collect()
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Indices of the sets that match `tokens`, in ascending order.
    #[must_use]
    pub fn evaluate_tokens(&self, tokens: &TokenSequence) -> Vec<usize> {
        let haystack = tokens.concatenated();
        let matched: Vec<usize> = self
            .query
            .sets
            .iter()
            .enumerate()
            .filter(|(_, set)| self.set_matches(set, tokens, &haystack))
            .map(|(index, _)| index)
            .collect();
        debug!("evaluated {} tokens, matched sets {matched:?}", tokens.len());
        matched
    }

    /// Indices of the sets that match `item`.
    ///
    /// Each set sees only the tokens of the resources it references.
    #[must_use]
    pub fn evaluate<S: FeatureSource + ?Sized>(&self, item: &S) -> Vec<usize> {
        let matched: Vec<usize> = self
            .query
            .sets
            .iter()
            .enumerate()
            .filter(|(_, set)| {
                let tokens = TokenSequence::extract(item, set.resources());
                self.set_matches(set, &tokens, &tokens.concatenated())
            })
            .map(|(index, _)| index)
            .collect();
        debug!("evaluated item, matched sets {matched:?}");
        matched
    }

    /// Evaluate each item in turn.
    #[must_use]
    pub fn evaluate_batch<'a, S, I>(&self, items: I) -> Vec<Vec<usize>>
    where
        S: FeatureSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        items.into_iter().map(|item| self.evaluate(item)).collect()
    }

    fn set_matches(&self, set: &QuerySet, tokens: &TokenSequence, haystack: &str) -> bool {
        set.alternatives
            .iter()
            .any(|alt| self.alternative_matches(alt, tokens, haystack))
    }

    fn alternative_matches(
        &self,
        alternative: &Alternative,
        tokens: &TokenSequence,
        haystack: &str,
    ) -> bool {
        let positional_ok = alternative.positional.as_ref().is_none_or(|rule| {
            SequentialPositionalEvaluator::matches(rule, tokens, &self.config)
        });
        positional_ok
            && alternative
                .count
                .as_ref()
                .is_none_or(|rule| CountConstraintEvaluator::evaluate(rule, haystack))
    }

    // =========================================================================
    // Explanation
    // =========================================================================

    /// Report every set's outcome against `tokens`.
    ///
    /// Unlike evaluation, every alternative and both of its halves are
    /// evaluated.
    #[must_use]
    pub fn explain(&self, tokens: &TokenSequence) -> Vec<SetReport> {
        let haystack = tokens.concatenated();
        self.query
            .sets
            .iter()
            .enumerate()
            .map(|(index, set)| self.explain_set(index, set, tokens, &haystack))
            .collect()
    }

    /// Report every set's outcome against `item`, extracting per set.
    #[must_use]
    pub fn explain_item<S: FeatureSource + ?Sized>(&self, item: &S) -> Vec<SetReport> {
        self.query
            .sets
            .iter()
            .enumerate()
            .map(|(index, set)| {
                let tokens = TokenSequence::extract(item, set.resources());
                self.explain_set(index, set, &tokens, &tokens.concatenated())
            })
            .collect()
    }

    fn explain_set(
        &self,
        index: usize,
        set: &QuerySet,
        tokens: &TokenSequence,
        haystack: &str,
    ) -> SetReport {
        let alternatives = set
            .alternatives
            .iter()
            .map(|alt| AlternativeReport {
                positional: alt
                    .positional
                    .as_ref()
                    .map(|rule| SequentialPositionalEvaluator::evaluate(rule, tokens, &self.config)),
                count: alt
                    .count
                    .as_ref()
                    .map(|rule| CountConstraintEvaluator::evaluate(rule, haystack)),
            })
            .collect();
        SetReport {
            index,
            alternatives,
        }
    }
}

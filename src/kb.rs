//! The knowledge base: append-only storage for assertions and rules with a
//! first-symbol index.
//!
//! This mirrors a compile-time rule-indexing step that derives bucket
//! indexes from a rule slice, generalized from coarse boolean buckets to the
//! string-keyed first-symbol buckets this language's retrieval contract
//! requires. The index is purely an optimization: every entity that lands in
//! a bucket also lands in the unindexed "all" list, so an implementation
//! that ignored the index entirely and always scanned "all" would still be
//! correct, just slower.

use std::collections::HashMap;

use crate::term::Term;

/// Sentinel index key under which every rule whose conclusion starts with a
/// variable is stored; these must be considered for any indexed lookup since
/// a variable-headed conclusion can unify with anything.
pub const WILDCARD_KEY: &str = "$";

/// One append-only collection (assertions, or rules) with its first-symbol
/// index.
#[derive(Debug, Default)]
struct Store {
    all: Vec<Term>,
    by_key: HashMap<String, Vec<usize>>,
}

impl Store {
    fn insert(&mut self, entity: Term, index_key: Option<&str>) {
        let id = self.all.len();
        if let Some(key) = index_key {
            self.by_key.entry(key.to_string()).or_default().push(id);
        }
        self.all.push(entity);

        tracing::debug!(entity = %self.all[id], "inserted entity");
        if let Some(key) = index_key {
            tracing::trace!(key, "indexed under first-symbol key");
        }
    }

    fn bucket(&self, key: &str) -> Vec<&Term> {
        self.by_key.get(key).map(|ids| ids.iter().map(|&i| &self.all[i]).collect()).unwrap_or_default()
    }

    fn all(&self) -> Vec<&Term> {
        self.all.iter().collect()
    }
}

/// The append-only store of assertions and rules, indexed by first symbol.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    assertions: Store,
    rules: Store,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Insert an assertion. Indexed under its first element's constant-symbol
    /// value when it has one; otherwise stored only in the unindexed list.
    pub fn insert_assertion(&mut self, assertion: Term) {
        let key = assertion.index_key().map(str::to_string);
        self.assertions.insert(assertion, key.as_deref());
    }

    /// Insert a rule. Indexed by its *conclusion*'s leading symbol: a
    /// constant symbol indexes normally, a leading variable indexes under
    /// [`WILDCARD_KEY`] in addition to the unindexed list, and anything else
    /// (empty conclusion, or a nested sequence in head position) is stored
    /// only in the unindexed list.
    pub fn insert_rule(&mut self, rule: &Term, conclusion: &Term) {
        let key = if let Some(k) = conclusion.index_key() {
            Some(k.to_string())
        } else if conclusion.starts_with_variable() {
            Some(WILDCARD_KEY.to_string())
        } else {
            None
        };
        self.rules.insert(rule.clone(), key.as_deref());
    }

    /// Fetch assertions relevant to `pattern`: the indexed bucket when the
    /// pattern's first element is a constant symbol, otherwise every
    /// assertion.
    pub fn fetch_assertions(&self, pattern: &Term) -> Vec<&Term> {
        match pattern.index_key() {
            Some(key) => self.assertions.bucket(key),
            None => self.assertions.all(),
        }
    }

    /// Fetch rules relevant to `pattern`: the indexed bucket concatenated
    /// with the wildcard bucket when the pattern's first element is a
    /// constant symbol, otherwise every rule.
    pub fn fetch_rules(&self, pattern: &Term) -> Vec<&Term> {
        match pattern.index_key() {
            Some(key) => {
                let mut hits = self.rules.bucket(key);
                hits.extend(self.rules.bucket(WILDCARD_KEY));
                hits
            }
            None => self.rules.all(),
        }
    }

    #[cfg(test)]
    pub(crate) fn assertion_count(&self) -> usize {
        self.assertions.all.len()
    }
}

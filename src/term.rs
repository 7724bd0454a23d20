//! The term model: atoms and sequences.
//!
//! Every piece of source syntax (assertions, rule conclusions and bodies,
//! queries) is parsed into a [`Term`]. Terms are immutable once built;
//! matching, unification, and hygiene all produce *new* terms rather than
//! mutating existing ones.

use std::fmt;

/// The three leaf kinds an [`Atom`] can carry, plus the reserved dot marker.
///
/// `And`/`Or`/`Not` surface as keywords in the concrete syntax (`@and`,
/// `@or`, `@not`) but are represented here with their bare domain tags, per
/// the grammar's keyword-versus-domain mapping: the evaluator dispatches on
/// these tags, not on the surface spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Variable,
    Word,
    Number,
    Dot,
    And,
    Or,
    Not,
    Apply,
    New,
    Rule,
}

/// A leaf term: a domain tag plus its surface text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub domain: Domain,
    pub value: String,
}

impl Atom {
    pub fn new(domain: Domain, value: impl Into<String>) -> Self {
        Atom { domain, value: value.into() }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Atom::new(Domain::Variable, name)
    }

    pub fn word(value: impl Into<String>) -> Self {
        Atom::new(Domain::Word, value)
    }

    pub fn number(value: impl Into<String>) -> Self {
        Atom::new(Domain::Number, value)
    }

    pub fn dot() -> Self {
        Atom::new(Domain::Dot, ".")
    }

    pub fn is_variable(&self) -> bool {
        self.domain == Domain::Variable
    }

    pub fn is_constant_symbol(&self) -> bool {
        matches!(self.domain, Domain::Word | Domain::Number)
    }

    pub fn is_dot(&self) -> bool {
        self.domain == Domain::Dot
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A term: either a leaf [`Atom`] or an ordered [`Sequence`] of terms.
///
/// `Term` derives structural `PartialEq`: matching and unification compare
/// terms by value, never by address. Sharing a `Term` behind an `Rc`/clone
/// is always safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(Atom),
    Sequence(Vec<Term>),
}

impl Term {
    pub fn empty() -> Self {
        Term::Sequence(Vec::new())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Atom(Atom::var(name))
    }

    pub fn word(value: impl Into<String>) -> Self {
        Term::Atom(Atom::word(value))
    }

    pub fn number(value: impl Into<String>) -> Self {
        Term::Atom(Atom::number(value))
    }

    pub fn dot() -> Self {
        Term::Atom(Atom::dot())
    }

    pub fn seq(items: Vec<Term>) -> Self {
        Term::Sequence(items)
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(a) => Some(a),
            Term::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Term]> {
        match self {
            Term::Sequence(items) => Some(items),
            Term::Atom(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Atom(a) if a.is_variable())
    }

    pub fn is_non_empty_sequence(&self) -> bool {
        matches!(self, Term::Sequence(items) if !items.is_empty())
    }

    /// Head/tail split of a non-empty sequence.
    pub fn split_first(&self) -> Option<(&Term, &[Term])> {
        match self {
            Term::Sequence(items) => items.split_first(),
            Term::Atom(_) => None,
        }
    }

    /// True if this term is a non-empty sequence whose first element is the
    /// dot marker (a tail-capture pattern like `(. $rest)`).
    pub fn starts_with_dot(&self) -> bool {
        match self.split_first() {
            Some((head, _)) => matches!(head, Term::Atom(a) if a.is_dot()),
            None => false,
        }
    }

    /// The term following a leading dot marker, i.e. `pattern[1]` for
    /// `(. $rest ...)`. Panics if `self` does not start with a dot; callers
    /// must check [`Term::starts_with_dot`] first.
    pub fn after_dot(&self) -> &Term {
        match self {
            Term::Sequence(items) if items.len() >= 2 => &items[1],
            _ => panic!("after_dot called on a term without a dot-headed tail"),
        }
    }

    /// The index key used by the knowledge base: the first element's
    /// constant-symbol value, if this term is non-empty and begins with one.
    pub fn index_key(&self) -> Option<&str> {
        match self.split_first() {
            Some((Term::Atom(a), _)) if a.is_constant_symbol() => Some(&a.value),
            _ => None,
        }
    }

    /// True if this term is non-empty and begins with a variable.
    pub fn starts_with_variable(&self) -> bool {
        match self.split_first() {
            Some((head, _)) => head.is_variable(),
            None => false,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, "{a}"),
            Term::Sequence(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

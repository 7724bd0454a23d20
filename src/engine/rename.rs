//! Hygienic variable renaming.
//!
//! Every variable occurrence in a rule is rewritten to `name__<uuid>` before
//! the rule is applied, so that two concurrent or recursive applications of
//! the same rule never share a variable. The suffix is stripped back off by
//! [`crate::engine::instantiate`] when a renamed variable survives to output.

use uuid::Uuid;

use crate::term::{Atom, Domain, Term};

/// The delimiter joining a variable's surface name to its per-application
/// suffix. Chosen to fall outside the lexer's variable character class
/// (`$[a-zA-Z]+[0-9]*`) so instantiation can safely strip by first
/// occurrence.
pub const ID_DELIMITER: &str = "__";

/// Rewrite every variable in `term` to a fresh, per-call unique name. All
/// occurrences of the same source variable receive the same suffix, so
/// intra-rule variable identity is preserved.
pub fn rename(term: &Term) -> Term {
    let suffix = Uuid::new_v4().to_string();
    rename_with_suffix(term, &suffix)
}

fn rename_with_suffix(term: &Term, suffix: &str) -> Term {
    match term {
        Term::Atom(a) if a.is_variable() => Term::Atom(Atom::new(Domain::Variable, format!("{}{ID_DELIMITER}{suffix}", a.value))),
        Term::Atom(a) => Term::Atom(a.clone()),
        Term::Sequence(items) => Term::Sequence(items.iter().map(|t| rename_with_suffix(t, suffix)).collect()),
    }
}

/// Strip a hygiene suffix off a variable name, recovering the user-visible
/// prefix. A no-op for names that were never renamed.
pub fn strip_suffix(name: &str) -> &str {
    name.split(ID_DELIMITER).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_preserve_intra_rule_identity() {
        let rule = Term::seq(vec![Term::var("x"), Term::var("y"), Term::var("x")]);
        let renamed = rename(&rule);
        let Term::Sequence(items) = renamed else { panic!() };
        assert_eq!(items[0], items[2]);
        assert_ne!(items[0], items[1]);
        assert_ne!(items[0], Term::var("x"));
    }

    #[test]
    fn two_applications_never_share_a_variable_name() {
        let rule = Term::var("x");
        let a = rename(&rule);
        let b = rename(&rule);
        assert_ne!(a, b);
    }

    #[test]
    fn strip_suffix_recovers_surface_name() {
        let renamed = rename(&Term::var("x"));
        let Term::Atom(a) = renamed else { panic!() };
        assert_eq!(strip_suffix(&a.value), "x");
        assert_eq!(strip_suffix("y"), "y");
    }
}

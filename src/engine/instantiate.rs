//! Instantiation and rendering.
//!
//! `instantiate(term, frame)` substitutes bindings into a term and renders
//! the result as a fully parenthesized string, the format every emitted
//! solution takes.

use crate::engine::rename::strip_suffix;
use crate::frame::Frame;
use crate::term::Term;

/// Substitute `frame`'s bindings into `term` and render the result.
pub fn instantiate(term: &Term, frame: &Frame) -> String {
    substitute(term, frame).to_string()
}

fn substitute(term: &Term, frame: &Frame) -> Term {
    match term {
        Term::Atom(a) if a.is_variable() => match frame.get(&a.value) {
            Some(binding) => substitute(binding, frame),
            None => Term::var(strip_suffix(&a.value)),
        },
        Term::Atom(a) => Term::Atom(a.clone()),
        Term::Sequence(_) if term.starts_with_dot() => substitute(term.after_dot(), frame),
        Term::Sequence(items) => Term::Sequence(items.iter().map(|t| substitute(t, frame)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_term_instantiates_to_its_own_rendering() {
        let term = Term::seq(vec![Term::word("hello"), Term::word("world")]);
        assert_eq!(instantiate(&term, &Frame::new()), "(hello world)");
    }

    #[test]
    fn bound_variable_substitutes_recursively() {
        let mut frame = Frame::new();
        frame.insert("x".to_string(), Term::word("world"));
        let term = Term::seq(vec![Term::word("hello"), Term::var("x")]);
        assert_eq!(instantiate(&term, &frame), "(hello world)");
    }

    #[test]
    fn free_variable_renders_with_user_visible_prefix() {
        let renamed = crate::engine::rename::rename(&Term::var("x"));
        assert_eq!(instantiate(&renamed, &Frame::new()), renamed_prefix(&renamed));
    }

    fn renamed_prefix(renamed: &Term) -> String {
        let Term::Atom(a) = renamed else { panic!() };
        strip_suffix(&a.value).to_string()
    }

    #[test]
    fn never_emits_the_hygiene_delimiter() {
        let renamed = crate::engine::rename::rename(&Term::seq(vec![Term::var("x"), Term::var("y")]));
        let rendered = instantiate(&renamed, &Frame::new());
        assert!(!rendered.contains(crate::engine::rename::ID_DELIMITER));
    }

    #[test]
    fn dot_tail_splices_back_into_the_parent_spine() {
        let mut frame = Frame::new();
        frame.insert("z".to_string(), Term::seq(vec![Term::word("b"), Term::word("c")]));
        let term = Term::seq(vec![Term::word("a"), Term::dot(), Term::var("z")]);
        assert_eq!(instantiate(&term, &frame), "(a b c)");
    }
}

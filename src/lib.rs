//! A Prolog/datalog-style logic query engine over s-expression syntax.
//!
//! A program is a sequence of commands: `(@new ...)` inserts an assertion or
//! a rule into the knowledge base; anything else is a query, evaluated
//! against the current knowledge base and emitted as one rendered solution
//! per line. [`Interpreter`] is the single entry point both the REPL and
//! integration tests drive.

pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod kb;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod term;

use error::InterpError;
use frame::Frame;
use kb::KnowledgeBase;
use term::{Atom, Domain, Term};

/// Drives a knowledge base from successive commands, routing each parsed
/// command to insertion or evaluation and handing every rendered solution
/// line to a sink.
pub struct Interpreter {
    kb: KnowledgeBase,
    sink: Box<dyn FnMut(String)>,
}

impl Interpreter {
    /// Build an interpreter with an empty knowledge base and the given
    /// solution sink (one call per rendered solution line).
    pub fn new(sink: impl FnMut(String) + 'static) -> Self {
        Interpreter { kb: KnowledgeBase::new(), sink: Box::new(sink) }
    }

    /// Parse and run a single command: `(@new ...)` inserts, anything else
    /// queries. Query solutions are instantiated and passed to the sink in
    /// resolution order.
    pub fn run(&mut self, command: &str) -> Result<(), InterpError> {
        let term = parser::parse(command)?;
        match classify(&term) {
            Command::Insert(entity) => self.insert(entity),
            Command::Query(query) => self.query(query),
        }
        Ok(())
    }

    fn insert(&mut self, entity: &Term) {
        let Term::Sequence(items) = entity else { return };
        if items.first() == Some(&Term::Atom(Atom::new(Domain::Rule, "@rule"))) {
            let conclusion = &items[1];
            tracing::debug!(conclusion = %conclusion, "inserting rule");
            self.kb.insert_rule(entity, conclusion);
        } else {
            tracing::debug!(assertion = %entity, "inserting assertion");
            self.kb.insert_assertion(entity.clone());
        }
    }

    fn query(&mut self, query: &Term) {
        let solutions = engine::eval::run(&self.kb, query, vec![Frame::new()]);
        tracing::info!(query = %query, solutions = solutions.len(), "query complete");
        for frame in &solutions {
            (self.sink)(engine::instantiate(query, frame));
        }
    }
}

enum Command<'a> {
    Insert(&'a Term),
    Query(&'a Term),
}

fn classify(term: &Term) -> Command<'_> {
    if let Term::Sequence(items) = term {
        if items.first() == Some(&Term::Atom(Atom::new(Domain::New, "@new"))) {
            return Command::Insert(&items[1]);
        }
    }
    Command::Query(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collecting_interpreter() -> (Interpreter, Rc<RefCell<Vec<String>>>) {
        let out = Rc::new(RefCell::new(Vec::new()));
        let sink_out = out.clone();
        (Interpreter::new(move |line| sink_out.borrow_mut().push(line)), out)
    }

    #[test]
    fn insert_then_query_round_trips_through_the_public_api() {
        let (mut interp, out) = collecting_interpreter();
        interp.run("(@new (hello world))").unwrap();
        interp.run("(hello $x)").unwrap();
        assert_eq!(*out.borrow(), vec!["(hello world)".to_string()]);
    }

    #[test]
    fn parse_error_propagates_as_interp_error() {
        let (mut interp, _out) = collecting_interpreter();
        let err = interp.run("(hello $x").unwrap_err();
        assert!(matches!(err, InterpError::Parse(_)));
    }

    #[test]
    fn query_against_an_empty_knowledge_base_yields_no_solutions() {
        let (mut interp, out) = collecting_interpreter();
        interp.run("(hello $x)").unwrap();
        assert!(out.borrow().is_empty());
    }

    #[test]
    fn rule_insertion_and_firing_round_trips() {
        let (mut interp, out) = collecting_interpreter();
        interp.run("(@new (@rule (append () $y $y)))").unwrap();
        interp.run("(@new (@rule (append ($u . $v) $y ($u . $z)) (append $v $y $z)))").unwrap();
        interp.run("(append $x () (a))").unwrap();
        assert_eq!(*out.borrow(), vec!["(append (a) () (a))".to_string()]);
    }
}

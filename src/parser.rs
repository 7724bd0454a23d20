//! Recursive-descent parser: one function per grammar production.
//!
//! ```text
//! Command   ::= '(' (Insert | Query) ')'
//! Insert    ::= '@new' Entity
//! Entity    ::= '(' (Rule | Assertion) ')'
//! Rule      ::= '@rule' '(' SimpleQuery ')' ('(' Query ')')?
//! Assertion ::= ( '(' Assertion ')' | Word | Number )*
//! Query     ::= SimpleQuery | And | Or | Not
//! And       ::= '@and' InnerQuery+
//! Or        ::= '@or'  InnerQuery+
//! Not       ::= '@not' InnerQuery
//! InnerQuery::= '(' (Query | Apply) ')'
//! Apply     ::= '@apply' ( '<' | '>' | Word ) (Var | Word | Number)+
//! SimpleQuery ::= ( '(' SimpleQuery ')' | Var | Word | Number )* ('.' Var)?
//! ```
//!
//! `@and`/`@or`/`@not` are surface keywords; the `Term`s built for them carry
//! the bare [`Domain::And`]/[`Domain::Or`]/[`Domain::Not`] tags the evaluator
//! dispatches on (see [`crate::term`]).

use crate::error::ParseError;
use crate::lexer::{self, Lexer, Token};
use crate::term::{Atom, Domain, Term};

pub fn parse(program: &str) -> Result<Term, ParseError> {
    Parser::new(Lexer::new(program)).parse_command()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        Parser { lexer, current }
    }

    fn expect(&self, expected: &[&str]) -> Result<(), ParseError> {
        if expected.iter().any(|d| *d == self.current.domain) {
            Ok(())
        } else {
            Err(ParseError::new(self.current.line, self.current.column, expected, self.current.value.clone()))
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    // Command ::= '(' (Insert | Query) ')'
    fn parse_command(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::LEFT_PAREN])?;
        self.advance();
        let term = if self.current.domain == lexer::NEW_KEYWORD { self.parse_insert()? } else { self.parse_query()? };
        self.expect(&[lexer::RIGHT_PAREN])?;
        self.advance();
        self.expect(&[lexer::EOF_DOMAIN])?;
        Ok(term)
    }

    // Insert ::= '@new' Entity
    fn parse_insert(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::NEW_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::New, self.current.value.clone()));
        self.advance();
        let entity = self.parse_entity()?;
        Ok(Term::seq(vec![head, entity]))
    }

    // Entity ::= '(' (Rule | Assertion) ')'
    fn parse_entity(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::LEFT_PAREN])?;
        self.advance();
        let term = if self.current.domain == lexer::RULE_KEYWORD { self.parse_rule()? } else { self.parse_assertion()? };
        self.expect(&[lexer::RIGHT_PAREN])?;
        self.advance();
        Ok(term)
    }

    // Assertion ::= ( '(' Assertion ')' | Word | Number )*
    fn parse_assertion(&mut self) -> Result<Term, ParseError> {
        let expected = [lexer::LEFT_PAREN, lexer::WORD_DOMAIN, lexer::NUMBER_DOMAIN];
        let mut items = Vec::new();
        while expected.contains(&self.current.domain.as_str()) {
            if self.current.domain == lexer::LEFT_PAREN {
                self.advance();
                items.push(self.parse_assertion()?);
                self.expect(&[lexer::RIGHT_PAREN])?;
            } else {
                items.push(token_to_atom(&self.current));
            }
            self.advance();
        }
        Ok(Term::seq(items))
    }

    // Rule ::= '@rule' '(' SimpleQuery ')' ('(' Query ')')?
    fn parse_rule(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::RULE_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::Rule, self.current.value.clone()));
        self.advance();
        self.expect(&[lexer::LEFT_PAREN])?;
        self.advance();
        let conclusion = self.parse_simple_query()?;
        self.expect(&[lexer::RIGHT_PAREN])?;
        self.advance();
        let mut items = vec![head, conclusion];
        if self.current.domain == lexer::LEFT_PAREN {
            self.advance();
            items.push(self.parse_query()?);
            self.expect(&[lexer::RIGHT_PAREN])?;
            self.advance();
        }
        Ok(Term::seq(items))
    }

    // Query ::= SimpleQuery | AndQuery | OrQuery | NotQuery
    fn parse_query(&mut self) -> Result<Term, ParseError> {
        match self.current.domain.as_str() {
            lexer::AND_KEYWORD => self.parse_and_query(),
            lexer::OR_KEYWORD => self.parse_or_query(),
            lexer::NOT_KEYWORD => self.parse_not_query(),
            _ => self.parse_simple_query(),
        }
    }

    // AndQuery ::= '@and' InnerQuery+
    fn parse_and_query(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::AND_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::And, "and"));
        self.advance();
        let mut items = vec![head];
        items.extend(self.parse_inner_queries()?);
        Ok(Term::seq(items))
    }

    // OrQuery ::= '@or' InnerQuery+
    fn parse_or_query(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::OR_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::Or, "or"));
        self.advance();
        let mut items = vec![head];
        items.extend(self.parse_inner_queries()?);
        Ok(Term::seq(items))
    }

    // NotQuery ::= '@not' InnerQuery
    fn parse_not_query(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::NOT_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::Not, "not"));
        self.advance();
        let operand = self.parse_inner_query()?;
        Ok(Term::seq(vec![head, operand]))
    }

    // InnerQueries ::= InnerQuery+
    fn parse_inner_queries(&mut self) -> Result<Vec<Term>, ParseError> {
        self.expect(&[lexer::LEFT_PAREN])?;
        let mut items = Vec::new();
        while self.current.domain == lexer::LEFT_PAREN {
            items.push(self.parse_inner_query()?);
        }
        Ok(items)
    }

    // InnerQuery ::= '(' (Query | Apply) ')'
    fn parse_inner_query(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::LEFT_PAREN])?;
        self.advance();
        let term = if self.current.domain == lexer::APPLY_KEYWORD { self.parse_apply()? } else { self.parse_query()? };
        self.expect(&[lexer::RIGHT_PAREN])?;
        self.advance();
        Ok(term)
    }

    // Apply ::= '@apply' Predicate ApplyArguments
    // Predicate ::= '<' | '>' | Word
    // ApplyArguments ::= (Var | Word | Number)+
    fn parse_apply(&mut self) -> Result<Term, ParseError> {
        self.expect(&[lexer::APPLY_KEYWORD])?;
        let head = Term::Atom(Atom::new(Domain::Apply, self.current.value.clone()));
        self.advance();
        self.expect(&[lexer::LESS_OP, lexer::GREATER_OP, lexer::WORD_DOMAIN])?;
        let mut items = vec![head, token_to_atom(&self.current)];
        self.advance();
        let expected = [lexer::VAR_DOMAIN, lexer::WORD_DOMAIN, lexer::NUMBER_DOMAIN];
        self.expect(&expected)?;
        while expected.contains(&self.current.domain.as_str()) {
            items.push(token_to_atom(&self.current));
            self.advance();
        }
        Ok(Term::seq(items))
    }

    // SimpleQuery ::= ( '(' SimpleQuery ')' | Var | Word | Number )* ('.' Var)?
    fn parse_simple_query(&mut self) -> Result<Term, ParseError> {
        let expected = [lexer::LEFT_PAREN, lexer::VAR_DOMAIN, lexer::WORD_DOMAIN, lexer::NUMBER_DOMAIN];
        let mut items = Vec::new();
        while expected.contains(&self.current.domain.as_str()) {
            if self.current.domain == lexer::LEFT_PAREN {
                self.advance();
                items.push(self.parse_simple_query()?);
                self.expect(&[lexer::RIGHT_PAREN])?;
            } else {
                items.push(token_to_atom(&self.current));
            }
            self.advance();
        }
        if self.current.domain == lexer::DOT {
            items.push(Term::dot());
            self.advance();
            self.expect(&[lexer::VAR_DOMAIN])?;
            items.push(token_to_atom(&self.current));
            self.advance();
        }
        Ok(Term::seq(items))
    }
}

fn token_to_atom(tok: &Token) -> Term {
    let domain = match tok.domain.as_str() {
        lexer::VAR_DOMAIN => Domain::Variable,
        lexer::WORD_DOMAIN => Domain::Word,
        lexer::NUMBER_DOMAIN => Domain::Number,
        lexer::LESS_OP => Domain::Word,
        lexer::GREATER_OP => Domain::Word,
        other => unreachable!("token_to_atom called with unexpected domain '{other}'"),
    };
    Term::Atom(Atom::new(domain, tok.value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assertion_insert() {
        let term = parse("(@new (hello world))").unwrap();
        assert_eq!(
            term,
            Term::seq(vec![
                Term::Atom(Atom::new(Domain::New, "@new")),
                Term::seq(vec![Term::word("hello"), Term::word("world")]),
            ])
        );
    }

    #[test]
    fn parses_simple_query_with_dotted_tail() {
        let term = parse("(position $x (developer . $type))").unwrap();
        let expected = Term::seq(vec![
            Term::word("position"),
            Term::var("x"),
            Term::seq(vec![Term::word("developer"), Term::dot(), Term::var("type")]),
        ]);
        assert_eq!(term, expected);
    }

    #[test]
    fn parses_rule_with_body() {
        let term = parse("(@new (@rule (append ($u . $v) $y ($u . $z)) (append $v $y $z)))").unwrap();
        assert!(matches!(&term, Term::Sequence(items) if items.len() == 2));
    }

    #[test]
    fn parses_and_or_not_and_apply() {
        let term = parse("(@and (boss $person Denis) (@not (position $person developer)))").unwrap();
        let Term::Sequence(items) = &term else { panic!("expected sequence") };
        assert_eq!(items[0], Term::Atom(Atom::new(Domain::And, "and")));

        let apply = parse("(@apply > $amount 50)").unwrap();
        let Term::Sequence(items) = &apply else { panic!("expected sequence") };
        assert_eq!(items[0], Term::Atom(Atom::new(Domain::Apply, "@apply")));
        assert_eq!(items[1], Term::word(">"));
    }

    #[test]
    fn reports_line_and_column_on_unexpected_token() {
        let err = parse("(hello $x").unwrap_err();
        assert_eq!(err.found, "");
        assert!(err.expected.contains(')'));
    }
}

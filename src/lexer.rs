//! Hand-written regex lexer.
//!
//! One pre-compiled [`regex::Regex`] with named alternative groups drives
//! tokenization, in the spirit of a `regex!`-style helper that stashes a
//! single `Lazy<Regex>` per pattern. Here there is exactly one token
//! grammar, so a single `Lazy<Regex>` with named capture groups does the job
//! instead of one regex per production rule.
//!
//! Unexpected bytes are reported (via [`tracing::warn!`]) and skipped one at
//! a time; lexing always resumes and never raises a [`crate::error::ParseError`]
//! itself, only the parser does that, on an unexpected *token*.

use once_cell::sync::Lazy;
use regex::Regex;

const KEYWORD_GROUP: &str = "keyword";
const VARIABLE_GROUP: &str = "variable";
const WORD_GROUP: &str = "word";
const NUMBER_GROUP: &str = "number";
const LINE_FEED_GROUP: &str = "line_feed";
const WHITESPACE_GROUP: &str = "whitespace";

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = [
        format!(r"\A(?P<{KEYWORD_GROUP}>\(|\)|@new|@rule|@apply|@and|@or|@not|<|>|\.)"),
        format!(r"(?P<{VARIABLE_GROUP}>\$[a-zA-Z]+[0-9]*)"),
        format!(r"(?P<{WORD_GROUP}>[a-zA-Z]+[0-9]*)"),
        format!(r"(?P<{NUMBER_GROUP}>[0-9]+)"),
        format!(r"(?P<{LINE_FEED_GROUP}>\r?\n)"),
        format!(r"(?P<{WHITESPACE_GROUP}>[ \t\x0b\x0c\r]+)"),
    ]
    .join("|");
    Regex::new(&pattern).expect("token regex is a fixed, known-valid pattern")
});

/// Domain tag attached to every [`Token`].
///
/// Keyword tokens carry their own surface spelling as the domain (e.g.
/// `"@new"`), matching the reference lexer's convention of using the matched
/// keyword text itself as the token's domain string; the parser is what
/// narrows `@and`/`@or`/`@not` down to the bare `and`/`or`/`not` atoms that
/// the evaluator dispatches on.
pub const LEFT_PAREN: &str = "(";
pub const RIGHT_PAREN: &str = ")";
pub const NEW_KEYWORD: &str = "@new";
pub const RULE_KEYWORD: &str = "@rule";
pub const APPLY_KEYWORD: &str = "@apply";
pub const AND_KEYWORD: &str = "@and";
pub const OR_KEYWORD: &str = "@or";
pub const NOT_KEYWORD: &str = "@not";
pub const LESS_OP: &str = "<";
pub const GREATER_OP: &str = ">";
pub const DOT: &str = ".";
pub const VAR_DOMAIN: &str = "var";
pub const WORD_DOMAIN: &str = "word";
pub const NUMBER_DOMAIN: &str = "number";
pub const EOF_DOMAIN: &str = "eof";

/// A single lexed token: its domain, its 1-indexed `(line, column)`
/// coordinates, and its surface text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub domain: String,
    pub line: usize,
    pub column: usize,
    pub value: String,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {}): {}", self.domain, self.line, self.column, self.value)
    }
}

/// Scans source text into a stream of [`Token`]s, one `next_token` call at a
/// time, so the parser can pull tokens lazily.
pub struct Lexer<'a> {
    program: &'a str,
    position: usize,
    delta: usize,
    line_num: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(program: &'a str) -> Self {
        Lexer { program, position: 0, delta: 0, line_num: 1 }
    }

    fn column(&self) -> usize {
        self.position - self.delta + 1
    }

    /// Scan the next token, recursing past skipped whitespace, newlines, and
    /// unexpected characters until a real token (or EOF) is produced.
    pub fn next_token(&mut self) -> Token {
        if self.position >= self.program.len() {
            return Token {
                domain: EOF_DOMAIN.to_string(),
                line: self.line_num,
                column: self.column(),
                value: String::new(),
            };
        }

        let rest = &self.program[self.position..];
        let Some(caps) = TOKEN_RE.captures(rest) else {
            tracing::warn!(line = self.line_num, column = self.column(), "unexpected character");
            // Advance by one *character* (not byte) so multi-byte UTF-8 is skipped atomically.
            let skipped_len = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            self.position += skipped_len;
            return self.next_token();
        };
        let whole = caps.get(0).expect("group 0 always matches").as_str();
        let matched_len = whole.len();

        if caps.name(LINE_FEED_GROUP).is_some() {
            self.position += matched_len;
            self.delta = self.position;
            self.line_num += 1;
            return self.next_token();
        }
        if let Some(g) = caps.name(VARIABLE_GROUP) {
            let value = g.as_str().to_string();
            return self.emit(VAR_DOMAIN, value, matched_len);
        }
        if let Some(g) = caps.name(WORD_GROUP) {
            let value = g.as_str().to_string();
            return self.emit(WORD_DOMAIN, value, matched_len);
        }
        if let Some(g) = caps.name(NUMBER_GROUP) {
            let value = g.as_str().to_string();
            return self.emit(NUMBER_DOMAIN, value, matched_len);
        }
        if let Some(g) = caps.name(KEYWORD_GROUP) {
            let value = g.as_str().to_string();
            return self.emit(&value.clone(), value, matched_len);
        }

        // Whitespace: skip and continue.
        self.position += matched_len;
        self.next_token()
    }

    fn emit(&mut self, domain: &str, value: String, matched_len: usize) -> Token {
        let token = Token { domain: domain.to_string(), line: self.line_num, column: self.column(), value };
        self.position += matched_len;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let is_eof = tok.domain == EOF_DOMAIN;
            out.push(tok);
            if is_eof {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_query() {
        let toks = tokens("(hello $x)");
        let domains: Vec<&str> = toks.iter().map(|t| t.domain.as_str()).collect();
        assert_eq!(domains, vec![LEFT_PAREN, WORD_DOMAIN, VAR_DOMAIN, RIGHT_PAREN, EOF_DOMAIN]);
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let toks = tokens("(a\n  b)");
        let b = &toks[2];
        assert_eq!(b.value, "b");
        assert_eq!(b.line, 2);
        assert_eq!(b.column, 3);
    }

    #[test]
    fn skips_unexpected_characters_and_resumes() {
        let toks = tokens("(a # b)");
        let domains: Vec<&str> = toks.iter().map(|t| t.domain.as_str()).collect();
        assert_eq!(domains, vec![LEFT_PAREN, WORD_DOMAIN, WORD_DOMAIN, RIGHT_PAREN, EOF_DOMAIN]);
    }

    #[test]
    fn recognizes_all_keywords_and_operators() {
        let toks = tokens("@new @rule @apply @and @or @not < > .");
        let domains: Vec<&str> = toks.iter().map(|t| t.domain.as_str()).collect();
        assert_eq!(
            domains,
            vec![NEW_KEYWORD, RULE_KEYWORD, APPLY_KEYWORD, AND_KEYWORD, OR_KEYWORD, NOT_KEYWORD, LESS_OP, GREATER_OP, DOT, EOF_DOMAIN]
        );
    }
}

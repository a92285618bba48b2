// Copyright 2025 Rauli Laine
//
// This file is part of laskin.
//
// laskin is free software: you can redistribute it and/or modify it under the
// terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// laskin is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// laskin. If not, see <https://www.gnu.org/licenses/>.

//! Recursive descent parser producing quotes of AST nodes.

use std::rc::Rc;

use crate::ast::Node;
use crate::error::{Error, ErrorKind};
use crate::quote::Quote;
use crate::value::Value;

/// Parses the given source text into a quote holding the statement sequence.
///
/// # Errors
///
/// Returns a *syntax* error carrying the source position of the offending
/// construct.
pub fn parse(source: &str, line: i32) -> Result<Quote, Error> {
    Parser::new(source, line).parse_script().map(Quote::from_nodes)
}

/// True for characters that may appear in a symbol: printable, non-blank and
/// not one of the structural characters.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !c.is_control()
        && !matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ',')
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: i32,
    column: i32,
}

impl Parser {
    fn new(source: &str, line: i32) -> Parser {
        Parser {
            chars: source.chars().collect(),
            pos: 0,
            line,
            column: 1,
        }
    }

    fn parse_script(&mut self) -> Result<Vec<Rc<Node>>, Error> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();
            if self.eof() {
                break;
            }
            nodes.push(self.parse_statement()?);
        }

        Ok(nodes)
    }

    fn parse_statement(&mut self) -> Result<Rc<Node>, Error> {
        self.skip_whitespace();

        if self.eof() {
            return Err(self.error("Unexpected end of input; Missing statement."));
        }

        match self.peek() {
            '(' => self.parse_quote_literal(),
            '[' => self.parse_vector_literal(),
            '{' => self.parse_record_literal(),
            '"' | '\'' => self.parse_string_literal(),
            _ => self.parse_statement_symbol(),
        }
    }

    fn parse_expression(&mut self) -> Result<Rc<Node>, Error> {
        self.skip_whitespace();

        if self.eof() {
            return Err(self.error("Unexpected end of input; Missing expression."));
        }

        match self.peek() {
            '(' => self.parse_quote_literal(),
            '[' => self.parse_vector_literal(),
            '{' => self.parse_record_literal(),
            '"' | '\'' => self.parse_string_literal(),
            _ => self.parse_symbol(),
        }
    }

    fn parse_quote_literal(&mut self) -> Result<Rc<Node>, Error> {
        let mut nodes = Vec::new();

        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if !self.peek_read('(') {
            return Err(self.unexpected_input("Missing quote literal.", line, column));
        }

        self.skip_whitespace();

        if !self.peek_read(')') {
            loop {
                if self.eof() {
                    return Err(Error::with_position(
                        ErrorKind::Syntax,
                        "Unterminated quote literal; Missing `)'",
                        line,
                        column,
                    ));
                } else if self.peek_read(')') {
                    break;
                }
                nodes.push(self.parse_statement()?);
                self.skip_whitespace();
            }
        }

        Ok(Rc::new(Node::Literal {
            value: Value::Quote(Quote::from_nodes(nodes)),
            line,
            column,
        }))
    }

    fn parse_vector_literal(&mut self) -> Result<Rc<Node>, Error> {
        let mut elements = Vec::new();

        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if !self.peek_read('[') {
            return Err(self.unexpected_input("Missing vector literal.", line, column));
        }

        self.skip_whitespace();

        if !self.peek_read(']') {
            loop {
                if self.eof() {
                    return Err(Error::with_position(
                        ErrorKind::Syntax,
                        "Unterminated vector literal; Missing `]'",
                        line,
                        column,
                    ));
                } else if self.peek_read(']') {
                    break;
                }
                elements.push(self.parse_expression()?);
                self.skip_whitespace();
                if self.peek_read(',') {
                    continue;
                } else if self.peek_read(']') {
                    break;
                } else {
                    return Err(Error::with_position(
                        ErrorKind::Syntax,
                        "Unterminated vector literal; Missing `]'",
                        line,
                        column,
                    ));
                }
            }
        }

        Ok(Rc::new(Node::VectorLiteral {
            elements,
            line,
            column,
        }))
    }

    fn parse_record_literal(&mut self) -> Result<Rc<Node>, Error> {
        let mut properties = Vec::new();

        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if !self.peek_read('{') {
            return Err(self.unexpected_input("Missing record literal.", line, column));
        }

        self.skip_whitespace();

        if !self.peek_read('}') {
            loop {
                if self.eof() {
                    return Err(Error::with_position(
                        ErrorKind::Syntax,
                        "Unterminated record literal; Missing `}'",
                        line,
                        column,
                    ));
                } else if self.peek_read('}') {
                    break;
                }

                let key = self.parse_string_raw()?;

                self.skip_whitespace();
                if !self.peek_read(':') {
                    return Err(self.error("Missing `:' after record key."));
                }

                let value = self.parse_expression()?;

                properties.push((key, value));
                self.skip_whitespace();
                if self.peek_read(',') {
                    continue;
                } else if self.peek_read('}') {
                    break;
                } else {
                    return Err(Error::with_position(
                        ErrorKind::Syntax,
                        "Unterminated record literal; Missing `}'",
                        line,
                        column,
                    ));
                }
            }
        }

        Ok(Rc::new(Node::RecordLiteral {
            properties,
            line,
            column,
        }))
    }

    fn parse_string_literal(&mut self) -> Result<Rc<Node>, Error> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let buffer = self.parse_string_raw()?;

        Ok(Rc::new(Node::Literal {
            value: Value::String(buffer),
            line,
            column,
        }))
    }

    /// Reads a quoted string, decoding escape sequences.
    fn parse_string_raw(&mut self) -> Result<String, Error> {
        let mut buffer = String::new();

        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let separator = if self.peek_read('"') {
            '"'
        } else if self.peek_read('\'') {
            '\''
        } else {
            return Err(self.unexpected_input("Missing string literal.", line, column));
        };

        loop {
            if self.eof() {
                return Err(Error::with_position(
                    ErrorKind::Syntax,
                    format!("Unterminated string literal: Missing `{separator}'"),
                    line,
                    column,
                ));
            } else if self.peek_read(separator) {
                break;
            } else if self.peek_read('\\') {
                self.parse_escape_sequence(&mut buffer)?;
            } else {
                let c = self.read();

                buffer.push(c);
            }
        }

        Ok(buffer)
    }

    fn parse_escape_sequence(&mut self, buffer: &mut String) -> Result<(), Error> {
        let line = self.line;
        let column = self.column;

        if self.eof() {
            return Err(Error::with_position(
                ErrorKind::Syntax,
                "Unexpected end of input; Missing escape sequence.",
                line,
                column,
            ));
        }

        match self.read() {
            'b' => buffer.push('\u{8}'),
            't' => buffer.push('\t'),
            'n' => buffer.push('\n'),
            'f' => buffer.push('\u{c}'),
            'r' => buffer.push('\r'),
            c @ ('"' | '\'' | '\\' | '/') => buffer.push(c),
            'u' => {
                let mut result: u32 = 0;

                for _ in 0..4 {
                    if self.eof() {
                        return Err(Error::with_position(
                            ErrorKind::Syntax,
                            "Unterminated escape sequence.",
                            line,
                            column,
                        ));
                    }

                    let c = self.peek();
                    let digit = c.to_digit(16).ok_or_else(|| {
                        Error::with_position(
                            ErrorKind::Syntax,
                            "Illegal Unicode hex escape sequence.",
                            line,
                            column,
                        )
                    })?;

                    self.read();
                    result = result * 16 + digit;
                }

                buffer.push(char::from_u32(result).ok_or_else(|| {
                    Error::with_position(
                        ErrorKind::Syntax,
                        "Illegal Unicode hex escape sequence.",
                        line,
                        column,
                    )
                })?);
            }
            _ => {
                return Err(Error::with_position(
                    ErrorKind::Syntax,
                    "Illegal escape sequence in string literal.",
                    line,
                    column,
                ))
            }
        }

        Ok(())
    }

    fn parse_symbol(&mut self) -> Result<Rc<Node>, Error> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let buffer = self.read_symbol("Missing symbol.", line, column)?;

        if buffer == "->" {
            return Err(Error::with_position(
                ErrorKind::Syntax,
                "Unexpected definition; Missing symbol.",
                line,
                column,
            ));
        }

        Ok(Rc::new(Node::Symbol {
            id: buffer,
            line,
            column,
        }))
    }

    fn parse_statement_symbol(&mut self) -> Result<Rc<Node>, Error> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let buffer = self.read_symbol("Missing symbol or definition.", line, column)?;

        if buffer == "->" {
            let symbol = self.parse_symbol()?;
            let Node::Symbol { id, .. } = symbol.as_ref() else {
                unreachable!();
            };

            return Ok(Rc::new(Node::Definition {
                id: id.clone(),
                line,
                column,
            }));
        }

        Ok(Rc::new(Node::Symbol {
            id: buffer,
            line,
            column,
        }))
    }

    fn read_symbol(&mut self, message: &str, line: i32, column: i32) -> Result<String, Error> {
        let mut buffer = String::new();

        if !self.peek_pred(is_symbol_char) {
            return Err(self.unexpected_input(message, line, column));
        }

        loop {
            buffer.push(self.read());
            if !self.peek_pred(is_symbol_char) {
                break;
            }
        }

        Ok(buffer)
    }

    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn read(&mut self) -> char {
        let result = self.chars[self.pos];

        self.pos += 1;
        if result == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        result
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_is(&self, expected: char) -> bool {
        !self.eof() && self.peek() == expected
    }

    fn peek_pred(&self, callback: fn(char) -> bool) -> bool {
        !self.eof() && callback(self.peek())
    }

    fn peek_read(&mut self, expected: char) -> bool {
        if self.peek_is(expected) {
            self.read();

            return true;
        }

        false
    }

    fn skip_whitespace(&mut self) {
        while !self.eof() {
            // Line comments run to the end of the line.
            if self.peek_read('#') {
                while !self.eof() {
                    if self.peek_read('\n') || self.peek_read('\r') {
                        break;
                    }
                    self.read();
                }
            } else if !self.peek_pred(char::is_whitespace) {
                return;
            } else {
                self.read();
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::with_position(ErrorKind::Syntax, message, self.line, self.column)
    }

    fn unexpected_input(&self, message: &str, line: i32, column: i32) -> Error {
        Error::with_position(
            ErrorKind::Syntax,
            format!(
                "Unexpected {}; {message}",
                if self.eof() { "end of input" } else { "input" }
            ),
            line,
            column,
        )
    }
}

/// Maintains the REPL's bracket balance: pushes expected closing delimiters
/// for each `(` and `[` on the line and pops them on the matching closer.
/// An unterminated string literal stays on the stack as its separator, so
/// the scanner shares the parser's notion of being inside a string and
/// delimiters within one do not count. Comments are not scanned.
pub fn scan_open_delimiters(line: &str, open: &mut Vec<char>) {
    let chars: Vec<char> = line.chars().collect();
    let length = chars.len();
    let mut i = 0;

    while i < length {
        let c = chars[i];

        match open.last().copied() {
            Some(separator) if separator == '"' || separator == '\'' => {
                if c == separator {
                    open.pop();
                } else if c == '\\' {
                    i += 1;
                }
            }
            _ => match c {
                '#' => return,
                '(' => open.push(')'),
                '[' => open.push(']'),
                ')' | ']' => {
                    if open.last() == Some(&c) {
                        open.pop();
                    }
                }
                '"' | '\'' => open.push(c),
                _ => {}
            },
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_of(input: &str) -> String {
        parse(input, 1).unwrap().to_source()
    }

    #[test]
    fn parses_literals_and_symbols() {
        assert_eq!(source_of("1 2 + ."), "(1 2 + .)");
        assert_eq!(source_of("\"hello\" 'world'"), "(\"hello\" \"world\")");
    }

    #[test]
    fn parses_nested_quotes() {
        assert_eq!(source_of("((1) (2))"), "(((1) (2)))");
    }

    #[test]
    fn parses_vector_literals() {
        assert_eq!(source_of("[1, 2, 3]"), "([1, 2, 3])");
        assert_eq!(source_of("[]"), "([])");
        assert_eq!(source_of("[[1, 2], [3]]"), "([[1, 2], [3]])");
    }

    #[test]
    fn parses_record_literals() {
        assert_eq!(
            source_of("{\"a\": 1, \"b\": [true]}"),
            "({\"a\": 1, \"b\": [true]})"
        );
        assert_eq!(source_of("{}"), "({})");
    }

    #[test]
    fn parses_definitions() {
        assert_eq!(source_of("5 -> x"), "(5 -> x)");
    }

    #[test]
    fn lone_arrow_is_a_syntax_error() {
        let error = parse("->", 1).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn unterminated_vector_cites_the_missing_bracket() {
        let error = parse("[", 1).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert!(error.message().contains("]"));
    }

    #[test]
    fn unterminated_quote_cites_the_missing_paren() {
        let error = parse("(1 2", 1).unwrap_err();

        assert!(error.message().contains(")"));
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        assert!(parse("\"abc", 1).is_err());
    }

    #[test]
    fn illegal_escape_is_a_syntax_error() {
        assert!(parse("\"\\q\"", 1).is_err());
        assert!(parse("\"\\u12G4\"", 1).is_err());
    }

    #[test]
    fn escape_sequences_decode() {
        let quote = parse("\"a\\tb\\u0041\\n\"", 1).unwrap();

        assert_eq!(quote.to_source(), "(\"a\\tbA\\n\")");
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(source_of("1 # one\n2"), "(1 2)");
        assert_eq!(source_of("# nothing but comment"), "()");
    }

    #[test]
    fn positions_are_tracked_across_lines() {
        let error = parse("1 2\n   [", 1).unwrap_err();

        assert_eq!(error.line(), 2);
        assert_eq!(error.column(), 4);
    }

    #[test]
    fn scanner_tracks_bracket_balance() {
        let mut open = Vec::new();

        scan_open_delimiters("(1 [2", &mut open);
        assert_eq!(open, vec![')', ']']);

        scan_open_delimiters("3] 4)", &mut open);
        assert!(open.is_empty());
    }

    #[test]
    fn scanner_ignores_brackets_inside_strings_and_comments() {
        let mut open = Vec::new();

        scan_open_delimiters("\"(\" '[' # (", &mut open);
        assert!(open.is_empty());

        scan_open_delimiters("\"\\\"(\"", &mut open);
        assert!(open.is_empty());
    }

    #[test]
    fn scanner_carries_string_state_across_lines() {
        let mut open = Vec::new();

        scan_open_delimiters("\"abc", &mut open);
        assert_eq!(open, vec!['"']);

        // Brackets inside the still-open string do not count.
        scan_open_delimiters("([", &mut open);
        assert_eq!(open, vec!['"']);

        scan_open_delimiters("def\"", &mut open);
        assert!(open.is_empty());
    }
}

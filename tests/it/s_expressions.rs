//! A small recursive-descent parser for s-expressions, lexed with `m_lexer` and driven by a [`LookaheadBuffer`] over
//! the token stream. Lists are only parsed if they are closed, which the parser finds out by looking ahead from a
//! marker and rewinding.

use std::vec;

use synrt::{
    Ast, AstBuilder, CommonPayload, CommonToken, IterSource, LookaheadBuffer, SyntaxKind, TextRange, TextSize, Token,
};

const L_PAREN: SyntaxKind = SyntaxKind(0);
const R_PAREN: SyntaxKind = SyntaxKind(1);
const WORD: SyntaxKind = SyntaxKind(2);
const WHITESPACE: SyntaxKind = SyntaxKind(3);
const ERROR: SyntaxKind = SyntaxKind(4);
const LIST: SyntaxKind = SyntaxKind(5);

/// Splits the input into tokens, dropping whitespace.
fn lex(text: &str) -> Vec<CommonToken> {
    fn tok(kind: SyntaxKind) -> m_lexer::TokenKind {
        m_lexer::TokenKind(kind.0 as u16)
    }

    let lexer = m_lexer::LexerBuilder::new()
        .error_token(tok(ERROR))
        .tokens(&[
            (tok(L_PAREN), r"\("),
            (tok(R_PAREN), r"\)"),
            (tok(WORD), r"[^\s()]+"),
            (tok(WHITESPACE), r"\s+"),
        ])
        .build();

    let mut offset = TextSize::from(0);
    lexer
        .tokenize(text)
        .into_iter()
        .filter_map(|token| {
            let range = TextRange::at(offset, TextSize::from(token.len as u32));
            offset = range.end();
            let kind = SyntaxKind::from(token.kind.0);
            if kind == WHITESPACE {
                return None;
            }
            Some(CommonToken::new(kind, &text[range], range.start()))
        })
        .collect()
}

struct Parser {
    input:   LookaheadBuffer<IterSource<vec::IntoIter<CommonToken>>>,
    builder: AstBuilder,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            input:   LookaheadBuffer::new(IterSource::new(lex(text))),
            builder: AstBuilder::new(),
        }
    }

    fn la(&mut self, i: usize) -> Option<CommonToken> {
        match self.input.la(i) {
            Ok(token) => token,
            Err(never) => match never {},
        }
    }

    fn la_kind(&mut self, i: usize) -> Option<SyntaxKind> {
        self.la(i).map(|token| token.kind())
    }

    fn parse(mut self) -> (Option<Ast>, usize) {
        while self.la(1).is_some() {
            self.sexp();
        }
        (self.builder.finish(), self.input.index())
    }

    fn sexp(&mut self) {
        let token = match self.la(1) {
            Some(token) => token,
            None => return,
        };
        if token.kind() == L_PAREN && self.list_is_closed() {
            self.list();
            return;
        }
        let kind = if token.kind() == WORD { WORD } else { ERROR };
        self.builder.token(CommonPayload::new(kind, token.text()));
        self.input.consume();
    }

    /// Whether the list starting at the next token has a matching closing parenthesis.
    fn list_is_closed(&mut self) -> bool {
        let marker = self.input.mark();
        let mut depth = 0usize;
        let closed = loop {
            match self.la_kind(1) {
                Some(kind) if kind == L_PAREN => depth += 1,
                Some(kind) if kind == R_PAREN => {
                    depth -= 1;
                    if depth == 0 {
                        break true;
                    }
                }
                Some(_) => {}
                None => break false,
            }
            self.input.consume();
        };
        self.input.rewind(marker);
        closed
    }

    fn list(&mut self) {
        self.builder.start_node(CommonPayload::new(LIST, "list"));
        self.input.consume();
        while let Some(kind) = self.la_kind(1) {
            if kind == R_PAREN {
                break;
            }
            self.sexp();
        }
        self.input.consume();
        self.builder.finish_node();
    }
}

fn parse(text: &str) -> Ast {
    let (tree, _) = Parser::new(text).parse();
    tree.unwrap()
}

#[test]
fn lexer_ranges() {
    let tokens = lex("(+ 12 x)");
    let texts: Vec<_> = tokens.iter().map(|token| token.text()).collect();
    assert_eq!(texts, ["(", "+", "12", "x", ")"]);
    assert_eq!(tokens[2].text_range(), TextRange::new(TextSize::from(3), TextSize::from(5)));
}

#[test]
fn nested_lists() {
    let (tree, consumed) = Parser::new("(+ 1 (* 2 3)) x").parse();
    let tree = tree.unwrap();
    assert_eq!(tree.to_string_list(), " ( list + 1 ( list * 2 3 ) ) x");
    assert_eq!(consumed, 10);
}

#[test]
fn unclosed_lists_become_errors() {
    let tree = parse("(a (b");
    let kinds: Vec<_> = tree.siblings().map(|node| node.kind()).collect();
    assert_eq!(kinds, [ERROR, WORD, ERROR, WORD]);
    assert_eq!(tree.to_string_list(), " ( a ( b");
}

#[test]
fn stray_closing_paren() {
    let tree = parse("a ) (b)");
    let kinds: Vec<_> = tree.siblings().map(|node| node.kind()).collect();
    assert_eq!(kinds, [WORD, ERROR, LIST]);
}

#[test]
fn search_parsed_tree() {
    let tree = parse("(+ 1 (* 2 3)) (f (g))");

    // a list of three words
    let pattern: Ast = Ast::create(LIST, "");
    for _ in 0..3 {
        pattern.add_child(Ast::create(WORD, ""));
    }
    let found = tree.find_all(Some(&pattern));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].upgrade().unwrap().to_string_tree(), " ( list * 2 3 )");

    // lists that start with a word and a list, whatever else follows
    let pattern: Ast = Ast::create(LIST, "");
    pattern.add_child(Ast::create(WORD, ""));
    pattern.add_child(Ast::create(LIST, ""));
    assert!(tree.find_all(Some(&pattern)).is_empty());
    let found: Vec<_> = tree
        .find_all_partial(Some(&pattern))
        .iter()
        .map(|weak| weak.upgrade().unwrap().to_string_tree())
        .collect();
    assert_eq!(found, [" ( list f ( list g ) )"]);
}

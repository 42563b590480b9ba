use super::{Lexer, Token, TokenKind};


macro_rules! tokens {
    ($(($start:expr, $end:expr, $source:expr) => $token_kind:expr),* $(,)?) => {
       vec![$(Token {kind: $token_kind, source: $source.into(), pos: ($start, $end) }),*]
    };
}

#[test]
fn rule_with_alternatives() {
    use TokenKind::*;

    let tokens = Lexer::new("S -> a B | #c").collect::<Vec<_>>();

    assert_eq!(
        tokens,
        tokens![
            (0, 1, "S") => Nonterminal,
            (2, 4, "->") => Arrow,
            (5, 6, "a") => TerminalOrRegex,
            (7, 8, "B") => Nonterminal,
            (9, 10, "|") => Or,
            (11, 13, "#c") => Nonterminal,
            (13, 13, "") => EndOfStream,
        ]
    );
}

#[test]
fn regex_fragments() {
    use TokenKind::*;

    let tokens = Lexer::new("Expr ->\t[0-9]+(\\.[0-9]*)?\n  | (a|b)* Expr").collect::<Vec<_>>();

    assert_eq!(
        tokens,
        tokens![
            (0, 4, "Expr") => Nonterminal,
            (5, 7, "->") => Arrow,
            (8, 25, "[0-9]+(\\.[0-9]*)?") => TerminalOrRegex,
            (28, 29, "|") => Or,
            (30, 36, "(a|b)*") => TerminalOrRegex,
            (37, 41, "Expr") => Nonterminal,
            (41, 41, "") => EndOfStream,
        ]
    );
}

#[test]
fn no_whitespace_needed_around_control_tokens() {
    use TokenKind::*;

    // a nonterminal swallows everything up to the next whitespace
    let kinds = Lexer::new("|->|a").map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(kinds, vec![Or, Arrow, Or, TerminalOrRegex, EndOfStream]);

    let tokens = Lexer::new("S->a").collect::<Vec<_>>();
    assert_eq!(tokens, tokens![(0, 4, "S->a") => Nonterminal, (4, 4, "") => EndOfStream]);
}

#[test]
fn empty_input() {
    let tokens = Lexer::new(" \n\t ").collect::<Vec<_>>();
    assert_eq!(tokens, tokens![(4, 4, "") => TokenKind::EndOfStream]);

    let mut lexer = Lexer::new("");
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::EndOfStream));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn error_stops_the_stream() {
    use TokenKind::*;

    let tokens = Lexer::new("S -> a - b c").collect::<Vec<_>>();

    assert_eq!(
        tokens,
        tokens![
            (0, 1, "S") => Nonterminal,
            (2, 4, "->") => Arrow,
            (5, 6, "a") => TerminalOrRegex,
            (7, 8, "-") => Error,
        ]
    );

    let last = tokens.last().map(Token::len);
    assert_eq!(last, Some(1));
}

#[test]
fn token_len() {
    let tokens = Lexer::new("Start -> abc").collect::<Vec<_>>();
    assert_eq!(
        tokens.iter().map(Token::len).collect::<Vec<_>>(),
        vec![5, 2, 3, 0]
    );
    assert!(tokens.last().is_some_and(Token::is_empty));
}

#[test]
fn unicode_terminals() {
    use TokenKind::*;

    let kinds = Lexer::new("S -> λ é Ω")
        .map(|t| (t.kind, t.source))
        .collect::<Vec<_>>();

    // `Ω` is not an ASCII uppercase letter, so it starts a terminal
    assert_eq!(
        kinds,
        vec![
            (Nonterminal, "S".to_owned()),
            (Arrow, "->".to_owned()),
            (TerminalOrRegex, "λ".to_owned()),
            (TerminalOrRegex, "é".to_owned()),
            (TerminalOrRegex, "Ω".to_owned()),
            (EndOfStream, String::new()),
        ]
    );
}

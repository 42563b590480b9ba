//! Parser for context-free grammars whose terminals may be regular expressions.
//!
//! Every terminal-or-regex fragment is compiled into a symbolic automaton by a caller supplied
//! function. Depending on the automaton the fragment vanishes (epsilon), becomes a single
//! terminal, or is embedded into the grammar as right-linear productions over fresh
//! nonterminals.
//!
//! # Notation
//!
//! ```text
//! S -> a S | b T -> c*
//! ```
//!
//! Nonterminals start with `#` or an uppercase letter, anything else that is not `-`, `|` or
//! whitespace starts a terminal or regex. `|` separates alternatives and a second `->` after a
//! nonterminal makes that nonterminal the head of the next rule.

pub use embed::AutomatonEmbedder;
pub use grammar::{ContextFreeGrammar, Production};
pub use lexer::{error::LexError, Lexer, Token, TokenKind};
pub use parser::{parse, GrammarParser, ParseError, SyntaxError};
pub use resolver::SymbolResolver;
pub use symbol::{GrammarSymbol, Nonterminal, Terminal};
pub use symgram_automata as automata;

mod embed;
mod grammar;
mod lexer;
mod parser;
mod resolver;
mod symbol;

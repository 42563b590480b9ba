use std::collections::BTreeSet;

use symgram_parser::{
    automata::{Sfa, SfaError},
    parse, ParseError,
};

/// Set of characters a single move accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Class(BTreeSet<char>);

#[derive(Debug, thiserror::Error)]
enum FragmentError {
    #[error("unterminated character class in `{0}`")]
    Unterminated(String),
    #[error(transparent)]
    Sfa(#[from] SfaError),
}

/// Compiles fragments made of literal characters and `[...]` classes, each optionally followed
/// by `*` or `+`. `()` is the empty word.
fn compile(fragment: &str) -> Result<Sfa<Option<Class>>, FragmentError> {
    if fragment == "()" {
        return Ok(Sfa::epsilon());
    }

    let mut builder = Sfa::builder(false);
    let mut current = 0;
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        let class = if c == '[' {
            let mut members = BTreeSet::new();
            loop {
                match chars.next() {
                    Some(']') => break,
                    Some(member) => {
                        members.insert(member);
                    }
                    None => return Err(FragmentError::Unterminated(fragment.to_owned())),
                }
            }
            Class(members)
        } else {
            Class(BTreeSet::from([c]))
        };

        match chars.next_if(|&c| c == '*' || c == '+') {
            Some('*') => builder.add_move(current, current, Some(class)),
            Some(_) => {
                let next = builder.add_state(false);
                builder.add_move(current, next, Some(class.clone()));
                builder.add_move(next, next, Some(class));
                current = next;
            }
            None => {
                let next = builder.add_state(false);
                builder.add_move(current, next, Some(class));
                current = next;
            }
        }
    }
    builder.set_final(current);

    Ok(builder.build()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = parse(
        "Stmt -> let Ident = [01]+ ; | () Ident -> [abc][abc01]*",
        |fragment: &str| compile(fragment),
    )?;

    println!("start: {}", grammar.start());
    println!("{grammar}");

    match parse("S -> [ab", |fragment: &str| compile(fragment)) {
        Err(ParseError::Regex(err)) => println!("{err}"),
        other => println!("{other:?}"),
    }

    Ok(())
}

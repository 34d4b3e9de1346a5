mod error;
mod opt;
pub mod par;
mod query;
mod read;
mod scope;
pub mod seq;
mod stage;

pub use error::Error;
pub use opt::Opt;
pub use query::Query;
pub use read::read;
pub use scope::{ScopeError, Symbol, Symbols};
pub use stage::Stage;

use cora_parse::{Command, Parser};

/// Commands of an owned source text, parsed on demand.
///
/// After an error, parsing resumes after the next period.
pub struct Commands {
    src: String,
    offset: usize,
}

impl Iterator for Commands {
    type Item = Result<Command, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.offset;
        let mut parser = Parser::new(self.src.get(base..)?);
        let cmd = parser.command();
        if cmd.is_err() {
            parser.skip_command();
        }
        self.offset = base + parser.offset();
        match cmd {
            Ok(cmd) => cmd.map(Ok),
            Err(mut e) => {
                e.offset += base;
                Some(Err(Error::Parse(e)))
            }
        }
    }
}

/// Lazily parse the commands of a source text.
pub fn parse(src: String, opt: &Opt) -> Commands {
    let mut offset = 0;
    if opt.omits(Stage::Parse) {
        log::info!("Read {} tokens", cora_parse::lex(&src).count());
        offset = src.len();
    }
    Commands { src, offset }
}

/// Flatten an iterator of results of iterators of results into an iterator of results.
///
/// Source: <https://www.reddit.com/r/rust/comments/9u6846/rust_puzzle_flatten_a_nested_iterator_of_results>
pub fn flatten_nested_results<O, I, T, E>(outer: O) -> impl Iterator<Item = Result<T, E>>
where
    O: Iterator<Item = Result<I, E>>,
    I: Iterator<Item = Result<T, E>>,
{
    outer.flat_map(|inner_result| {
        let (v, r) = match inner_result {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(Err(e))),
        };
        v.into_iter().flatten().chain(r)
    })
}

/// A scoped command, ready to be answered.
pub struct Job {
    echo: Option<String>,
    query: Option<Query>,
}

impl Job {
    /// Scope a command, recording its declarations in the symbols.
    pub fn new(cmd: Command, syms: &mut Symbols, opt: &Opt) -> Result<Self, Error> {
        let echo = opt.echo.then(|| cmd.to_string());
        let query = syms.scope(cmd)?;
        Ok(Self { echo, query })
    }

    /// Answer the query of the command, yielding the lines to output.
    pub fn run(self) -> Result<Vec<String>, Error> {
        let mut lines: Vec<_> = self.echo.into_iter().collect();
        if let Some(query) = self.query {
            lines.extend(query.answer()?);
        }
        Ok(lines)
    }
}

#[cfg(test)]
const SAMPLE: &str = r#"
f : o -> o -> o.
g : o -> o.
a : o.
b : o.
var X : o.
var Y : o.
meta Z : [o] -> o.
match f(X, b) with f(a, b).
match f(X, X) with f(a, b).
unify f(X, a) with f(b, Y).
unify f(X, a) with f(b, X).
alpha \x : o => g(x) with \y : o => g(y).
subst Z[a] [Z := \x : o => f(x, x)].
positions g(a).
"#;

#[cfg(test)]
fn consume_str(src: &str, args: &[&str], parallel: bool) -> (Vec<String>, Result<(), Error>) {
    let opt = <Opt as clap::Parser>::parse_from(["coramatch", "-"].iter().chain(args));
    let cmds = parse(src.to_string(), &opt);
    let mut out = Vec::new();
    let result = if parallel {
        par::consume(cmds, &opt, &mut out)
    } else {
        seq::consume(cmds, &opt, &mut out)
    };
    let out = String::from_utf8(out).unwrap();
    (out.lines().map(String::from).collect(), result)
}

#[test]
fn lazy_parse() {
    let opt = <Opt as clap::Parser>::parse_from(["coramatch", "-"]);
    let src = "a : o. var X o. \n b : o.".to_string();
    let mut cmds = parse(src, &opt);
    assert!(matches!(cmds.next(), Some(Ok(Command::Const(..)))));
    assert_eq!(cmds.offset, 7);
    match cmds.next() {
        Some(Err(Error::Parse(e))) => assert_eq!(e.offset, 13),
        _ => panic!("expected parse error"),
    }
    assert!(matches!(cmds.next(), Some(Ok(Command::Const(..)))));
    assert!(cmds.next().is_none());
}

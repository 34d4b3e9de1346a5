use crate::parse::{Error, Parser};
use crate::Command;

/// Iterator over the commands of a string.
///
/// After an error, parsing resumes after the next period.
pub struct CmdIter<'s> {
    parser: Parser<'s>,
}

impl<'s> CmdIter<'s> {
    pub fn new(s: &'s str) -> Self {
        Self {
            parser: Parser::new(s),
        }
    }
}

impl<'s> Iterator for CmdIter<'s> {
    type Item = Result<Command, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.parser.command() {
            Ok(cmd) => cmd.map(Ok),
            Err(e) => {
                self.parser.skip_command();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
use crate::parse::ErrorKind;
#[cfg(test)]
use alloc::vec::Vec;
#[cfg(test)]
use alloc::string::ToString;

#[cfg(test)]
fn parse_str(s: &str) -> Vec<Result<Command, Error>> {
    CmdIter::new(s).collect()
}

#[test]
fn positive() {
    let cmds = r#"
    (; declarations ;)
    f : o -> o -> o.
    var X : o.
    meta Z : [o, o] -> o.
    meta W : [] -> o.
    meta V : o.
    (; queries ;)
    match f(X, Z[X, a]) with f(a, a).
    unify f(X, a) with f(b, Y).
    alpha \x : o => x with \y : o => y.
    subst Z[a, b] [X := a, Z := \x : o => \y : o => f(y, x)].
    positions f(g(a), 1).
    "#;
    let cmds: Result<Vec<_>, _> = parse_str(cmds).into_iter().collect();
    let cmds = cmds.unwrap();
    assert_eq!(cmds.len(), 10);
    assert_eq!(cmds.iter().filter(|c| c.is_declaration()).count(), 5);
    assert!(matches!(&cmds[3], Command::Meta(_, inputs, _) if inputs.is_empty()));
    assert!(matches!(&cmds[8], Command::Subst(_, subst) if subst.len() == 2));
    for cmd in cmds {
        let reparsed = parse_str(&cmd.to_string());
        assert_eq!(reparsed, [Ok(cmd)]);
    }
}

#[test]
fn negative() {
    let cmds = parse_str("var X o. match a b. unify a with b. positions .");
    let kinds: Vec<_> = cmds
        .iter()
        .map(|c| c.as_ref().map_err(|e| e.kind.clone()))
        .collect();
    assert_eq!(kinds[0], Err(ErrorKind::ExpectedColon));
    assert_eq!(cmds[0].as_ref().unwrap_err().offset, 6);
    assert_eq!(kinds[1], Err(ErrorKind::ExpectedWith));
    assert!(kinds[2].is_ok());
    assert_eq!(kinds[3], Err(ErrorKind::ExpectedTerm));
    assert_eq!(kinds.len(), 4);
}

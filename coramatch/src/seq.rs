//! Sequential command processing.

use crate::{Error, Job, Opt, Stage, Symbols};
use cora_parse::Command;
use std::io::Write;

/// Answer commands one by one, writing answers as soon as they are known.
pub fn consume<I, W>(iter: I, opt: &Opt, out: &mut W) -> Result<(), Error>
where
    I: Iterator<Item = Result<Command, Error>>,
    W: Write,
{
    let mut syms = Symbols::new();

    // run as long as we receive commands, and abort on error
    let mut jobs = iter
        .filter(|cmd| !opt.omits(Stage::Scope) || cmd.is_err())
        .map(|cmd| Job::new(cmd?, &mut syms, opt));

    jobs.try_for_each(|job| {
        for line in job?.run()? {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    })
}

#[test]
fn answers() {
    let (lines, result) = crate::consume_str(crate::SAMPLE, &[], false);
    assert!(result.is_ok());
    assert_eq!(lines[0], "[X := a]");
    assert!(lines[1].starts_with("no match: "));
    assert_eq!(lines[2], "[X := b, Y := a]");
    assert_eq!(lines[3], "no unifier");
    assert_eq!(lines[4], "true");
    assert_eq!(lines[5], "f(a, a)");
    assert_eq!(lines[6..], ["1.ε: a", "ε: g(a)"]);
    assert_eq!(lines.len(), 8);
}

#[test]
fn echo() {
    let (lines, result) = crate::consume_str("a : o. alpha a with a.", &["--echo"], false);
    assert!(result.is_ok());
    assert_eq!(lines, ["a : o.", "alpha a with a.", "true"]);
}

#[test]
fn omit() {
    let (lines, result) = crate::consume_str(crate::SAMPLE, &["--omit", "scope"], false);
    assert!(result.is_ok());
    assert!(lines.is_empty());

    // undeclared names are not detected without scoping
    let (_, result) = crate::consume_str("alpha a with b.", &["--omit", "scope"], false);
    assert!(result.is_ok());
}

#[test]
fn abort() {
    let src = "a : o. var X : o. meta Z : [o] -> o. alpha a with a. match Z[X] with a. alpha a with a.";
    let (lines, result) = crate::consume_str(src, &[], false);
    assert_eq!(lines, ["true"]);
    assert!(matches!(result, Err(Error::Cora(cora::Error::Pattern(_)))));

    let (_, result) = crate::consume_str("alpha a with a.", &[], false);
    assert!(matches!(result, Err(Error::Scope(_))));
    let (_, result) = crate::consume_str("alpha a with.", &[], false);
    assert!(matches!(result, Err(Error::Parse(_))));
}

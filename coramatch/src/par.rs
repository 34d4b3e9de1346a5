//! Parallel command processing.

use crate::{Error, Job, Opt, Stage, Symbols};
use cora_parse::Command;
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::io::Write;

fn answer((i, job): (usize, Result<Job, Error>)) -> Result<(usize, Vec<String>), Error> {
    Ok((i, job?.run()?))
}

/// Scope commands sequentially, answer them in parallel,
/// and write the answers in the order of the commands.
pub fn consume<I, W>(iter: I, opt: &Opt, out: &mut W) -> Result<(), Error>
where
    I: Iterator<Item = Result<Command, Error>> + Send,
    W: Write,
{
    let mut syms = Symbols::new();

    let jobs = iter
        .filter(|cmd| !opt.omits(Stage::Scope) || cmd.is_err())
        .map(|cmd| Job::new(cmd?, &mut syms, opt))
        .enumerate();

    let answers: Result<Vec<_>, Error> = jobs.par_bridge().map(answer).collect();
    let mut answers = answers?;
    answers.sort_unstable_by_key(|(i, _)| *i);

    for line in answers.into_iter().flat_map(|(_, lines)| lines) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[test]
fn order() {
    let (par, result) = crate::consume_str(crate::SAMPLE, &["--echo"], true);
    assert!(result.is_ok());
    let (seq, _) = crate::consume_str(crate::SAMPLE, &["--echo"], false);
    assert_eq!(par, seq);
}

#[test]
fn abort() {
    let src = "a : o. b : o. var X : o. meta Z : [o] -> o. match Z[X] with a. alpha a with b.";
    let (lines, result) = crate::consume_str(src, &[], true);
    assert!(lines.is_empty());
    assert!(matches!(result, Err(Error::Cora(cora::Error::Pattern(_)))));
}

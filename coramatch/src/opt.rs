use crate::Stage;
use clap::Parser;
use std::path::PathBuf;

/// Answer matching and unification queries over higher-order terms
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Opt {
    /// Print every command before its answer
    #[arg(long)]
    pub echo: bool,

    /// Perform only operations until (excluding) the given stage.
    ///
    /// Possible values are: parse, scope.
    #[arg(long)]
    pub omit: Option<Stage>,

    /// Parse given number of commands in advance (∞ if argument omitted)
    ///
    /// If this option is used, commands are parsed and answered simultaneously.
    /// If this option is given with a number n, then
    /// maximally n commands are parsed in advance.
    /// If this option is given without an extra argument, then
    /// the number of commands parsed in advance is unbounded.
    #[arg(long, short = 'c')]
    pub channel_capacity: Option<Option<usize>>,

    /// Answer queries concurrently
    ///
    /// If this option is used, queries are answered in parallel,
    /// and answers are printed in the order of the queries.
    /// If this option is given with a number n, then
    /// maximally n queries are concurrently answered.
    /// If this option is given without an extra argument, then
    /// the number of concurrent tasks is
    /// determined automatically from the number of CPUs.
    ///
    /// This option enables the parsing of commands in advance ("-c"),
    /// by default with an unbounded capacity.
    #[arg(long, short = 'j')]
    pub jobs: Option<Option<usize>>,

    /// Files to process (cumulative)
    ///
    /// Declarations of one file remain visible in all following files.
    /// To read from standard input, use "-" as file name.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Opt {
    pub fn omits(&self, stage: Stage) -> bool {
        self.omit == Some(stage)
    }
}

#[test]
fn flags() {
    let opt = Opt::parse_from(["coramatch", "-j", "--omit", "scope", "a.cora", "-"]);
    assert_eq!(opt.jobs, Some(None));
    assert_eq!(opt.channel_capacity, None);
    assert!(opt.omits(Stage::Scope));
    assert_eq!(opt.files.len(), 2);

    let opt = Opt::parse_from(["coramatch", "-c", "16", "--echo", "-"]);
    assert_eq!(opt.channel_capacity, Some(Some(16)));
    assert!(opt.echo);
    assert!(Opt::try_parse_from(["coramatch", "--omit", "share", "-"]).is_err());
}

/// A stage in the processing of commands.
///
/// This is useful to omit certain parts of command processing.
/// Omitting one stage also omits all stages after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Parsing (only reading and lexing remains)
    Parse,
    /// Scoping and answering of queries
    Scope,
}

impl core::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(Self::Parse),
            "scope" => Ok(Self::Scope),
            _ => Err("unknown stage: ".to_owned() + s),
        }
    }
}

use std::fmt;
use std::path::PathBuf;

pub const HELP: &str = "\
statements:
  map <va>                              fault <va>'s page in
  access <va>                           touch <va>'s page
  translate <va> [read|write] [user|supervisor]
  pte <pte> <va>                        decode a raw entry
  split <va>                            show the table indices of <va>
  frames                                list the frame table
meta commands:
  .help  .policy  .load <file>  .exit";

#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Help,
    Policy,
    Load(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommandError {
    UnrecognizedCommand,
    MissingPath,
}

impl fmt::Display for MetaCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaCommandError::UnrecognizedCommand => write!(f, "unrecognized command"),
            MetaCommandError::MissingPath => write!(f, ".load needs a file name"),
        }
    }
}

pub fn prepare_meta_command(input: &str) -> Result<MetaCommand, MetaCommandError> {
    let mut words = input.split_whitespace();
    match words.next() {
        Some(".exit") => Ok(MetaCommand::Exit),
        Some(".help") => Ok(MetaCommand::Help),
        Some(".policy") => Ok(MetaCommand::Policy),
        Some(".load") => words
            .next()
            .map(|path| MetaCommand::Load(PathBuf::from(path)))
            .ok_or(MetaCommandError::MissingPath),
        _ => Err(MetaCommandError::UnrecognizedCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(prepare_meta_command(".exit"), Ok(MetaCommand::Exit));
        assert_eq!(prepare_meta_command(".policy"), Ok(MetaCommand::Policy));
        assert_eq!(
            prepare_meta_command(".load trace.txt"),
            Ok(MetaCommand::Load(PathBuf::from("trace.txt")))
        );
        assert_eq!(
            prepare_meta_command(".load"),
            Err(MetaCommandError::MissingPath)
        );
        assert_eq!(
            prepare_meta_command(".quit"),
            Err(MetaCommandError::UnrecognizedCommand)
        );
    }
}

use std::fmt;
use std::path::PathBuf;

use page_replacement::{Policy, UnknownPolicy};

/// Command line settings: `mmu-sim [fifo|clock] [trace-file]`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub policy: Policy,
    /// Statements to replay instead of reading stdin.
    pub trace: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownPolicy(UnknownPolicy),
    TooManyArguments,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPolicy(err) => write!(f, "{}", err),
            ConfigError::TooManyArguments => write!(f, "too many arguments"),
        }
    }
}

impl From<UnknownPolicy> for ConfigError {
    fn from(err: UnknownPolicy) -> Self {
        ConfigError::UnknownPolicy(err)
    }
}

impl Config {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, ConfigError> {
        let mut args = args.into_iter();
        let mut config = Config::default();
        if let Some(policy) = args.next() {
            config.policy = policy.parse()?;
        }
        config.trace = args.next().map(PathBuf::from);
        if args.next().is_some() {
            return Err(ConfigError::TooManyArguments);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_clock() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.policy, Policy::Clock);
        assert_eq!(config.trace, None);
    }

    #[test]
    fn policy_and_trace() {
        let config = Config::from_args(args(&["fifo", "trace.txt"])).unwrap();
        assert_eq!(config.policy, Policy::Fifo);
        assert_eq!(config.trace, Some(PathBuf::from("trace.txt")));
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            Config::from_args(args(&["lru"])),
            Err(ConfigError::UnknownPolicy(UnknownPolicy("lru".to_string())))
        );
        assert_eq!(
            Config::from_args(args(&["fifo", "a", "b"])),
            Err(ConfigError::TooManyArguments)
        );
    }

    #[test]
    fn error_messages() {
        let err = Config::from_args(args(&["lru"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown replacement policy 'lru'");
        assert_eq!(ConfigError::TooManyArguments.to_string(), "too many arguments");
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use page_replacement::Policy;

use crate::meta_commands::{prepare_meta_command, MetaCommand, HELP};
use crate::mmu::Mmu;
use crate::statements::{execute_statement, prepare_statement};

#[derive(Debug, PartialEq, Eq)]
pub enum Output {
    Lines(Vec<String>),
    Exit,
}

pub struct REPL {
    mmu: Mmu,
}

impl REPL {
    pub fn new(policy: Policy) -> Self {
        REPL {
            mmu: Mmu::new(policy),
        }
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn prompt(&self) -> Result<(), io::Error> {
        let mut stdout = io::stdout();
        write!(stdout, "mmu > ")?;
        stdout.flush()
    }

    /// `None` once stdin is closed.
    pub fn read_line(&self) -> Result<Option<String>, io::Error> {
        let mut buffer = String::new();
        let stdin = std::io::stdin();
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        let buffer = buffer.trim().to_string();
        Ok(Some(buffer))
    }

    /// Runs one line of input, either a meta command or a statement.
    pub fn run_line(&mut self, input: &str) -> Output {
        let input = input.trim();
        if input.is_empty() || input.starts_with('#') {
            return Output::Lines(vec![]);
        }
        if input.starts_with('.') {
            return match prepare_meta_command(input) {
                Ok(MetaCommand::Exit) => Output::Exit,
                Ok(MetaCommand::Help) => Output::Lines(vec![HELP.to_string()]),
                Ok(MetaCommand::Policy) => Output::Lines(vec![self.mmu.policy().to_string()]),
                Ok(MetaCommand::Load(path)) => match self.load(&path) {
                    Ok(output) => output,
                    Err(err) => Output::Lines(vec![format!(
                        "cannot read {}: {}",
                        path.display(),
                        err
                    )]),
                },
                Err(err) => Output::Lines(vec![format!("{} '{}'", err, input)]),
            };
        }
        match prepare_statement(input) {
            Ok(statement) => Output::Lines(vec![execute_statement(statement, &mut self.mmu)]),
            Err(err) => Output::Lines(vec![format!("error: {}", err)]),
        }
    }

    /// Replays a trace file line by line. Nested `.load` lines are skipped
    /// and `.exit` ends the replay early.
    pub fn load(&mut self, path: &Path) -> Result<Output, io::Error> {
        let trace = fs::read_to_string(path)?;
        log::info!("Replaying {}", path.display());
        let mut lines = Vec::new();
        for line in trace.lines() {
            if line.trim_start().starts_with(".load") {
                log::warn!("Skipping nested '{}'", line.trim());
                continue;
            }
            match self.run_line(line) {
                Output::Lines(output) => lines.extend(output),
                Output::Exit => break,
            }
        }
        Ok(Output::Lines(lines))
    }
}

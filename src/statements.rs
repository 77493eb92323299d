use std::fmt;

use page_walk::{pte_to_physical, Mode, Operation, PageWalk};

use crate::mmu::Mmu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Map(u64),
    Access(u64),
    Translate {
        virtual_address: u64,
        operation: Operation,
        mode: Mode,
    },
    Pte {
        pte: u64,
        virtual_address: u64,
    },
    Split(u64),
    Frames,
}

#[derive(Debug, PartialEq, Eq)]
pub enum StatementError {
    Empty,
    UnrecognizedStatement(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidOperation(String),
    InvalidMode(String),
    TooManyArguments,
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementError::Empty => write!(f, "empty statement"),
            StatementError::UnrecognizedStatement(s) => {
                write!(f, "unrecognized keyword at start of '{}'", s)
            }
            StatementError::MissingArgument(name) => write!(f, "missing argument <{}>", name),
            StatementError::InvalidNumber(s) => write!(f, "'{}' is not a number", s),
            StatementError::InvalidOperation(s) => {
                write!(f, "'{}' is not an operation (read|write)", s)
            }
            StatementError::InvalidMode(s) => write!(f, "'{}' is not a mode (user|supervisor)", s),
            StatementError::TooManyArguments => write!(f, "too many arguments"),
        }
    }
}

/// Parses a decimal or `0x` prefixed hexadecimal number. `_` separators are allowed.
pub fn parse_number(input: &str) -> Result<u64, StatementError> {
    let digits = input.replace('_', "");
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|_| StatementError::InvalidNumber(input.to_string()))
}

fn parse_operation(input: &str) -> Result<Operation, StatementError> {
    match input {
        "read" | "r" => Ok(Operation::Read),
        "write" | "w" => Ok(Operation::Write),
        _ => Err(StatementError::InvalidOperation(input.to_string())),
    }
}

fn parse_mode(input: &str) -> Result<Mode, StatementError> {
    match input {
        "user" | "u" => Ok(Mode::User),
        "supervisor" | "s" => Ok(Mode::Supervisor),
        _ => Err(StatementError::InvalidMode(input.to_string())),
    }
}

pub fn prepare_statement(input: &str) -> Result<Statement, StatementError> {
    let mut words = input.split_whitespace();
    let keyword = words.next().ok_or(StatementError::Empty)?;
    let mut number = |name| {
        words
            .next()
            .ok_or(StatementError::MissingArgument(name))
            .and_then(parse_number)
    };

    let statement = match keyword {
        "map" => Statement::Map(number("address")?),
        "access" => Statement::Access(number("address")?),
        "split" => Statement::Split(number("address")?),
        "pte" => {
            let pte = number("pte")?;
            Statement::Pte {
                pte,
                virtual_address: number("address")?,
            }
        }
        "translate" => {
            let virtual_address = number("address")?;
            let operation = words
                .next()
                .map(parse_operation)
                .transpose()?
                .unwrap_or(Operation::Read);
            let mode = words
                .next()
                .map(parse_mode)
                .transpose()?
                .unwrap_or(Mode::User);
            Statement::Translate {
                virtual_address,
                operation,
                mode,
            }
        }
        "frames" => Statement::Frames,
        _ => return Err(StatementError::UnrecognizedStatement(input.to_string())),
    };

    if words.next().is_some() {
        return Err(StatementError::TooManyArguments);
    }
    Ok(statement)
}

fn describe_frames(mmu: &Mmu) -> String {
    let table = mmu.frames();
    let mut out = format!(
        "policy={} resident={}/{} full={}",
        mmu.policy(),
        table.len(),
        table.capacity(),
        table.is_full()
    );
    for (slot, frame) in table.frames().iter().enumerate() {
        let mut marks = String::new();
        if slot == table.first() {
            marks.push_str(" <first");
        }
        if slot == table.last() {
            marks.push_str(" <last");
        }
        if frame.is_empty() {
            out.push_str(&format!("\n[{}] -{}", slot, marks));
        } else {
            out.push_str(&format!(
                "\n[{}] {:#x} ref={}{}",
                slot, frame.virtual_address, frame.referenced as u8, marks
            ));
        }
    }
    out
}

/// Runs a statement against `mmu` and returns what should be printed.
pub fn execute_statement(statement: Statement, mmu: &mut Mmu) -> String {
    match statement {
        Statement::Map(virtual_address) => {
            mmu.map(virtual_address);
            format!("mapped {:#x}", virtual_address)
        }
        Statement::Access(virtual_address) => {
            mmu.access(virtual_address);
            format!("accessed {:#x}", virtual_address)
        }
        Statement::Translate {
            virtual_address,
            operation,
            mode,
        } => match mmu.translate(virtual_address, operation, mode) {
            Ok(physical) => format!("{:#x} -> {:#x}", virtual_address, physical),
            Err(err) => format!("{:#x} -> {}", virtual_address, err),
        },
        Statement::Pte {
            pte,
            virtual_address,
        } => match pte_to_physical(pte, virtual_address) {
            Ok(physical) => format!("{:#x}", physical),
            Err(err) => err.to_string(),
        },
        Statement::Split(virtual_address) => PageWalk::from_raw(virtual_address).to_string(),
        Statement::Frames => describe_frames(mmu),
    }
}

//! The arithmetic operation selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CalcError;

/// Closed set of arithmetic operations.
///
/// `Unspecified` is the wire default (code 0) and is always rejected by the
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Unspecified,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations that the calculator can actually perform.
    pub const SUPPORTED: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Numeric wire code, matching the protobuf enum.
    pub fn code(self) -> i32 {
        match self {
            Operation::Unspecified => 0,
            Operation::Add => 1,
            Operation::Subtract => 2,
            Operation::Multiply => 3,
            Operation::Divide => 4,
        }
    }

    /// Look up an operation by wire code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Operation::Unspecified),
            1 => Some(Operation::Add),
            2 => Some(Operation::Subtract),
            3 => Some(Operation::Multiply),
            4 => Some(Operation::Divide),
            _ => None,
        }
    }

    /// Protobuf enum value name, e.g. `OPERATION_ADD`.
    pub fn proto_name(self) -> &'static str {
        match self {
            Operation::Unspecified => "OPERATION_UNSPECIFIED",
            Operation::Add => "OPERATION_ADD",
            Operation::Subtract => "OPERATION_SUBTRACT",
            Operation::Multiply => "OPERATION_MULTIPLY",
            Operation::Divide => "OPERATION_DIVIDE",
        }
    }

    /// Short lowercase label, used for logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Unspecified => "unspecified",
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Infix symbol for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Unspecified => "?",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    /// Parse a symbol (`+`), a word (`add`, `sub`), or a proto name
    /// (`OPERATION_ADD`). Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let op = match normalized.as_str() {
            "+" | "add" | "plus" | "operation_add" => Operation::Add,
            "-" | "sub" | "subtract" | "minus" | "operation_subtract" => Operation::Subtract,
            "*" | "x" | "mul" | "multiply" | "times" | "operation_multiply" => Operation::Multiply,
            "/" | "div" | "divide" | "operation_divide" => Operation::Divide,
            "operation_unspecified" | "unspecified" => Operation::Unspecified,
            _ => return Err(CalcError::UnsupportedOperation(s.to_string())),
        };
        Ok(op)
    }
}

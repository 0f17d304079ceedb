use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

pub const DIVISION_BY_ZERO: ErrorCode = ErrorCode {
    code: "E1008",
    title: "DIVISION BY ZERO",
};
pub const RADIX_OUT_OF_RANGE: ErrorCode = ErrorCode {
    code: "E1020",
    title: "RADIX OUT OF RANGE",
};
pub const NUMBER_FORMAT: ErrorCode = ErrorCode {
    code: "E1021",
    title: "NUMBER FORMAT",
};
pub const BLACK_HOLE: ErrorCode = ErrorCode {
    code: "E1030",
    title: "BLACK HOLE",
};
pub const EMPTY_MVAR: ErrorCode = ErrorCode {
    code: "E1031",
    title: "EMPTY MVAR",
};
pub const FULL_MVAR: ErrorCode = ErrorCode {
    code: "E1032",
    title: "FULL MVAR",
};
pub const WRONG_NUMBER_OF_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E1000",
    title: "WRONG NUMBER OF ARGUMENTS",
};
pub const RUNTIME_TYPE_ERROR: ErrorCode = ErrorCode {
    code: "E1004",
    title: "RUNTIME TYPE ERROR",
};
pub const USER_ERROR: ErrorCode = ErrorCode {
    code: "E1099",
    title: "USER ERROR",
};

/// Fatal conditions raised while forcing, applying, or computing.
///
/// None of these are recovered inside the runtime: they propagate out of
/// `force`/`apply` to whoever started the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("radix out of range: {0}")]
    RadixOutOfRange(u32),

    #[error("number format error: empty string")]
    EmptyNumber,

    #[error("number format error: interior \"-\" character")]
    InteriorMinus,

    #[error("number format error: invalid digit {digit:?} for radix {radix}")]
    InvalidDigit { digit: char, radix: u32 },

    /// A thunk was forced again while its own computation was running.
    #[error("infinite loop detected (black hole)")]
    BlackHole,

    #[error("attempted to take empty MVar")]
    EmptyMVar,

    #[error("attempted to put full MVar")]
    FullMVar,

    #[error("primop {name} expects {expected} arguments, got {got}")]
    PrimOpArity {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("primop {name} expected {expected}, got {got}")]
    PrimOpType {
        name: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// Raised by generated code through [`crate::runtime::die`].
    #[error("{0}")]
    User(String),
}

impl RuntimeError {
    /// Registry entry for this error, stable across releases.
    pub fn code(&self) -> &'static ErrorCode {
        match self {
            RuntimeError::DivisionByZero => &DIVISION_BY_ZERO,
            RuntimeError::RadixOutOfRange(_) => &RADIX_OUT_OF_RANGE,
            RuntimeError::EmptyNumber
            | RuntimeError::InteriorMinus
            | RuntimeError::InvalidDigit { .. } => &NUMBER_FORMAT,
            RuntimeError::BlackHole => &BLACK_HOLE,
            RuntimeError::EmptyMVar => &EMPTY_MVAR,
            RuntimeError::FullMVar => &FULL_MVAR,
            RuntimeError::PrimOpArity { .. } => &WRONG_NUMBER_OF_ARGUMENTS,
            RuntimeError::PrimOpType { .. } => &RUNTIME_TYPE_ERROR,
            RuntimeError::User(_) => &USER_ERROR,
        }
    }

    /// Renders `error[E1008]: DIVISION BY ZERO: division by zero`.
    pub fn render(&self) -> String {
        let code = self.code();
        format!("error[{}]: {}: {}", code.code, code.title, self)
    }
}

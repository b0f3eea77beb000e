use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,

    #[error("grid has no columns")]
    NoColumns,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, col {col}: unknown cell token '{token}'")]
    BadToken {
        row: usize,
        col: usize,
        token: String,
    },

    /// `clue` keeps the token as written, so oversized digit strings are
    /// reported verbatim.
    #[error("row {row}, col {col}: clue {clue} is outside 0..=8")]
    ClueOutOfRange {
        row: usize,
        col: usize,
        clue: String,
    },

    #[error("failed to access grid file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid cardinality: exactly {k} of {n} variables requested")]
    InvalidCardinality { k: usize, n: usize },

    #[error("clue {clue} at ({row}, {col}) is outside 0..=8")]
    ClueOutOfRange { row: usize, col: usize, clue: u8 },

    #[error("variable map covers {mapped} cells but grid has {cells}")]
    VarMapMismatch { mapped: usize, cells: usize },

    #[error("no variable assigned to cell ({row}, {col})")]
    MissingVariable { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("clause references variable {0} outside the declared variable list")]
    UndeclaredVariable(u32),

    #[error("variable {0} appears more than once in the variable order")]
    DuplicateVariable(u32),

    #[error("variable 0 is not a valid variable id")]
    ZeroVariable,

    #[error("{n} variables exceed the brute-force limit of {max}")]
    TooManyVariables { n: usize, max: usize },

    #[error("{backend} backend failed: {reason}")]
    BackendFailed {
        backend: &'static str,
        reason: String,
    },
}

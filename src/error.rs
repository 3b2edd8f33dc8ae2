use thiserror::Error;

/// 数据库访问层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Error {operation}: {message}")]
    Statement {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn connection(err: sqlx::Error) -> Self {
        Self::Connection(err.to_string())
    }

    pub fn statement(operation: &'static str, err: sqlx::Error) -> Self {
        Self::Statement {
            operation,
            message: err.to_string(),
        }
    }
}

/// 导入文件中无法解析的行 (行号从 1 开始)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: missing ':' separator in {content:?}")]
    MissingColon { line: usize, content: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::MissingColon { line, .. } => *line,
        }
    }
}

/// 保存前的本地校验，不会访问数据库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Word and Meaning are required!")]
    MissingWord,

    #[error("Word and Meaning are required!")]
    MissingMeaning,
}

/// 窗体操作可能返回的错误
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Please select a word first!")]
    NoSelection,
}

/// 批量导入错误; 格式错误的行不在此列
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

use thiserror::Error;

/// Recoverable problems with a single user-entered value.
///
/// These never abort scoring: the boundary replaces the value with `0`
/// and reports the issue as a notice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputIssue {
    #[error("principle {principle}: '{text}' is not a number, treated as 0")]
    InvalidNumeric { principle: u8, text: String },

    #[error("principle {principle}: negative value {value} reset to 0")]
    NegativeValue { principle: u8, value: f64 },
}

#[derive(Error, Debug)]
pub enum EsaiError {
    #[error("weights must sum to 1.00 (found {sum:.2})")]
    WeightSum { sum: f64 },

    #[error("missing weight value(s): {0}")]
    MissingWeight(String),

    #[error("weight {label}: '{text}' is not a number")]
    InvalidWeight { label: String, text: String },

    #[error("expected 8 weights, found {0}")]
    TooManyWeights(usize),

    #[error("weight {label} cannot be negative (found {value})")]
    NegativeWeight { label: String, value: f64 },

    #[error("unknown weight preset: {0} (expected 1-7)")]
    InvalidWeightPreset(u32),

    #[error("invalid principle id: {0} (expected 1-27)")]
    InvalidPrincipleId(String),

    #[error("principle {principle}: unknown option '{key}'")]
    UnknownOption { principle: u8, key: String },

    #[error("principle {principle}: option index {index} out of range")]
    OptionIndexOutOfRange { principle: u8, index: usize },

    #[error("principle {principle}: expected {expected} input")]
    WrongInputKind {
        principle: u8,
        expected: &'static str,
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, EsaiError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StencilError {
    #[error("not initialized: no {0} found (run 'stencil init')")]
    NotInitialized(String),

    #[error("already initialized: {0} exists")]
    AlreadyInitialized(String),

    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("skeleton not found: {0}")]
    SkeletonNotFound(String),

    #[error("invalid skeleton manifest {path}: {reason}")]
    InvalidManifest { path: String, reason: String },

    #[error("unresolved template variable '{name}' in {file}")]
    UnresolvedVariable { name: String, file: String },

    #[error("unknown template filter '{name}' in {file}")]
    UnknownFilter { name: String, file: String },

    #[error("template {file} is not valid UTF-8")]
    NonUtf8Template { file: String },

    #[error("unknown linter: {0}")]
    UnknownLinter(String),

    #[error("no coverage report found (searched: {0})")]
    CoverageReportNotFound(String),

    #[error("invalid coverage report {path}: {reason}")]
    InvalidCoverageReport { path: String, reason: String },

    #[error("secret scan failed: {0}")]
    ScannerFailed(String),

    #[error("git {operation} failed: {detail}")]
    GitFailed { operation: String, detail: String },

    #[error("home directory not found: set HOME or STENCIL_HOME")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StencilError>;

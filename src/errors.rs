use miette::Diagnostic;
use thiserror::Error;

pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ScopeError {
    #[error("no binding named `{name}` is in scope")]
    #[diagnostic(
        code(scope::not_found),
        help("declare the name with `insert` before updating or removing it")
    )]
    NotFound { name: String },

    #[error("cannot exit the root scope")]
    #[diagnostic(
        code(scope::root_scope),
        help("every `exit_scope` must be paired with an earlier `enter_scope`")
    )]
    RootScope,
}

impl ScopeError {
    pub fn not_found(name: &str) -> ScopeError {
        ScopeError::NotFound { name: name.to_string() }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ScopeError::NotFound { name } => Some(name.as_str()),
            ScopeError::RootScope => None,
        }
    }
}

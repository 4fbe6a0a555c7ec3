pub mod binding;
pub mod context;
pub mod errors;
pub mod scope;
pub mod trace;

pub use binding::Binding;
pub use context::ScopeContext;
pub use errors::{ScopeError, ScopeResult};
pub use scope::{ChildScope, SymbolTable};
pub use trace::{LogTracer, Trace, Tracer, Tracers};

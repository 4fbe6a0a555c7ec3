use std::fmt::Debug;
#[cfg(debug_assertions)]
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub enum Trace<'a> {
    Insert(&'a str),
    Update(&'a str),
    Remove(&'a str),
    Miss(&'a str),
    Propagate(&'a str),
    EnterScope,
    ExitScope(usize),
}

pub trait Tracer where Self: Debug + Clone + Copy {
    #[cfg(debug_assertions)]
    fn trace(self, traced: Trace<'_>, level: usize);
}

#[derive(Debug, Clone, Copy)]
pub enum Tracers {
    Log(LogTracer),
    Nil,
}

impl Tracer for Tracers {
    #[cfg(debug_assertions)]
    fn trace(self, traced: Trace<'_>, level: usize) {
        match self {
            Tracers::Log(tracer) => {
                tracer.trace(traced, level);
            }
            Tracers::Nil => {
            }
        }
    }
}

/// Forwards table events to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct LogTracer {}
impl Tracer for LogTracer {
    #[cfg(debug_assertions)]
    fn trace(self, traced: Trace<'_>, level: usize) {
        match traced {
            Trace::Insert(name) => {
                trace!(scope = level, binding = name, "insert");
            }
            Trace::Update(name) => {
                trace!(scope = level, binding = name, "update");
            }
            Trace::Remove(name) => {
                trace!(scope = level, binding = name, "remove");
            }
            Trace::Miss(name) => {
                debug!(scope = level, binding = name, "no binding found");
            }
            Trace::Propagate(name) => {
                debug!(scope = level, binding = name, "wrote loop value back to outer scope");
            }
            Trace::EnterScope => {
                debug!(scope = level, "entered scope");
            }
            Trace::ExitScope(reaped) => {
                debug!(scope = level, reaped, "exited scope");
            }
        }
    }
}

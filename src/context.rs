#[cfg(debug_assertions)]
use crate::trace::Tracer;
use crate::trace::{LogTracer, Trace, Tracers};

/// Bindings each new frame reserves room for.
pub const DEFAULT_FRAME_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct ScopeContext {
    pub tracer: Tracers,
    pub frame_capacity: usize,
}

impl Default for ScopeContext {
    fn default() -> ScopeContext {
        ScopeContext {
            tracer: Tracers::Nil,
            frame_capacity: DEFAULT_FRAME_CAPACITY,
        }
    }
}

impl ScopeContext {
    pub fn traced() -> ScopeContext {
        ScopeContext {
            tracer: Tracers::Log(LogTracer {}),
            ..ScopeContext::default()
        }
    }

    #[allow(unused_variables)]
    pub fn trace(&self, trace: Trace<'_>, level: usize) {
        #[cfg(debug_assertions)]
        self.tracer.trace(trace, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_silent() {
        let context = ScopeContext::default();
        assert!(matches!(context.tracer, Tracers::Nil));
        assert_eq!(context.frame_capacity, DEFAULT_FRAME_CAPACITY);
    }

    #[test]
    fn traced_context_logs() {
        let context = ScopeContext::traced();
        assert!(matches!(context.tracer, Tracers::Log(_)));
        context.trace(Trace::EnterScope, 1);
    }
}

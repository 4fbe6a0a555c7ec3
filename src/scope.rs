use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::debug_span;
use tracing::span::{EnteredSpan, Span};
use crate::binding::Binding;
use crate::context::ScopeContext;
use crate::errors::{ScopeError, ScopeResult};
use crate::trace::{Trace, Tracers};

#[derive(Debug, Clone)]
struct Frame {
    level: usize,
    bindings: Vec<Binding>,
}

impl Frame {
    fn new(level: usize, capacity: usize) -> Frame {
        Frame { level, bindings: Vec::with_capacity(capacity) }
    }

    // First match wins, even when a name was declared twice at this level.
    fn position(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|binding| binding.name == name)
    }

    fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }
}

/// Lexically scoped bindings kept as a stack of frames, one per scope level.
///
/// Lookups walk from the innermost frame outward, inserts always land in the
/// innermost frame. Frame 0 is the root level and is never popped, nor is the
/// frame of any open `ChildScope`.
#[derive(Debug)]
pub struct SymbolTable {
    frames: Vec<Frame>,
    floor: usize,
    context: ScopeContext,
}

impl Default for SymbolTable {
    fn default() -> SymbolTable {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::with_context(ScopeContext::default())
    }

    pub fn with_context(context: ScopeContext) -> SymbolTable {
        SymbolTable {
            frames: vec![Frame::new(0, context.frame_capacity)],
            floor: 0,
            context,
        }
    }

    /// Opens a nested scope whose level is one deeper than this table's.
    /// The scope and everything declared in it go away when the handle drops.
    pub fn child(&mut self) -> ChildScope<'_> {
        ChildScope::new(self)
    }

    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    pub fn current_scope_level(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn len(&self) -> usize {
        self.frames.iter().map(|frame| frame.bindings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(|frame| frame.bindings.is_empty())
    }

    /// Every binding, outermost level first, in insertion order within a level.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.frames.iter().flat_map(|frame| frame.bindings.iter())
    }

    pub fn current_bindings(&self) -> &[Binding] {
        &self.current().bindings
    }

    pub fn insert(&mut self, name: &str, type_tag: &str, value: &str) {
        let level = self.current_scope_level();
        self.frames[level].bindings.push(Binding::new(name, type_tag, value, level));
        self.context.trace(Trace::Insert(name), level);
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn lookup_current_scope(&self, name: &str) -> Option<&Binding> {
        self.current().get(name)
    }

    /// Replaces the value of whichever binding `lookup` would find. Type tag
    /// and scope level are left as declared.
    pub fn update(&mut self, name: &str, value: &str) -> ScopeResult<()> {
        match self.locate(name, self.frames.len()) {
            Some((depth, index)) => {
                self.frames[depth].bindings[index].value = value.to_string();
                self.context.trace(Trace::Update(name), depth);
                Ok(())
            }
            None => {
                self.context.trace(Trace::Miss(name), self.current_scope_level());
                Err(ScopeError::not_found(name))
            }
        }
    }

    /// Removes the first binding named `name` from the current level only.
    pub fn remove(&mut self, name: &str) -> ScopeResult<Binding> {
        let level = self.current_scope_level();
        let frame = &mut self.frames[level];
        match frame.position(name) {
            Some(index) => {
                let removed = frame.bindings.remove(index);
                self.context.trace(Trace::Remove(name), level);
                Ok(removed)
            }
            None => {
                self.context.trace(Trace::Miss(name), level);
                Err(ScopeError::not_found(name))
            }
        }
    }

    pub fn enter_scope(&mut self) {
        let level = self.frames.len();
        self.frames.push(Frame::new(level, self.context.frame_capacity));
        self.context.trace(Trace::EnterScope, level);
    }

    /// Drops every binding declared at the current level and steps back out.
    /// Refuses at level 0 and at the level an open child scope was opened at.
    pub fn exit_scope(&mut self) -> ScopeResult<()> {
        if self.current_scope_level() <= self.floor {
            return Err(ScopeError::RootScope);
        }
        if let Some(frame) = self.frames.pop() {
            self.context.trace(Trace::ExitScope(frame.bindings.len()), frame.level);
        }
        Ok(())
    }

    /// Declares a copy of every binding of `self` at `dest`'s current level.
    /// Inner levels are copied first so `dest` sees the same shadowing.
    pub fn copy_to(&self, dest: &mut SymbolTable) {
        for binding in self.innermost_first(0) {
            dest.insert(&binding.name, &binding.type_tag, &binding.value);
        }
    }

    /// Writes the value of each name visible in `self` back to the binding of
    /// the same name visible from `outer`. Names `outer` cannot see are skipped.
    /// Returns how many bindings were written back.
    pub fn propagate_loop_values(&self, outer: &mut SymbolTable) -> usize {
        let mut written = 0;
        for binding in self.visible(0) {
            if let Some((depth, index)) = outer.locate(&binding.name, outer.frames.len()) {
                outer.frames[depth].bindings[index].value = binding.value.clone();
                outer.context.trace(Trace::Propagate(&binding.name), depth);
                written += 1;
            }
        }
        written
    }

    pub fn format_bindings(&self) -> Vec<String> {
        self.current()
            .bindings
            .iter()
            .map(|binding| format!("{} = {}", binding.name, binding.value))
            .collect()
    }

    fn current(&self) -> &Frame {
        &self.frames[self.current_scope_level()]
    }

    // Innermost match among frames[..limit], as (frame, index).
    fn locate(&self, name: &str, limit: usize) -> Option<(usize, usize)> {
        self.frames[..limit]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, frame)| frame.position(name).map(|index| (depth, index)))
    }

    fn innermost_first(&self, base: usize) -> impl Iterator<Item = &Binding> {
        self.frames[base..].iter().rev().flat_map(|frame| frame.bindings.iter())
    }

    // The binding `lookup` would return for each name declared in frames[base..].
    fn visible(&self, base: usize) -> Vec<&Binding> {
        let mut seen: Vec<&Binding> = Vec::new();
        for binding in self.innermost_first(base) {
            if !seen.iter().any(|earlier| earlier.name == binding.name) {
                seen.push(binding);
            }
        }
        seen
    }

    fn copy_down(&mut self, base: usize) {
        let outer: Vec<Binding> = self.frames[..base]
            .iter()
            .rev()
            .flat_map(|frame| frame.bindings.iter().cloned())
            .collect();
        for binding in outer {
            self.insert(&binding.name, &binding.type_tag, &binding.value);
        }
    }

    fn propagate_down(&mut self, base: usize) -> usize {
        let inner: Vec<(String, String)> = self
            .visible(base)
            .into_iter()
            .map(|binding| (binding.name.clone(), binding.value.clone()))
            .collect();
        let mut written = 0;
        for (name, value) in inner {
            if let Some((depth, index)) = self.locate(&name, base) {
                self.frames[depth].bindings[index].value = value;
                self.context.trace(Trace::Propagate(&name), depth);
                written += 1;
            }
        }
        written
    }
}

/// A nested scope that borrows its parent table.
///
/// Dereferences to the underlying table, so lookups see the parent's bindings
/// and `update` can reach them, while `remove` and `lookup_current_scope` stay
/// local. `exit_scope` cannot leave the child's own level. Dropping the handle
/// discards the scope.
pub struct ChildScope<'p> {
    table: &'p mut SymbolTable,
    base: usize,
    parent_floor: usize,
    _span: EnteredSpan,
}

impl<'p> ChildScope<'p> {
    fn new(table: &'p mut SymbolTable) -> ChildScope<'p> {
        let base = table.frames.len();
        let span = match table.context().tracer {
            Tracers::Log(_) => debug_span!("child_scope", scope = base).entered(),
            Tracers::Nil => Span::none().entered(),
        };
        table.enter_scope();
        let parent_floor = table.floor;
        table.floor = base;
        ChildScope { table, base, parent_floor, _span: span }
    }

    /// The level this child was opened at.
    pub fn level(&self) -> usize {
        self.base
    }

    /// Seeds this scope with a copy of every binding the parent holds,
    /// innermost parent level first.
    pub fn copy_from_parent(&mut self) {
        self.table.copy_down(self.base);
    }

    /// Writes the values visible in this scope back to the parent's bindings
    /// of the same name. Returns how many were written back.
    pub fn propagate_to_parent(&mut self) -> usize {
        self.table.propagate_down(self.base)
    }
}

impl<'p> fmt::Debug for ChildScope<'p> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildScope")
            .field("base", &self.base)
            .field("table", &self.table)
            .finish()
    }
}

impl<'p> Deref for ChildScope<'p> {
    type Target = SymbolTable;

    fn deref(&self) -> &SymbolTable {
        self.table
    }
}

impl<'p> DerefMut for ChildScope<'p> {
    fn deref_mut(&mut self) -> &mut SymbolTable {
        self.table
    }
}

impl<'p> Drop for ChildScope<'p> {
    fn drop(&mut self) {
        // The floor keeps frames[base] alive until now.
        let reaped: usize = self.table.frames[self.base..]
            .iter()
            .map(|frame| frame.bindings.len())
            .sum();
        self.table.frames.truncate(self.base);
        self.table.floor = self.parent_floor;
        self.table.context.trace(Trace::ExitScope(reaped), self.base);
    }
}

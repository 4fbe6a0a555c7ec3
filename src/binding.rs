use std::fmt;

/// A name bound to an opaque type tag and value, stamped with the scope level
/// it was declared at.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Binding {
    pub name: String,
    pub type_tag: String,
    pub value: String,
    pub scope_level: usize,
}

impl Binding {
    pub fn new(name: &str, type_tag: &str, value: &str, scope_level: usize) -> Binding {
        Binding {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            value: value.to_string(),
            scope_level,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.name, self.type_tag, self.value)
    }
}

use super::Category;

/// Node weight of the pattern graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    pub name: String,
    pub category: Category,
}

impl PatternNode {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

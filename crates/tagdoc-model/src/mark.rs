use crate::attrs::Attrs;
use crate::schema::MarkType;

/// An inline annotation (emphasis, link, ...) applied to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    name: String,
    attrs: Attrs,
    rank: usize,
}

impl Mark {
    pub(crate) fn new(mark_type: &MarkType, attrs: Attrs) -> Self {
        Self {
            name: mark_type.name().to_string(),
            attrs,
            rank: mark_type.rank(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn is_in_set(&self, set: &[Mark]) -> bool {
        set.iter().any(|m| m == self)
    }

    /// Return a copy of `set` with this mark added.
    ///
    /// A mark of the same type already in the set is replaced, so the mark
    /// added last wins: `link(b)` over `link(a)` leaves `href = b`. Callers
    /// that want the inner mark kept must look for a mark of the same name
    /// first. The result stays sorted by schema rank.
    pub fn add_to_set(&self, set: &[Mark]) -> Vec<Mark> {
        let mut out: Vec<Mark> = set.iter().filter(|m| m.name != self.name).cloned().collect();
        let at = out
            .iter()
            .position(|m| m.rank > self.rank)
            .unwrap_or(out.len());
        out.insert(at, self.clone());
        out
    }

    pub fn remove_from_set(&self, set: &[Mark]) -> Vec<Mark> {
        set.iter().filter(|m| *m != self).cloned().collect()
    }
}

//! Structural accessors over a block's field tree.
//!
//! Read-only views: path lookup, location-grouped ordering, and the pure
//! conversions between the ordered-sequence view and the name-keyed-mapping
//! view. Mutations live in the `mutate` module.

use crate::types::{Block, Field, FieldMap, FieldPath, Location};

impl Block {
    /// The sibling namespace a parent name refers to: the top-level map, or
    /// a repeater's `sub_fields`. `None` when the parent does not exist or
    /// has no children.
    pub fn siblings(&self, parent: Option<&str>) -> Option<&FieldMap> {
        match parent {
            None => Some(&self.fields),
            Some(p) => self.fields.get(p)?.sub_fields.as_ref(),
        }
    }

    /// Look up a field by path. Missing fields are `None`, never an error.
    pub fn field(&self, path: &FieldPath) -> Option<&Field> {
        self.siblings(path.parent.as_deref())?.get(&path.name)
    }

    /// The fields at a location within a parent scope, ordered by rank.
    ///
    /// Fields with no explicit location serialize as the default location
    /// and are included in that location's result.
    pub fn fields_for_location(&self, location: Location, parent: Option<&str>) -> Vec<&Field> {
        let Some(siblings) = self.siblings(parent) else {
            return Vec::new();
        };
        let mut group: Vec<&Field> = siblings
            .values()
            .filter(|f| f.location == location)
            .collect();
        group.sort_by_key(|f| f.order);
        group
    }
}

/// Convert a name-keyed field mapping to the rank-ordered sequence view.
pub fn fields_as_vec(fields: &FieldMap) -> Vec<Field> {
    let mut ordered: Vec<Field> = fields.values().cloned().collect();
    ordered.sort_by_key(|f| f.order);
    ordered
}

/// Convert an ordered sequence of fields back to the name-keyed mapping view.
pub fn fields_as_map(fields: Vec<Field>) -> FieldMap {
    fields.into_iter().map(|f| (f.name.clone(), f)).collect()
}

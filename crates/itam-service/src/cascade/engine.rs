//! Generic cascade primitives shared by the organization and catalog
//! hierarchies. Everything here is a pure function over slices.

use std::collections::HashSet;

use itam_core::traits::{CatalogScoped, ChildOf, Keyed, OrgScoped};

use super::catalog::CatalogPath;
use super::org::OrgPath;

/// How a record relates to the selection at one hierarchy level.
///
/// A record without a value at a level is `Mismatched` when that level is
/// selected: a selection that requires a department excludes records that
/// have none. A level with no selection never excludes anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMatch {
    /// No selection at this level.
    Unconstrained,
    /// Selection set and the record carries the same id.
    Matched,
    /// Selection set and the record carries a different id or none.
    Mismatched,
}

impl LevelMatch {
    /// Compare a selection against a record's value at the same level.
    pub fn of<K: PartialEq>(selected: Option<K>, actual: Option<K>) -> Self {
        match (selected, actual) {
            (None, _) => Self::Unconstrained,
            (Some(want), Some(have)) if want == have => Self::Matched,
            (Some(_), _) => Self::Mismatched,
        }
    }

    /// Whether the record may stay in the filtered set.
    pub fn passes(self) -> bool {
        !matches!(self, Self::Mismatched)
    }
}

/// Children whose parent equals `parent`, in source order. No parent
/// selected means no options.
pub fn child_options<C, P>(children: &[C], parent: Option<P>) -> Vec<&C>
where
    C: ChildOf<P>,
    P: PartialEq + Copy,
{
    let Some(parent) = parent else {
        return Vec::new();
    };
    children
        .iter()
        .filter(|child| child.parent() == Some(parent))
        .collect()
}

/// Keep the first occurrence of each key, preserving order.
pub fn distinct_by_key<T, I>(items: I) -> Vec<T>
where
    T: Keyed,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.key()))
        .collect()
}

/// Transaction records on both paths at once.
pub fn filter_transactions<'a, R>(
    records: &'a [R],
    org: &OrgPath,
    catalog: &CatalogPath,
) -> Vec<&'a R>
where
    R: OrgScoped + CatalogScoped,
{
    records
        .iter()
        .filter(|record| org.matches(*record) && catalog.matches(*record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itam_core::types::{CategoryId, SubcategoryId};
    use itam_entity::catalog::Subcategory;

    fn sub(id: i64, category: i64) -> Subcategory {
        Subcategory {
            id: SubcategoryId::new(id),
            category_id: CategoryId::new(category),
            name: format!("Sub {id}"),
        }
    }

    #[test]
    fn test_level_match_tri_state() {
        assert_eq!(LevelMatch::of::<i64>(None, None), LevelMatch::Unconstrained);
        assert_eq!(LevelMatch::of(None, Some(3)), LevelMatch::Unconstrained);
        assert_eq!(LevelMatch::of(Some(3), Some(3)), LevelMatch::Matched);
        assert_eq!(LevelMatch::of(Some(3), Some(4)), LevelMatch::Mismatched);
        assert_eq!(LevelMatch::of(Some(3), None), LevelMatch::Mismatched);
        assert!(LevelMatch::Unconstrained.passes());
        assert!(!LevelMatch::Mismatched.passes());
    }

    #[test]
    fn test_child_options_keep_source_order() {
        let subs = vec![sub(5, 1), sub(2, 2), sub(9, 1), sub(1, 1)];
        let ids: Vec<i64> = child_options(&subs, Some(CategoryId::new(1)))
            .iter()
            .map(|s| s.id.get())
            .collect();
        assert_eq!(ids, vec![5, 9, 1]);
    }

    #[test]
    fn test_child_options_empty_without_parent() {
        let subs = vec![sub(1, 1)];
        assert!(child_options::<_, CategoryId>(&subs, None).is_empty());
    }

    #[test]
    fn test_distinct_by_key_keeps_first() {
        let subs = vec![sub(1, 1), sub(2, 1), sub(1, 2)];
        let distinct = distinct_by_key(subs);
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].category_id, CategoryId::new(1));
    }
}

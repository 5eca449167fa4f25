//! Grouping engine: stable partition of the catalog into named buckets.

use crate::{Catalog, ModuleRecord};

/// Split `items` by `predicate` into `(matching, non_matching)`.
///
/// Both outputs keep the relative order of `items`, and every element lands
/// in exactly one of them. The outputs borrow from `items`; nothing is copied.
pub fn partition<T, P>(items: &[T], mut predicate: P) -> (Vec<&T>, Vec<&T>)
where
    P: FnMut(&T) -> bool,
{
    let mut matching = Vec::new();
    let mut non_matching = Vec::new();
    for item in items {
        if predicate(item) {
            matching.push(item);
        } else {
            non_matching.push(item);
        }
    }
    (matching, non_matching)
}

/// The two buckets of the summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketId {
    /// Usable without external registration.
    Open,
    /// Requires external registration before use.
    Registered,
}

impl BucketId {
    /// Presentation order: the easy path first.
    pub const ORDER: [BucketId; 2] = [BucketId::Open, BucketId::Registered];

    /// Section tag used in expansion keys.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            BucketId::Open => "open",
            BucketId::Registered => "registered",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "open" => Some(BucketId::Open),
            "registered" => Some(BucketId::Registered),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(module: &ModuleRecord) -> Self {
        if module.requires_registration {
            BucketId::Registered
        } else {
            BucketId::Open
        }
    }
}

/// Both buckets derived from one catalog. Cheap to rebuild on every render.
#[derive(Debug, Clone)]
pub struct Buckets<'a> {
    open: Vec<&'a ModuleRecord>,
    registered: Vec<&'a ModuleRecord>,
}

impl<'a> Buckets<'a> {
    #[must_use]
    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        let (registered, open) = partition(catalog.modules(), |m| m.requires_registration);
        Self { open, registered }
    }

    #[must_use]
    pub fn get(&self, id: BucketId) -> &[&'a ModuleRecord] {
        match id {
            BucketId::Open => &self.open,
            BucketId::Registered => &self.registered,
        }
    }

    /// Buckets in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (BucketId, &[&'a ModuleRecord])> + '_ {
        BucketId::ORDER.into_iter().map(|id| (id, self.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::{BucketId, Buckets, partition};
    use crate::{Catalog, ModuleRecord, NonEmptyString};

    fn module(name: &str, requires_registration: bool) -> ModuleRecord {
        let mut module = ModuleRecord::new(NonEmptyString::new(name).unwrap());
        module.requires_registration = requires_registration;
        module
    }

    #[test]
    fn partition_is_stable_and_covers_input() {
        let items = [5, 2, 8, 1, 6, 3, 3];
        let (even, odd) = partition(&items, |n| n % 2 == 0);
        assert_eq!(even, vec![&2, &8, &6]);
        assert_eq!(odd, vec![&5, &1, &3, &3]);
        assert_eq!(even.len() + odd.len(), items.len());
    }

    #[test]
    fn partition_borrows_without_copying() {
        let items = vec!["a".to_string(), "b".to_string()];
        let (all, none) = partition(&items, |_| true);
        assert!(none.is_empty());
        assert!(std::ptr::eq(all[0], &items[0]));
        assert!(std::ptr::eq(all[1], &items[1]));
    }

    #[test]
    fn partition_of_empty_input_is_empty() {
        let items: [u8; 0] = [];
        let (matching, non_matching) = partition(&items, |_| true);
        assert!(matching.is_empty());
        assert!(non_matching.is_empty());
    }

    #[test]
    fn registration_scenario_splits_x_and_y() {
        let catalog = Catalog::new(vec![module("X", false), module("Y", true)]).unwrap();
        let (matching, non_matching) =
            partition(catalog.modules(), |m| m.requires_registration);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name(), "Y");
        assert_eq!(non_matching.len(), 1);
        assert_eq!(non_matching[0].name(), "X");
    }

    #[test]
    fn buckets_iterate_open_first() {
        let catalog = Catalog::new(vec![
            module("A", true),
            module("B", false),
            module("C", true),
            module("D", false),
        ])
        .unwrap();
        let buckets = Buckets::from_catalog(&catalog);
        let order: Vec<(BucketId, Vec<&str>)> = buckets
            .iter()
            .map(|(id, modules)| (id, modules.iter().map(|m| m.name()).collect()))
            .collect();
        assert_eq!(
            order,
            vec![
                (BucketId::Open, vec!["B", "D"]),
                (BucketId::Registered, vec!["A", "C"]),
            ]
        );
    }

    #[test]
    fn bucket_tags_round_trip() {
        for id in BucketId::ORDER {
            assert_eq!(BucketId::from_tag(id.tag()), Some(id));
        }
        assert_eq!(BucketId::from_tag("grid"), None);
    }
}

//! The user's reading lists, fetched read-only per search invocation.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// Per-user mapping of list name to the object identifiers it contains.
///
/// The service serializes the lists as a JSON object and the object's own key
/// order is meaningful: membership lookups scan the lists in that order and
/// the first match wins. A plain map type would lose the order, so the pairs
/// are kept in a [`Vec`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadingLists(Vec<(String, Vec<String>)>);

impl ReadingLists {
    /// Creates reading lists from name/identifier pairs, kept in the given order.
    #[must_use]
    pub const fn new(lists: Vec<(String, Vec<String>)>) -> Self {
        Self(lists)
    }

    /// The name of the first list containing `id`, in the map's own order.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, ids)| ids.iter().any(|i| i == id))
            .map(|(name, _)| name.as_str())
    }

    /// The list names in the map's own order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// The number of lists.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the user has no lists at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ReadingLists {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListsVisitor;

        impl<'de> Visitor<'de> for ListsVisitor {
            type Value = ReadingLists;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of list name to identifier arrays")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut lists = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    lists.push(entry);
                }
                Ok(ReadingLists(lists))
            }
        }

        deserializer.deserialize_map(ListsVisitor)
    }
}

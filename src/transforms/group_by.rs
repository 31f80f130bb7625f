//! Partition a sequence into keyed groups.
//!
//! Unlike a plain `HashMap<K, Vec<T>>`, [`Groups`] remembers the order in which
//! keys were first seen, so iterating the result is deterministic and the
//! concatenation of all groups is a stable permutation of the input.

use crate::error::{Result, TransformError};
use crate::record::Record;
use crate::transform::{Transform, impl_compose_operator};
use serde::ser::{Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// An insertion-ordered mapping from key to the elements carrying that key.
#[derive(Debug, Clone)]
pub struct Groups<K, T> {
    entries: Vec<(K, Vec<T>)>,
    index: HashMap<K, usize>,
}

impl<K, T> Default for Groups<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, T> Groups<K, T> {
    /// Create an empty group map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the group for `key`, creating the group if needed.
    pub fn push(&mut self, key: K, item: T) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(item),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![item]));
            }
        }
    }

    /// The group for `key`, if any element carried it.
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.index.get(key).map(|&slot| self.entries[slot].1.as_slice())
    }

    /// True when some element carried `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

impl<K, T> Groups<K, T> {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// `(key, group)` pairs in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.entries.iter().map(|(k, vs)| (k, vs.as_slice()))
    }

    /// `(key, group)` pairs in first-seen key order, by value.
    pub fn into_entries(self) -> Vec<(K, Vec<T>)> {
        self.entries
    }
}

impl<K: PartialEq, T: PartialEq> PartialEq for Groups<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, T> IntoIterator for Groups<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = std::vec::IntoIter<(K, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serialized as a map, keys in first-seen order.
impl<K: Serialize, T: Serialize> Serialize for Groups<K, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, vs)| (k, vs)))
    }
}

/// Group elements by a key function or by a named record field.
pub struct GroupBy<T, K> {
    key: Arc<dyn Fn(&T) -> Result<K> + Send + Sync>,
}

impl<T: 'static, K: 'static> GroupBy<T, K> {
    /// Group by the value of `key_fn`.
    pub fn new<F>(key_fn: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            key: Arc::new(move |item| Ok(key_fn(item))),
        }
    }

    /// Like [`GroupBy::new`], for a key function that can fail.
    pub fn try_new<F, E>(key_fn: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<K, E> + Send + Sync + 'static,
    {
        Self {
            key: Arc::new(move |item| key_fn(item).map_err(Into::into)),
        }
    }
}

impl<T: Record + 'static> GroupBy<T, T::Key> {
    /// Group records by the value of field `name`.
    ///
    /// A record without that field fails the whole transform with
    /// [`TransformError::MissingField`].
    pub fn field(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            key: Arc::new(move |record: &T| {
                record.field_key(&name).ok_or_else(|| {
                    TransformError::MissingField {
                        field: name.clone(),
                    }
                    .into()
                })
            }),
        }
    }
}

impl<T, K> Transform for GroupBy<T, K>
where
    K: Eq + Hash + Clone,
{
    type Input = Vec<T>;
    type Output = Groups<K, T>;

    fn apply(&self, input: Vec<T>) -> Result<Groups<K, T>> {
        let mut groups = Groups::new();
        for item in input {
            let key = (self.key)(&item)?;
            groups.push(key, item);
        }
        Ok(groups)
    }

    fn name(&self) -> &'static str {
        "group_by"
    }
}

impl_compose_operator!(GroupBy<T, K>);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn keys_keep_first_seen_order() -> Result<()> {
        let by_parity = GroupBy::new(|x: &u32| if x % 2 == 0 { "even" } else { "odd" });
        let groups = by_parity.apply(vec![3, 8, 5, 2, 7])?;
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["odd", "even"]);
        assert_eq!(groups.get(&"odd"), Some(&[3, 5, 7][..]));
        assert_eq!(groups.get(&"even"), Some(&[8, 2][..]));
        assert_eq!(groups.get(&"none"), None);
        Ok(())
    }

    #[test]
    fn empty_input_yields_no_groups() -> Result<()> {
        let g = GroupBy::new(|x: &i32| *x).apply(Vec::new())?;
        assert!(g.is_empty());
        assert_eq!(g.len(), 0);
        Ok(())
    }

    #[test]
    fn field_grouping_over_map_records() -> Result<()> {
        let row = |team: &str, who: &str| -> HashMap<String, String> {
            [("team".to_string(), team.to_string()), ("who".to_string(), who.to_string())]
                .into_iter()
                .collect()
        };
        let rows = vec![row("red", "ann"), row("blue", "bo"), row("red", "cy")];
        let by_team: GroupBy<HashMap<String, String>, String> = GroupBy::field("team");
        let groups = by_team.apply(rows)?;

        let sizes: Vec<(String, usize)> =
            groups.iter().map(|(k, vs)| (k.clone(), vs.len())).collect();
        assert_eq!(sizes, vec![("red".into(), 2), ("blue".into(), 1)]);
        Ok(())
    }

    #[test]
    fn missing_field_is_reported() {
        let rows: Vec<HashMap<String, i32>> = vec![HashMap::new()];
        let by_dept: GroupBy<HashMap<String, i32>, i32> = GroupBy::field("dept");
        let err = by_dept.apply(rows).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TransformError>(),
            Some(&TransformError::MissingField { field: "dept".into() })
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn groups_serialize_as_ordered_map() -> Result<()> {
        let groups = GroupBy::new(|s: &&str| s.len()).apply(vec!["bb", "a", "cc"])?;
        assert_eq!(serde_json::to_string(&groups)?, r#"{"2":["bb","cc"],"1":["a"]}"#);
        Ok(())
    }
}

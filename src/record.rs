//! Field access on map-like records.
//!
//! [`GroupBy::field`](crate::GroupBy::field) groups records by the value of a
//! named field. Any type implementing [`Record`] can be grouped that way:
//! string-keyed `HashMap`s and `BTreeMap`s out of the box, and (with the `json`
//! feature) `serde_json` objects, whose field values are converted to a
//! hashable [`FieldKey`].

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A record with named fields.
pub trait Record {
    /// The hashable value a field resolves to.
    type Key: Clone + Eq + Hash;

    /// The value of field `name`, or `None` when the record lacks it.
    fn field_key(&self, name: &str) -> Option<Self::Key>;
}

impl<V, S> Record for HashMap<String, V, S>
where
    V: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Key = V;

    fn field_key(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<V> Record for BTreeMap<String, V>
where
    V: Clone + Eq + Hash,
{
    type Key = V;

    fn field_key(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

#[cfg(feature = "json")]
pub use self::json::FieldKey;

#[cfg(feature = "json")]
mod json {
    use super::Record;
    use ordered_float::OrderedFloat;
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};
    use std::fmt;

    /// A hashable image of a JSON field value.
    ///
    /// Numbers are keyed by value, not by spelling: `1` and `1.0` both map to
    /// `Int(1)`. Integral values map to `Int` when they fit in `i64` and to
    /// `UInt` when they only fit in `u64`; everything else maps to `Float`.
    /// Arrays and objects are keyed by their compact JSON text.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum FieldKey {
        Null,
        Bool(bool),
        Int(i64),
        UInt(u64),
        Float(OrderedFloat<f64>),
        Str(String),
        Composite(String),
    }

    impl From<&Value> for FieldKey {
        fn from(value: &Value) -> Self {
            match value {
                Value::Null => FieldKey::Null,
                Value::Bool(b) => FieldKey::Bool(*b),
                Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) => FieldKey::Int(i),
                    (None, Some(u)) => FieldKey::UInt(u),
                    (None, None) => FieldKey::from(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::String(s) => FieldKey::Str(s.clone()),
                Value::Array(_) | Value::Object(_) => FieldKey::Composite(value.to_string()),
            }
        }
    }

    // 2^63 and 2^64, the first floats past `i64::MAX` and `u64::MAX`.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;
    const U64_END: f64 = 18_446_744_073_709_551_616.0;

    impl From<f64> for FieldKey {
        fn from(x: f64) -> Self {
            if x.fract() != 0.0 {
                FieldKey::Float(OrderedFloat(x))
            } else if (-I64_END..I64_END).contains(&x) {
                FieldKey::Int(x as i64)
            } else if (0.0..U64_END).contains(&x) {
                FieldKey::UInt(x as u64)
            } else {
                FieldKey::Float(OrderedFloat(x))
            }
        }
    }

    impl From<u64> for FieldKey {
        fn from(u: u64) -> Self {
            i64::try_from(u).map_or(FieldKey::UInt(u), FieldKey::Int)
        }
    }

    impl From<&str> for FieldKey {
        fn from(s: &str) -> Self {
            FieldKey::Str(s.to_string())
        }
    }

    impl From<i64> for FieldKey {
        fn from(i: i64) -> Self {
            FieldKey::Int(i)
        }
    }

    impl fmt::Display for FieldKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FieldKey::Null => f.write_str("null"),
                FieldKey::Bool(b) => write!(f, "{b}"),
                FieldKey::Int(i) => write!(f, "{i}"),
                FieldKey::UInt(u) => write!(f, "{u}"),
                FieldKey::Float(x) => write!(f, "{}", x.0),
                FieldKey::Str(s) | FieldKey::Composite(s) => f.write_str(s),
            }
        }
    }

    impl Record for Map<String, Value> {
        type Key = FieldKey;

        fn field_key(&self, name: &str) -> Option<FieldKey> {
            self.get(name).map(FieldKey::from)
        }
    }

    /// Only objects have fields; every other JSON value resolves to `None`.
    impl Record for Value {
        type Key = FieldKey;

        fn field_key(&self, name: &str) -> Option<FieldKey> {
            self.as_object().and_then(|obj| obj.field_key(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_records_expose_their_entries() {
        let mut row: HashMap<String, u32> = HashMap::new();
        row.insert("age".into(), 41);
        assert_eq!(row.field_key("age"), Some(41));
        assert_eq!(row.field_key("name"), None);

        let row: BTreeMap<String, &str> = [("city".to_string(), "Oslo")].into_iter().collect();
        assert_eq!(row.field_key("city"), Some("Oslo"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_values_convert_to_field_keys() {
        use serde_json::json;

        let rec = json!({"n": 3, "x": 1.5, "s": "a", "b": true, "z": null, "l": [1, 2]});
        assert_eq!(rec.field_key("n"), Some(FieldKey::Int(3)));
        assert_eq!(rec.field_key("x"), Some(FieldKey::Float(ordered_float::OrderedFloat(1.5))));
        assert_eq!(rec.field_key("s"), Some(FieldKey::from("a")));
        assert_eq!(rec.field_key("b"), Some(FieldKey::Bool(true)));
        assert_eq!(rec.field_key("z"), Some(FieldKey::Null));
        assert_eq!(rec.field_key("l"), Some(FieldKey::Composite("[1,2]".into())));
        assert_eq!(rec.field_key("missing"), None);
        assert_eq!(json!([1, 2]).field_key("n"), None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn numbers_are_keyed_by_value() {
        use serde_json::json;

        let rec = json!({"i": 1, "f": 1.0, "neg": -2.0, "big": u64::MAX, "huge": 1e20});
        assert_eq!(rec.field_key("i"), rec.field_key("f"));
        assert_eq!(rec.field_key("neg"), Some(FieldKey::Int(-2)));
        assert_eq!(rec.field_key("big"), Some(FieldKey::UInt(u64::MAX)));
        assert_eq!(rec.field_key("huge"), Some(FieldKey::Float(ordered_float::OrderedFloat(1e20))));
        assert_eq!(FieldKey::from(7u64), FieldKey::Int(7));
        assert_eq!(FieldKey::from(9_223_372_036_854_775_808.0), FieldKey::UInt(1 << 63));
        assert_ne!(
            FieldKey::from(&json!(u64::MAX)),
            FieldKey::from(&json!(u64::MAX - 1))
        );
    }
}

//! Store adapter: named collections of JSON records over a flat
//! key-value medium.
//!
//! Every collection is stored as one JSON array under one key. There is no
//! append or partial-write primitive: callers read, modify and write back
//! the whole sequence. Reads fail soft on corrupt content; writes overwrite.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, Storage};
use crate::error::{IronfitError, Result};

/// Logical keys of the durable medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Users,
    Profiles,
    DietPlans,
    WorkoutPlans,
    ProgressRecords,
    Session,
    MockDataSeeded,
}

impl Key {
    /// Collections wiped store-wide by the logout policy.
    pub const SESSION_SCOPED: [Key; 4] = [
        Key::Profiles,
        Key::DietPlans,
        Key::WorkoutPlans,
        Key::ProgressRecords,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Key::Users => "Users",
            Key::Profiles => "Profiles",
            Key::DietPlans => "DietPlans",
            Key::WorkoutPlans => "WorkoutPlans",
            Key::ProgressRecords => "ProgressRecords",
            Key::Session => "Session",
            Key::MockDataSeeded => "MockDataSeeded",
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed access to the collections held in a [`Storage`] medium.
pub struct Store {
    backend: Storage,
    namespace: Option<String>,
}

impl Store {
    pub fn new(backend: Storage) -> Self {
        Self {
            backend,
            namespace: None,
        }
    }

    /// Prefix every key with `<namespace>:`. An empty namespace is ignored.
    pub fn with_namespace(backend: Storage, namespace: Option<String>) -> Self {
        let namespace = namespace.filter(|ns| !ns.trim().is_empty());
        Self { backend, namespace }
    }

    pub fn in_memory() -> Self {
        Self::new(Storage::in_memory())
    }

    /// The underlying medium, bypassing JSON handling.
    pub fn raw(&self) -> &Storage {
        &self.backend
    }

    /// Stored string under `key`, unparsed.
    pub fn raw_value(&self, key: Key) -> Result<Option<String>> {
        self.backend.get(&self.key_name(key))
    }

    /// Physical key name for `key` after namespacing.
    pub fn key_name(&self, key: Key) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.as_str().to_string(),
        }
    }

    /// Raw elements of a collection. Absent or non-array content yields an
    /// empty sequence.
    fn read_values(&self, key: Key) -> Result<Vec<serde_json::Value>> {
        let name = self.key_name(key);
        let Some(raw) = self.backend.get(&name)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(values) => Ok(values),
            Err(e) => {
                tracing::warn!("collection {name} is corrupt, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn write_values(&self, key: Key, values: &[serde_json::Value]) -> Result<()> {
        let name = self.key_name(key);
        self.backend.set(&name, &serde_json::to_string(values)?)?;
        tracing::debug!("wrote {} records to {name}", values.len());
        Ok(())
    }

    /// Read a collection. Absent or non-array content yields an empty
    /// sequence; elements that don't match `T` are skipped. Only medium
    /// failures are returned as errors.
    pub fn read_collection<T: DeserializeOwned>(&self, key: Key) -> Result<Vec<T>> {
        let name = self.key_name(key);
        let values = self.read_values(key)?;

        let total = values.len();
        let records: Vec<T> = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("skipping malformed record {i} in {name}: {e}");
                    None
                }
            })
            .collect();

        tracing::debug!("read {}/{} records from {name}", records.len(), total);
        Ok(records)
    }

    /// Serialize `records` and overwrite the collection wholesale.
    pub fn write_collection<T: Serialize>(&self, key: Key, records: &[T]) -> Result<()> {
        let name = self.key_name(key);
        let json = serde_json::to_string(records)?;
        self.backend.set(&name, &json)?;
        tracing::debug!("wrote {} records to {name}", records.len());
        Ok(())
    }

    /// Append one record. Stored elements are written back untouched,
    /// including those that don't parse as any known record type.
    pub fn append_record<T: Serialize>(&self, key: Key, record: &T) -> Result<()> {
        let mut values = self.read_values(key)?;
        values.push(serde_json::to_value(record)?);
        self.write_values(key, &values)
    }

    /// Replace the first element that parses as `T` and satisfies `pred`.
    /// Returns `false`, leaving the collection as it was, when none does.
    /// Every other element is kept verbatim.
    pub fn replace_first<T, F>(&self, key: Key, pred: F, record: &T) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut values = self.read_values(key)?;
        let position = values.iter().position(|value| {
            serde_json::from_value::<T>(value.clone()).is_ok_and(|parsed| pred(&parsed))
        });
        let Some(i) = position else {
            return Ok(false);
        };
        values[i] = serde_json::to_value(record)?;
        self.write_values(key, &values)?;
        Ok(true)
    }

    /// String values of `field` across every stored element, parsed or not.
    pub fn field_values(&self, key: Key, field: &str) -> Result<Vec<String>> {
        Ok(self
            .read_values(key)?
            .iter()
            .filter_map(|value| value.get(field)?.as_str().map(str::to_string))
            .collect())
    }

    /// Remove a key entirely.
    pub fn clear(&self, key: Key) -> Result<()> {
        let name = self.key_name(key);
        self.backend.remove(&name)?;
        tracing::debug!("cleared {name}");
        Ok(())
    }

    /// Number of elements stored under a collection key, regardless of shape.
    pub fn count(&self, key: Key) -> Result<usize> {
        Ok(self.read_values(key)?.len())
    }

    /// Read a single-record key. Unlike collections, corrupt content is
    /// reported as [`IronfitError::StorageParse`] so the caller decides
    /// whether to discard it.
    pub fn read_record<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>> {
        let name = self.key_name(key);
        let Some(raw) = self.backend.get(&name)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| IronfitError::StorageParse {
                key: name,
                reason: e.to_string(),
            })
    }

    pub fn write_record<T: Serialize>(&self, key: Key, record: &T) -> Result<()> {
        let name = self.key_name(key);
        let json = serde_json::to_string(record)?;
        self.backend.set(&name, &json)
    }

    /// Boolean sentinel. Anything other than JSON `true` reads as unset.
    pub fn read_flag(&self, key: Key) -> Result<bool> {
        let name = self.key_name(key);
        let raw = self.backend.get(&name)?;
        Ok(matches!(
            raw.as_deref().map(serde_json::from_str::<bool>),
            Some(Ok(true))
        ))
    }

    pub fn write_flag(&self, key: Key, value: bool) -> Result<()> {
        let name = self.key_name(key);
        self.backend.set(&name, if value { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        n: u32,
    }

    fn item(id: &str, n: u32) -> Item {
        Item {
            id: id.to_string(),
            n,
        }
    }

    #[test]
    fn test_absent_collection_is_empty() {
        let store = Store::in_memory();
        let items: Vec<Item> = store.read_collection(Key::Users).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let store = Store::in_memory();
        let items = vec![item("a", 1), item("b", 2), item("c", 3)];
        store.write_collection(Key::Users, &items).unwrap();
        let back: Vec<Item> = store.read_collection(Key::Users).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_non_json_reads_as_empty() {
        let store = Store::in_memory();
        store.raw().set("ProgressRecords", "{not json").unwrap();
        let items: Vec<Item> = store.read_collection(Key::ProgressRecords).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_json_object_instead_of_array_reads_as_empty() {
        let store = Store::in_memory();
        store.raw().set("Users", r#"{"id":"a","n":1}"#).unwrap();
        let items: Vec<Item> = store.read_collection(Key::Users).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_elements_are_skipped() {
        let store = Store::in_memory();
        store
            .raw()
            .set("Users", r#"[{"id":"a","n":1},{"id":"b"},42,{"id":"c","n":3}]"#)
            .unwrap();
        let items: Vec<Item> = store.read_collection(Key::Users).unwrap();
        assert_eq!(items, vec![item("a", 1), item("c", 3)]);
        // Raw count still sees every element.
        assert_eq!(store.count(Key::Users).unwrap(), 4);
    }

    #[test]
    fn test_append_keeps_unparseable_elements() {
        let store = Store::in_memory();
        store
            .raw()
            .set("Users", r#"[{"id":"legacy","extra":true},{"id":"a","n":1}]"#)
            .unwrap();
        store.append_record(Key::Users, &item("b", 2)).unwrap();

        assert_eq!(store.count(Key::Users).unwrap(), 3);
        let raw = store.raw_value(Key::Users).unwrap().unwrap();
        assert!(raw.contains(r#""id":"legacy""#));
        let items: Vec<Item> = store.read_collection(Key::Users).unwrap();
        assert_eq!(items, vec![item("a", 1), item("b", 2)]);
    }

    #[test]
    fn test_replace_first_matches_parsed_elements_only() {
        let store = Store::in_memory();
        store
            .raw()
            .set("Users", r#"[{"id":"a"},{"id":"a","n":1},{"id":"a","n":2}]"#)
            .unwrap();

        let replaced = store
            .replace_first(Key::Users, |i: &Item| i.id == "a", &item("a", 9))
            .unwrap();
        assert!(replaced);
        let values: Vec<serde_json::Value> = store.read_collection(Key::Users).unwrap();
        assert_eq!(values[0], serde_json::json!({"id": "a"}));
        assert_eq!(values[1], serde_json::json!({"id": "a", "n": 9}));
        assert_eq!(values[2], serde_json::json!({"id": "a", "n": 2}));
    }

    #[test]
    fn test_replace_first_without_match_leaves_collection() {
        let store = Store::in_memory();
        store.write_collection(Key::Users, &[item("a", 1)]).unwrap();
        let before = store.raw_value(Key::Users).unwrap();

        let replaced = store
            .replace_first(Key::Users, |i: &Item| i.id == "zzz", &item("zzz", 0))
            .unwrap();
        assert!(!replaced);
        assert_eq!(store.raw_value(Key::Users).unwrap(), before);
    }

    #[test]
    fn test_field_values_include_unparseable_elements() {
        let store = Store::in_memory();
        store
            .raw()
            .set("Users", r#"[{"id":"legacy"},{"id":"a","n":1},{"n":3},7]"#)
            .unwrap();
        assert_eq!(
            store.field_values(Key::Users, "id").unwrap(),
            vec!["legacy".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_clear_removes_key() {
        let store = Store::in_memory();
        store.write_collection(Key::DietPlans, &[item("a", 1)]).unwrap();
        store.clear(Key::DietPlans).unwrap();
        assert!(store.raw().get("DietPlans").unwrap().is_none());
        assert_eq!(store.count(Key::DietPlans).unwrap(), 0);
    }

    #[test]
    fn test_namespace_prefixes_keys() {
        let store = Store::with_namespace(Storage::in_memory(), Some("gym".into()));
        store.write_collection(Key::Users, &[item("a", 1)]).unwrap();
        assert!(store.raw().get("gym:Users").unwrap().is_some());
        assert!(store.raw().get("Users").unwrap().is_none());
    }

    #[test]
    fn test_blank_namespace_is_ignored() {
        let store = Store::with_namespace(Storage::in_memory(), Some("  ".into()));
        assert_eq!(store.key_name(Key::Session), "Session");
    }

    #[test]
    fn test_read_record_reports_corruption() {
        let store = Store::in_memory();
        store.raw().set("Session", "garbage").unwrap();
        let err = store.read_record::<Item>(Key::Session).unwrap_err();
        assert!(matches!(err, IronfitError::StorageParse { .. }));
    }

    #[test]
    fn test_record_roundtrip() {
        let store = Store::in_memory();
        assert!(store.read_record::<Item>(Key::Session).unwrap().is_none());
        store.write_record(Key::Session, &item("s", 9)).unwrap();
        assert_eq!(
            store.read_record::<Item>(Key::Session).unwrap(),
            Some(item("s", 9))
        );
    }

    #[test]
    fn test_flag() {
        let store = Store::in_memory();
        assert!(!store.read_flag(Key::MockDataSeeded).unwrap());
        store.write_flag(Key::MockDataSeeded, true).unwrap();
        assert!(store.read_flag(Key::MockDataSeeded).unwrap());
        store.raw().set("MockDataSeeded", "yes").unwrap();
        assert!(!store.read_flag(Key::MockDataSeeded).unwrap());
    }
}

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use capsule_codec::{decode, encode, DecodeError, EncodeError};
use capsule_storage::{Storage, StorageError};
use capsule_types::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CapsuleConfig;
use crate::error::{CapsuleError, CapsuleResult, SaveCause};

/// Separator between a capsule's prefix and its keys in the backing store.
pub const DELIMITER: char = '_';

/// A namespaced view of a shared backing store.
///
/// Keys are stored as `<prefix>_<key>`. The capsule tracks which of its keys
/// exist: the set is rebuilt from the store when the capsule is created and
/// then updated by every [`set`](Self::set) and [`remove`](Self::remove).
/// Writes made to the store by anyone else after construction are not seen
/// by the tracked set.
///
/// A failed `set` still records the key as known, so [`flush`](Self::flush)
/// also attempts to remove it.
pub struct Capsule<S: Storage + ?Sized> {
    store: Arc<S>,
    prefix: String,
    config: CapsuleConfig,
    keys: BTreeSet<String>,
}

impl<S: Storage + ?Sized> Capsule<S> {
    /// Open a capsule with no defaults and the default configuration.
    pub fn new(store: Arc<S>, prefix: impl Into<String>) -> CapsuleResult<Self> {
        Self::with_config(store, prefix, Vec::<(String, Value)>::new(), CapsuleConfig::default())
    }

    /// Open a capsule, writing each default whose key is not yet stored.
    pub fn with_defaults<I, K>(
        store: Arc<S>,
        prefix: impl Into<String>,
        defaults: I,
    ) -> CapsuleResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::with_config(store, prefix, defaults, CapsuleConfig::default())
    }

    /// Open a capsule with explicit defaults and configuration.
    ///
    /// Defaults never overwrite stored values. Once they are applied the
    /// tracked key set is rebuilt by enumerating the whole store.
    pub fn with_config<I, K>(
        store: Arc<S>,
        prefix: impl Into<String>,
        defaults: I,
        config: CapsuleConfig,
    ) -> CapsuleResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut capsule = Self {
            store,
            prefix: prefix.into(),
            config,
            keys: BTreeSet::new(),
        };
        capsule.set_defaults(defaults)?;
        capsule.sync()?;
        Ok(capsule)
    }

    fn set_defaults<I, K>(&mut self, defaults: I) -> CapsuleResult<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in defaults {
            let key = key.into();
            if !self.has(&key)? {
                self.set(&key, value)?;
            }
        }
        Ok(())
    }

    fn sync(&mut self) -> CapsuleResult<()> {
        let all = self.store.keys().map_err(|e| self.storage_error(e))?;
        let prefix_del = self.prefix_del();
        let keys: BTreeSet<String> = all
            .iter()
            .filter(|full| full.starts_with(&prefix_del))
            .map(|full| self.unprefix_key(full))
            .collect();
        debug!(prefix = %self.prefix, scanned = all.len(), known = keys.len(), "synced capsule keys");
        self.keys = keys;
        Ok(())
    }

    // ---- Key helpers ----

    fn prefix_del(&self) -> String {
        format!("{}{DELIMITER}", self.prefix)
    }

    /// The store key for `key`: `<prefix>_<key>`.
    pub fn prefix_key(&self, key: &str) -> String {
        format!("{}{DELIMITER}{key}", self.prefix)
    }

    /// Strip `<prefix>_` from the front of a store key.
    ///
    /// Keys without that prefix are returned unchanged.
    pub fn unprefix_key(&self, full_key: &str) -> String {
        full_key
            .strip_prefix(&self.prefix_del())
            .unwrap_or(full_key)
            .to_string()
    }

    // ---- Accessors ----

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn config(&self) -> &CapsuleConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Keys this capsule believes exist, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Whether `key` is in the tracked key set. Does not consult the store.
    pub fn is_known(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    // ---- Operations ----

    /// Whether the store currently holds an entry for `key`.
    pub fn has(&self, key: &str) -> CapsuleResult<bool> {
        self.store
            .has(&self.prefix_key(key))
            .map_err(|e| self.storage_error(e))
    }

    /// Read and decode `key`, or return `default` if it is not stored.
    ///
    /// A stored entry that does not decode is reported as
    /// [`CapsuleError::Load`] and left in the store untouched.
    pub fn get(&self, key: &str, default: Value) -> CapsuleResult<Value> {
        if !self.has(key)? {
            return Ok(default);
        }
        let text = self
            .store
            .get_item(&self.prefix_key(key))
            .map_err(|e| self.storage_error(e))?;
        let Some(text) = text else {
            return Ok(default);
        };

        decode(&text, &self.config.transform_options()).map_err(|source| {
            warn!(prefix = %self.prefix, key, error = %source, "could not load item");
            self.load_error(key, source)
        })
    }

    /// Encode `value` and write it under `key`.
    ///
    /// The key is recorded as known before the write is attempted and stays
    /// known if the write fails.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> CapsuleResult<()> {
        let value = value.into();
        self.keys.insert(key.to_string());

        let full_key = self.prefix_key(key);
        let written = encode(&value, &self.config.transform_options())
            .map_err(SaveCause::from)
            .and_then(|text| self.store.set_item(&full_key, &text).map_err(SaveCause::from));

        match written {
            Ok(()) => {
                debug!(prefix = %self.prefix, key, "saved item");
                Ok(())
            }
            Err(cause) => {
                warn!(prefix = %self.prefix, key, error = %cause, "failed to save item");
                Err(CapsuleError::Save {
                    prefix: self.prefix.clone(),
                    key: key.to_string(),
                    value: value.to_string(),
                    source: cause,
                })
            }
        }
    }

    /// Forget `key` and delete it from the store. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> CapsuleResult<()> {
        self.keys.remove(key);
        let existed = self
            .store
            .remove_item(&self.prefix_key(key))
            .map_err(|e| self.storage_error(e))?;
        debug!(prefix = %self.prefix, key, existed, "removed item");
        Ok(())
    }

    /// Remove every tracked key from the store.
    pub fn flush(&mut self) -> CapsuleResult<()> {
        let snapshot: Vec<String> = self.keys.iter().cloned().collect();
        for key in &snapshot {
            self.remove(key)?;
        }
        debug!(prefix = %self.prefix, removed = snapshot.len(), "flushed capsule");
        Ok(())
    }

    // ---- Typed helpers ----

    /// Read `key` into a concrete type. Absent or undefined entries are `None`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> CapsuleResult<Option<T>> {
        let value = self.get(key, Value::Undefined)?;
        if value.is_undefined() {
            return Ok(None);
        }
        value
            .deserialize_into()
            .map(Some)
            .map_err(|e| self.load_error(key, DecodeError::Type(e)))
    }

    /// Write any serializable value under `key`.
    pub fn set_as<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> CapsuleResult<()> {
        match Value::from_serialize(value) {
            Ok(value) => self.set(key, value),
            Err(e) => {
                self.keys.insert(key.to_string());
                Err(CapsuleError::Save {
                    prefix: self.prefix.clone(),
                    key: key.to_string(),
                    value: std::any::type_name::<T>().to_string(),
                    source: SaveCause::Encode(EncodeError::Type(e)),
                })
            }
        }
    }

    // ---- Errors ----

    fn storage_error(&self, source: StorageError) -> CapsuleError {
        CapsuleError::Storage {
            prefix: self.prefix.clone(),
            source,
        }
    }

    fn load_error(&self, key: &str, source: DecodeError) -> CapsuleError {
        CapsuleError::Load {
            prefix: self.prefix.clone(),
            key: key.to_string(),
            source,
        }
    }
}

impl<S: Storage + ?Sized> fmt::Debug for Capsule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule")
            .field("prefix", &self.prefix)
            .field("config", &self.config)
            .field("keys", &self.keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capsule_codec::TransformOptions;
    use capsule_storage::{FileStorage, InMemoryStorage, UnavailableStorage};
    use capsule_types::{date_from_millis, Map};

    fn store() -> Arc<InMemoryStorage> {
        Arc::new(InMemoryStorage::new())
    }

    fn wrapped(value: &str) -> String {
        encode(&Value::from(value), &TransformOptions::none()).unwrap()
    }

    fn known(capsule: &Capsule<InMemoryStorage>) -> Vec<&str> {
        capsule.keys().collect()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn sets_the_prefix() {
        let capsule = Capsule::new(store(), "test").unwrap();
        assert_eq!(capsule.prefix(), "test");
        assert_eq!(capsule.prefix_del(), "test_");
    }

    #[test]
    fn reads_prefixed_keys_from_the_store() {
        let store = store();
        store.set_item("key0", "value0").unwrap();
        store.set_item("test:key1", "value1").unwrap();
        store.set_item("test_key2", "value2").unwrap();
        store.set_item("test_key3", "value3").unwrap();

        let capsule = Capsule::new(store, "test").unwrap();
        assert_eq!(known(&capsule), ["key2", "key3"]);
    }

    #[test]
    fn writes_initial_data() {
        let store = store();
        store.set_item("test_key3", "value3").unwrap();

        let capsule =
            Capsule::with_defaults(store.clone(), "test", [("key2", Value::from("initial-value-2"))])
                .unwrap();

        assert_eq!(
            store.get_item("test_key2").unwrap().as_deref(),
            Some(r#"{"__data__":"initial-value-2"}"#)
        );
        assert_eq!(known(&capsule), ["key2", "key3"]);
    }

    #[test]
    fn initial_data_never_overwrites_saved_data() {
        let store = store();
        store
            .set_item("test_key2", r#"{"__data__":"initial-value-previous"}"#)
            .unwrap();

        Capsule::with_defaults(store.clone(), "test", [("key2", Value::from("initial-value-2"))])
            .unwrap();

        assert_eq!(
            store.get_item("test_key2").unwrap().as_deref(),
            Some(r#"{"__data__":"initial-value-previous"}"#)
        );
    }

    #[test]
    fn unavailable_store_fails_at_construction() {
        let err = Capsule::new(Arc::new(UnavailableStorage), "test").unwrap_err();
        assert!(matches!(
            err,
            CapsuleError::Storage { source: StorageError::Unavailable, .. }
        ));
        assert_eq!(err.prefix(), Some("test"));
    }

    #[test]
    fn defaults_that_cannot_be_saved_fail_construction() {
        let store = Arc::new(InMemoryStorage::with_quota(8));
        let err = Capsule::with_defaults(store, "test", [("big", Value::from("x".repeat(64)))])
            .unwrap_err();
        assert!(matches!(err, CapsuleError::Save { .. }));
    }

    #[test]
    fn accepts_a_trait_object_store() {
        let shared: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
        let mut capsule = Capsule::new(shared.clone(), "dyn").unwrap();
        capsule.set("k", "v").unwrap();
        assert!(shared.has("dyn_k").unwrap());
    }

    // -----------------------------------------------------------------------
    // Prefix helpers
    // -----------------------------------------------------------------------

    #[test]
    fn prefix_key_adds_prefix_and_delimiter() {
        let capsule = Capsule::new(store(), "test").unwrap();
        assert_eq!(capsule.prefix_key("key"), "test_key");
    }

    #[test]
    fn unprefix_key_removes_prefix_and_delimiter() {
        let capsule = Capsule::new(store(), "test").unwrap();
        assert_eq!(capsule.unprefix_key("test_key"), "key");
        assert_eq!(capsule.unprefix_key("test_test_key"), "test_key");
    }

    #[test]
    fn empty_prefix_still_uses_the_delimiter() {
        let mut capsule = Capsule::new(store(), "").unwrap();
        assert_eq!(capsule.prefix_key("key"), "_key");
        capsule.set("key", 1).unwrap();
        assert!(capsule.store().has("_key").unwrap());
    }

    // -----------------------------------------------------------------------
    // has / get
    // -----------------------------------------------------------------------

    #[test]
    fn has_reflects_the_store() {
        let capsule = Capsule::with_defaults(store(), "test", [("foo", Value::from("bar"))]).unwrap();
        assert!(capsule.has("foo").unwrap());
        assert!(!capsule.has("foobar").unwrap());
    }

    #[test]
    fn has_sees_writes_made_outside_the_capsule() {
        let store = store();
        let capsule = Capsule::new(store.clone(), "test").unwrap();
        store.set_item("test_late", &wrapped("x")).unwrap();
        assert!(capsule.has("late").unwrap());
        assert!(!capsule.is_known("late"));
    }

    #[test]
    fn get_returns_default_for_missing_keys() {
        let capsule = Capsule::new(store(), "test").unwrap();
        assert_eq!(capsule.get("foo", Value::Undefined).unwrap(), Value::Undefined);
        assert_eq!(
            capsule.get("foo", Value::from("defaultValue!")).unwrap(),
            Value::from("defaultValue!")
        );
    }

    #[test]
    fn get_returns_stored_values_over_defaults() {
        let capsule = Capsule::with_defaults(store(), "test", [("foo", Value::from("bar"))]).unwrap();
        assert_eq!(capsule.get("foo", Value::Undefined).unwrap(), Value::from("bar"));
        assert_eq!(
            capsule.get("foo", Value::from("defaultValue!")).unwrap(),
            Value::from("bar")
        );
    }

    #[test]
    fn get_keeps_structure() {
        let mut counts = Map::new();
        counts.insert("count".into(), Value::from(5));
        let capsule =
            Capsule::with_defaults(store(), "test", [("foo", Value::Object(counts))]).unwrap();

        let value = capsule.get("foo", Value::Undefined).unwrap();
        assert_eq!(value.get("count"), Some(&Value::from(5)));
    }

    #[test]
    fn get_reports_malformed_entries_and_leaves_them() {
        let store = store();
        let capsule =
            Capsule::with_defaults(store.clone(), "test", [("foo", Value::from("bar"))]).unwrap();
        store.set_item("test_foo", r#"{"__data__":"malformed"#).unwrap();

        let err = capsule.get("foo", Value::Undefined).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Capsule (test) could not load the item with key: foo"
        );
        assert!(matches!(err, CapsuleError::Load { .. }));
        assert_eq!(err.key(), Some("foo"));
        assert_eq!(
            store.get_item("test_foo").unwrap().as_deref(),
            Some(r#"{"__data__":"malformed"#)
        );
    }

    // -----------------------------------------------------------------------
    // set
    // -----------------------------------------------------------------------

    #[test]
    fn set_registers_the_key() {
        let mut capsule = Capsule::new(store(), "test").unwrap();
        assert!(!capsule.is_known("foo"));
        assert!(!capsule.has("foo").unwrap());

        capsule.set("foo", "bar").unwrap();

        assert!(capsule.is_known("foo"));
        assert!(capsule.has("foo").unwrap());
    }

    #[test]
    fn set_writes_the_envelope() {
        let store = store();
        let mut capsule = Capsule::new(store.clone(), "test").unwrap();
        assert_eq!(store.get_item("test_foo").unwrap(), None);

        capsule.set("foo", "bar").unwrap();

        assert_eq!(store.get_item("test_foo").unwrap(), Some(wrapped("bar")));
        assert_eq!(capsule.get("foo", Value::Undefined).unwrap(), Value::from("bar"));
    }

    #[test]
    fn set_overwrites() {
        let store = store();
        let mut capsule =
            Capsule::with_defaults(store.clone(), "test", [("foo", Value::from("notbar"))]).unwrap();
        assert_eq!(store.get_item("test_foo").unwrap(), Some(wrapped("notbar")));

        capsule.set("foo", "bar").unwrap();

        assert_eq!(store.get_item("test_foo").unwrap(), Some(wrapped("bar")));
        assert_eq!(capsule.get("foo", Value::Undefined).unwrap(), Value::from("bar"));
    }

    #[test]
    fn set_undefined_stores_an_empty_envelope() {
        let store = store();
        let mut capsule = Capsule::new(store.clone(), "test").unwrap();
        capsule.set("gone", Value::Undefined).unwrap();

        assert_eq!(store.get_item("test_gone").unwrap().as_deref(), Some("{}"));
        assert!(capsule.has("gone").unwrap());
        assert_eq!(
            capsule.get("gone", Value::from("fallback")).unwrap(),
            Value::Undefined
        );
    }

    #[test]
    fn rejected_write_is_a_save_error_and_key_stays_known() {
        let store = Arc::new(InMemoryStorage::with_quota(32));
        let mut capsule = Capsule::new(store.clone(), "test").unwrap();

        let err = capsule.set("big", "x".repeat(64)).unwrap_err();

        match &err {
            CapsuleError::Save { prefix, key, source, .. } => {
                assert_eq!(prefix, "test");
                assert_eq!(key, "big");
                assert!(matches!(
                    source,
                    SaveCause::Store(StorageError::QuotaExceeded { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Capsule (test) failed to save '{ big: xxx"));
        assert!(capsule.is_known("big"));
        assert!(!capsule.has("big").unwrap());
    }

    #[test]
    fn unrepresentable_value_is_a_save_error() {
        let store = store();
        let mut capsule = Capsule::new(store.clone(), "test").unwrap();

        let err = capsule.set("huge", Value::BigInt(1 << 70)).unwrap_err();

        assert!(matches!(
            err,
            CapsuleError::Save { source: SaveCause::Encode(_), .. }
        ));
        assert!(capsule.is_known("huge"));
        assert_eq!(store.get_item("test_huge").unwrap(), None);
    }

    // -----------------------------------------------------------------------
    // remove / flush
    // -----------------------------------------------------------------------

    #[test]
    fn remove_unregisters_and_deletes() {
        let store = store();
        let mut capsule =
            Capsule::with_defaults(store.clone(), "test", [("foo", Value::from("bar"))]).unwrap();
        assert!(capsule.is_known("foo"));

        capsule.remove("foo").unwrap();

        assert!(!capsule.is_known("foo"));
        assert!(!capsule.has("foo").unwrap());
        assert_eq!(store.get_item("test_foo").unwrap(), None);
        assert_eq!(capsule.get("foo", Value::Undefined).unwrap(), Value::Undefined);
    }

    #[test]
    fn removing_an_absent_key_is_a_no_op() {
        let mut capsule = Capsule::new(store(), "test").unwrap();
        capsule.remove("never-set").unwrap();
        assert!(known(&capsule).is_empty());
    }

    #[test]
    fn flush_removes_every_tracked_key() {
        let store = store();
        store.set_item("other_keep", &wrapped("mine")).unwrap();
        let mut capsule = Capsule::with_defaults(
            store.clone(),
            "test",
            [("foo", Value::from("bar")), ("second", Value::from("key"))],
        )
        .unwrap();
        assert_eq!(known(&capsule), ["foo", "second"]);

        capsule.flush().unwrap();

        assert!(known(&capsule).is_empty());
        assert!(!capsule.has("foo").unwrap());
        assert!(!capsule.has("second").unwrap());
        assert_eq!(store.keys().unwrap(), vec!["other_keep"]);
    }

    #[test]
    fn flush_twice_is_idempotent() {
        let store = store();
        let mut capsule =
            Capsule::with_defaults(store.clone(), "test", [("foo", Value::from("bar"))]).unwrap();

        capsule.flush().unwrap();
        let after_first = store.keys().unwrap();
        capsule.flush().unwrap();

        assert_eq!(store.keys().unwrap(), after_first);
        assert!(known(&capsule).is_empty());
    }

    // -----------------------------------------------------------------------
    // Isolation and sharing
    // -----------------------------------------------------------------------

    #[test]
    fn distinct_prefixes_do_not_see_each_other() {
        let store = store();
        let mut first = Capsule::new(store.clone(), "first").unwrap();
        let second = Capsule::new(store.clone(), "second").unwrap();

        first.set("shared", "one").unwrap();

        assert!(first.has("shared").unwrap());
        assert!(!second.has("shared").unwrap());
    }

    #[test]
    fn new_capsule_picks_up_keys_written_by_another() {
        let store = store();
        let mut writer = Capsule::new(store.clone(), "app").unwrap();
        writer.set("a", 1).unwrap();
        writer.set("b", 2).unwrap();

        let reader = Capsule::new(store, "app").unwrap();
        assert_eq!(known(&reader), ["a", "b"]);
        assert_eq!(reader.get("b", Value::Undefined).unwrap(), Value::from(2));
    }

    #[test]
    fn values_persist_through_a_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store = Arc::new(FileStorage::open(&path).unwrap());
            let mut capsule = Capsule::new(store, "app").unwrap();
            capsule.set("launched", date_from_millis(1_657_196_329_497)).unwrap();
        }

        let store = Arc::new(FileStorage::open(&path).unwrap());
        let capsule = Capsule::new(store, "app").unwrap();
        assert_eq!(
            capsule.get("launched", Value::Undefined).unwrap(),
            date_from_millis(1_657_196_329_497)
        );
    }

    // -----------------------------------------------------------------------
    // Dates and configuration
    // -----------------------------------------------------------------------

    #[test]
    fn dates_round_trip_by_default() {
        let store = store();
        let mut capsule = Capsule::new(store.clone(), "test").unwrap();
        let date = date_from_millis(1_657_196_329_497);

        capsule.set("when", date.clone()).unwrap();

        assert_eq!(
            store.get_item("test_when").unwrap().as_deref(),
            Some(r#"{"__data__":"2022-07-07T12:18:49.497Z","__type__":"date"}"#)
        );
        assert_eq!(capsule.get("when", Value::Undefined).unwrap(), date);
    }

    #[test]
    fn disabled_hydration_keeps_dates_as_text() {
        let store = store();
        let config = CapsuleConfig { hydrate_dates: false };
        let mut plain =
            Capsule::with_config(store.clone(), "test", Vec::<(String, Value)>::new(), config)
                .unwrap();

        plain.set("when", date_from_millis(0)).unwrap();

        assert_eq!(
            store.get_item("test_when").unwrap().as_deref(),
            Some(r#"{"__data__":"1970-01-01T00:00:00.000Z"}"#)
        );
        assert_eq!(
            plain.get("when", Value::Undefined).unwrap(),
            Value::from("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn reader_without_hydration_sees_tagged_dates_as_text() {
        let store = store();
        let mut writer = Capsule::new(store.clone(), "test").unwrap();
        writer.set("when", date_from_millis(0)).unwrap();

        let config = CapsuleConfig { hydrate_dates: false };
        let reader =
            Capsule::with_config(store, "test", Vec::<(String, Value)>::new(), config).unwrap();
        assert_eq!(
            reader.get("when", Value::Undefined).unwrap(),
            Value::from("1970-01-01T00:00:00.000Z")
        );
    }

    // -----------------------------------------------------------------------
    // Typed helpers
    // -----------------------------------------------------------------------

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Window {
        width: u32,
        height: u32,
        title: String,
    }

    #[test]
    fn typed_values_round_trip() {
        let mut capsule = Capsule::new(store(), "ui").unwrap();
        let window = Window { width: 800, height: 600, title: "main".into() };

        capsule.set_as("window", &window).unwrap();

        assert_eq!(capsule.get_as::<Window>("window").unwrap(), Some(window));
        assert_eq!(capsule.get_as::<Window>("missing").unwrap(), None);
    }

    #[test]
    fn typed_read_of_wrong_shape_is_a_load_error() {
        let mut capsule = Capsule::new(store(), "ui").unwrap();
        capsule.set("window", "not a window").unwrap();

        let err = capsule.get_as::<Window>("window").unwrap_err();
        assert!(matches!(
            err,
            CapsuleError::Load { source: DecodeError::Type(_), .. }
        ));
    }

    #[test]
    fn typed_dates_read_into_chrono() {
        let mut capsule = Capsule::new(store(), "ui").unwrap();
        let Value::Date(dt) = date_from_millis(1_657_196_329_497) else {
            panic!("expected a valid date");
        };
        capsule.set("opened", dt).unwrap();

        let back: Option<chrono::DateTime<chrono::Utc>> = capsule.get_as("opened").unwrap();
        assert_eq!(back, Some(dt));
    }
}

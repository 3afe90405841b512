use crate::error::Result;

/// Durable, synchronous, string-keyed medium. Values are opaque strings;
/// all structure lives in the layer above.
///
/// Implementations never interpret values, so a corrupt JSON payload is
/// stored and returned byte-for-byte.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite `key` wholesale.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

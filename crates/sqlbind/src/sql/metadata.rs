//! Caller-attached key/value annotations on a builder.
//!
//! Metadata is merged, never overwritten: re-adding a key with an equal value
//! is a no-op, re-adding it with a different value is a
//! [`SqlError::MetadataConflict`]. Embedding a builder merges its table into
//! the parent's at embed time.

use super::builder::SqlQueryBuilder;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry as MapEntry;

/// Metadata table. Keys are unique; ordering carries no meaning.
pub type Metadata = BTreeMap<String, Value>;

fn merge_one(table: &mut Metadata, key: String, value: Value) -> SqlResult<()> {
    match table.entry(key) {
        MapEntry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        MapEntry::Occupied(slot) if *slot.get() == value => Ok(()),
        MapEntry::Occupied(slot) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %slot.key(), existing = %slot.get(), incoming = %value, "metadata conflict");
            Err(SqlError::metadata_conflict(
                slot.key().clone(),
                slot.get().clone(),
                value,
            ))
        }
    }
}

impl SqlQueryBuilder {
    /// Attached metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Add one metadata entry.
    ///
    /// # Example
    /// ```ignore
    /// let mut q = SqlQueryBuilder::from("SELECT 1");
    /// q.add_metadata("DbName", "Db1")?.add_metadata("DbName", "Db1")?;
    /// assert!(q.add_metadata("DbName", "Db2").is_err());
    /// ```
    pub fn add_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        merge_one(&mut self.metadata, key.into(), value.into())?;
        Ok(self)
    }

    /// Add metadata entries in iteration order.
    ///
    /// Stops at the first conflict; entries applied before it are kept.
    pub fn add_metadata_all<K, V>(
        &mut self,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> SqlResult<&mut Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            merge_one(&mut self.metadata, key.into(), value.into())?;
        }
        Ok(self)
    }

    /// Add one metadata entry (consuming version of [`add_metadata`]).
    ///
    /// [`add_metadata`]: SqlQueryBuilder::add_metadata
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> SqlResult<Self> {
        self.add_metadata(key, value)?;
        Ok(self)
    }

    /// Add metadata entries (consuming version of [`add_metadata_all`]).
    ///
    /// [`add_metadata_all`]: SqlQueryBuilder::add_metadata_all
    pub fn with_metadata_all<K, V>(
        mut self,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> SqlResult<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_metadata_all(entries)?;
        Ok(self)
    }
}

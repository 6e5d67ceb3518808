use camino::Utf8Path;
use tracing::info;

use crate::error::FeedError;
use crate::naming::destination_key;
use crate::object_store::ObjectStore;

/// Upload step: derives the cadence- and date-partitioned storage key for a
/// staged file and pushes it to the object store.
pub struct StoreWriter<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> StoreWriter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn write(
        &self,
        src: &Utf8Path,
        local_file_name: &str,
        store_file_name: &str,
        archive: &str,
    ) -> Result<(), FeedError> {
        info!("writing file [{store_file_name}]");
        let key = destination_key(store_file_name, archive);
        let local_path = src.join(local_file_name);
        let bytes = self.store.put(&key, &local_path)?;
        info!("uploaded file [{key}] of size [{bytes}] successfully");
        Ok(())
    }
}

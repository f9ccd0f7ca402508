//! Per-category folder resolution: look up the category's folder under the
//! configured parent, creating it on first use.
//!
//! Lookup-then-create is a check-then-act race, so resolution is serialized
//! per category name with an async lock; two concurrent first uploads to a
//! fresh category produce one folder, not two. Resolved ids are not cached:
//! a folder deleted out-of-band is simply recreated on the next upload.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::google::drive::{DriveClient, DriveError};
use crate::models::Category;

pub struct FolderResolver {
    drive: Arc<DriveClient>,
    parent_id: String,
    locks: Mutex<HashMap<&'static str, Arc<tokio::sync::Mutex<()>>>>,
}

impl FolderResolver {
    pub fn new(drive: Arc<DriveClient>, parent_id: String) -> Self {
        Self {
            drive,
            parent_id,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Folder id for the category, creating the folder when none exists.
    /// When Drive reports more than one match the first wins.
    pub async fn resolve(&self, category: Category) -> Result<String, DriveError> {
        let name = category.label();
        let lock = {
            let mut locks = self.locks.lock().expect("folder lock map poisoned");
            locks.entry(name).or_default().clone()
        };
        let _guard = lock.lock().await;

        if let Some(id) = self.drive.find_folder(name, &self.parent_id).await? {
            return Ok(id);
        }
        self.drive.create_folder(name, &self.parent_id).await
    }
}

//! Per-category tab state for an uploader front-end.
//!
//! Each tab tracks its local selection, preview references for that
//! selection, and the server-confirmed id/link pairs from the most recent
//! upload. State persists across tab switches for the session; a new
//! selection replaces the previous preview set.
//!
//! Deletion is keyed by remote id, not by array position: the confirmed
//! entry carries its id and link, so removing a file cannot target the wrong
//! entry when the local selection drifted out of step with the last upload
//! response (the positional scheme this replaces broke exactly there).

use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::{Category, UploadedFile};

/// One server-confirmed upload, kept alongside the name it was selected as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedUpload {
    pub id: String,
    pub link: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct TabState {
    pub selected: Vec<PathBuf>,
    /// Local preview references for the current selection (paths here; a
    /// browser front-end would hold object URLs).
    pub previews: Vec<String>,
    pub uploads: Vec<ConfirmedUpload>,
}

impl TabState {
    /// Replace the selection and its previews. Confirmed uploads are kept:
    /// they describe remote state, not the selection.
    pub fn select_files(&mut self, paths: Vec<PathBuf>) {
        self.previews = paths.iter().map(|p| p.display().to_string()).collect();
        self.selected = paths;
    }

    /// Record the server's response for the batch just submitted, overwriting
    /// the previous batch's entries.
    pub fn apply_upload(&mut self, files: &[UploadedFile]) {
        self.uploads = files
            .iter()
            .enumerate()
            .map(|(i, file)| ConfirmedUpload {
                id: file.id.clone(),
                link: file.web_view_link.clone(),
                name: self
                    .selected
                    .get(i)
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            })
            .collect();
    }

    /// Drop the confirmed entry with this remote id, along with its selection
    /// and preview entries when they still line up. Returns false when no
    /// entry matches.
    pub fn remove_by_id(&mut self, file_id: &str) -> bool {
        let Some(index) = self.uploads.iter().position(|u| u.id == file_id) else {
            return false;
        };
        self.uploads.remove(index);
        if index < self.selected.len() {
            self.selected.remove(index);
        }
        if index < self.previews.len() {
            self.previews.remove(index);
        }
        true
    }
}

/// The five tabs of the uploader UI.
#[derive(Debug, Clone)]
pub struct TabBoard {
    pub active: Category,
    tabs: HashMap<Category, TabState>,
}

impl TabBoard {
    pub fn new() -> Self {
        Self {
            active: Category::TabOne,
            tabs: Category::ALL
                .iter()
                .map(|c| (*c, TabState::default()))
                .collect(),
        }
    }

    pub fn switch_to(&mut self, category: Category) {
        self.active = category;
    }

    pub fn tab(&self, category: Category) -> &TabState {
        &self.tabs[&category]
    }

    pub fn tab_mut(&mut self, category: Category) -> &mut TabState {
        self.tabs.get_mut(&category).expect("all categories present")
    }

    pub fn active_tab_mut(&mut self) -> &mut TabState {
        self.tab_mut(self.active)
    }
}

impl Default for TabBoard {
    fn default() -> Self {
        Self::new()
    }
}

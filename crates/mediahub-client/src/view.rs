//! Client-side view state kept in step with batch results, so the UI does
//! not need a full refetch after every operation.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use mediahub_core::types::RecordId;
use mediahub_entity::batch::{BatchMoveOutcome, DeleteOutcome};
use mediahub_entity::file::FileRecord;
use mediahub_entity::file::normalize::from_record_store;
use mediahub_entity::folder::tree::{build_tree, derive_folder_paths};
use mediahub_entity::folder::{FolderNode, FolderRecord};

use crate::folder::FolderClient;
use crate::media::MediaClient;

/// Files and folders as the UI currently shows them.
#[derive(Debug, Clone, Default)]
pub struct LocalView {
    pub files: Vec<FileRecord>,
    pub folders: Vec<FolderRecord>,
}

impl LocalView {
    /// A view over already fetched state.
    pub fn new(files: Vec<FileRecord>, folders: Vec<FolderRecord>) -> Self {
        Self { files, folders }
    }

    /// Replace everything with freshly fetched state. Fetch failures leave
    /// the corresponding list empty.
    pub async fn refresh(&mut self, media: &MediaClient, folders: &FolderClient) {
        let (files, folder_list) =
            tokio::join!(media.fetch_all_files(), folders.fetch_all_folders());
        debug!(files = files.len(), folders = folder_list.len(), "View refreshed");
        self.files = files;
        self.folders = folder_list;
    }

    /// Apply a batch move. Only the files the outcome reports as moved get
    /// the new `folder_path`; failed ones keep their old location.
    pub fn apply_move(&mut self, outcome: &BatchMoveOutcome, folder_path: &str) -> usize {
        let moved: Vec<&RecordId> = outcome.moved_ids().collect();
        let mut changed = 0;
        for file in &mut self.files {
            if moved.iter().any(|id| id.same_as(&file.id)) {
                file.folder_path = folder_path.to_string();
                changed += 1;
            }
        }
        changed
    }

    /// Drop the files of a successful batch delete.
    pub fn apply_delete(&mut self, outcomes: &[DeleteOutcome]) -> usize {
        let before = self.files.len();
        self.files.retain(|file| {
            !outcomes
                .iter()
                .any(|o| o.success && o.id.same_as(&file.id))
        });
        before - self.files.len()
    }

    /// Replace a file with the row the record store returned for it.
    /// Returns `false` when the row does not normalize or is not in view.
    pub fn apply_record(&mut self, row: &Value) -> bool {
        let Some(updated) = from_record_store(row) else {
            return false;
        };
        match self.files.iter_mut().find(|f| f.id.same_as(&updated.id)) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Add a newly created folder, replacing any folder with the same path.
    pub fn add_folder(&mut self, folder: FolderRecord) {
        self.folders.retain(|f| f.path != folder.path);
        self.folders.push(folder);
    }

    /// Remove a folder and everything below it.
    pub fn remove_folder(&mut self, path: &str) -> usize {
        let path = path.trim_matches('/');
        let before = self.folders.len();
        self.folders.retain(|f| !is_at_or_below(&f.path, path));
        before - self.folders.len()
    }

    /// Files directly in `folder_path`; an empty path means the root.
    pub fn files_in(&self, folder_path: &str) -> Vec<&FileRecord> {
        let folder_path = folder_path.trim_matches('/');
        self.files
            .iter()
            .filter(|f| {
                if folder_path.is_empty() {
                    f.is_in_root()
                } else {
                    f.folder_path.trim_matches('/') == folder_path
                }
            })
            .collect()
    }

    /// Every known folder path: stored folders plus the ones implied by
    /// file locations. Sorted.
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths: BTreeSet<String> = self
            .folders
            .iter()
            .map(|f| f.path.trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect();
        paths.extend(derive_folder_paths(&self.files));
        paths.into_iter().collect()
    }

    /// Stored folders as a tree.
    pub fn folder_tree(&self) -> Vec<FolderNode> {
        build_tree(&self.folders)
    }
}

fn is_at_or_below(candidate: &str, path: &str) -> bool {
    let candidate = candidate.trim_matches('/');
    candidate == path
        || candidate
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}

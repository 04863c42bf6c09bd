//! Folder tree assembly.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::model::FolderRecord;
use crate::file::FileRecord;

/// A folder with its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: FolderRecord,
    /// Direct sub-folders.
    pub children: Vec<FolderNode>,
}

/// Build a forest from a flat folder list. Folders whose parent is not in
/// the list are promoted to the top level. Input order is preserved among
/// siblings.
pub fn build_tree(folders: &[FolderRecord]) -> Vec<FolderNode> {
    let known: HashMap<&str, usize> = folders
        .iter()
        .enumerate()
        .map(|(i, f)| (f.path.as_str(), i))
        .collect();

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, folder) in folders.iter().enumerate() {
        let parent = folder.parent_path.as_str();
        match known.get(parent) {
            Some(&p) if !folder.is_top_level() && p != i => {
                children.entry(p).or_default().push(i)
            }
            _ => roots.push(i),
        }
    }

    fn assemble(
        idx: usize,
        folders: &[FolderRecord],
        children: &HashMap<usize, Vec<usize>>,
        depth: usize,
    ) -> FolderNode {
        let kids = if depth > folders.len() {
            Vec::new()
        } else {
            children
                .get(&idx)
                .map(|c| {
                    c.iter()
                        .map(|&k| assemble(k, folders, children, depth + 1))
                        .collect()
                })
                .unwrap_or_default()
        };
        FolderNode {
            folder: folders[idx].clone(),
            children: kids,
        }
    }

    roots
        .into_iter()
        .map(|i| assemble(i, folders, &children, 0))
        .collect()
}

/// Every folder path implied by the files' `folder_path`, including all
/// ancestors, sorted.
pub fn derive_folder_paths(files: &[FileRecord]) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for file in files {
        let mut current = String::new();
        for part in file.folder_path.split('/').filter(|p| !p.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            paths.insert(current.clone());
        }
    }
    paths.into_iter().collect()
}

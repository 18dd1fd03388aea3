use crate::entry::WalkEntry;
use crate::error::WalkError;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Depth-first iterator over the nodes below a root directory.
///
/// Failures encountered after the root has been inspected are queued and
/// yielded in the order they occurred. Traversal then resumes with the next
/// sibling, so the iterator only finishes once every reachable node has been
/// visited.
pub struct Walker {
    stack: Vec<DirectoryState>,
    pending_errors: VecDeque<WalkError>,
}

impl Walker {
    pub(crate) fn new(root: PathBuf) -> Result<Self, WalkError> {
        debug!(target: "treesync::flist", root = %root.display(), "building file list");

        // The root is resolved so that a linked tree is walked like a real one.
        let metadata =
            fs::metadata(&root).map_err(|error| WalkError::root_metadata(root.clone(), error))?;

        let mut walker = Self {
            stack: Vec::new(),
            pending_errors: VecDeque::new(),
        };

        if metadata.is_dir() {
            walker.push_directory(root, PathBuf::new());
        }

        Ok(walker)
    }

    fn push_directory(&mut self, fs_path: PathBuf, relative_prefix: PathBuf) {
        trace!(target: "treesync::flist", path = %fs_path.display(), "entering directory");
        if let Some(state) = DirectoryState::read(fs_path, relative_prefix, &mut self.pending_errors)
        {
            self.stack.push(state);
        }
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
    ) -> Result<WalkEntry, WalkError> {
        trace!(target: "treesync::flist", path = %relative_path.display(), "processing entry");

        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;

        if metadata.file_type().is_dir() {
            self.push_directory(full_path.clone(), relative_path.clone());
        }

        Ok(WalkEntry {
            full_path,
            relative_path,
            metadata,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(error) = self.pending_errors.pop_front() {
                return Some(Err(error));
            }

            let state = self.stack.last_mut()?;
            let Some(name) = state.next_name() else {
                self.stack.pop();
                continue;
            };
            let full_path = state.fs_path.join(&name);
            let relative_path = state.relative_prefix.join(&name);

            return Some(self.prepare_entry(full_path, relative_path));
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    entries: Vec<OsString>,
    index: usize,
}

impl DirectoryState {
    /// Reads and sorts the names in `fs_path`.
    ///
    /// Returns `None` when the directory cannot be opened at all. Entries that
    /// fail individually are reported through `errors` and left out.
    fn read(
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        errors: &mut VecDeque<WalkError>,
    ) -> Option<Self> {
        let read_dir = match fs::read_dir(&fs_path) {
            Ok(read_dir) => read_dir,
            Err(error) => {
                errors.push_back(WalkError::read_dir(fs_path, error));
                return None;
            }
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => entries.push(entry.file_name()),
                Err(error) => errors.push_back(WalkError::read_dir_entry(fs_path.clone(), error)),
            }
        }
        entries.sort();

        trace!(
            target: "treesync::flist",
            path = %fs_path.display(),
            count = entries.len(),
            "read directory"
        );

        Some(Self {
            fs_path,
            relative_prefix,
            entries,
            index: 0,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        let name = self.entries.get(self.index)?.clone();
        self.index += 1;
        Some(name)
    }
}

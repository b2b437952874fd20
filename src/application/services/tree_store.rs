//! Snapshot persistence service
//!
//! Saves and loads whole-tree snapshots through the `FileSystem` boundary.
//! Each call reads or writes the complete file, so no handle outlives it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DecodeOutcome, FullBinaryTree};
use crate::infrastructure::traits::FileSystem;

/// Service for persisting a [`FullBinaryTree`] as a binary snapshot.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    create_dirs: bool,
}

impl TreeStore {
    /// Create a new store that creates missing parent directories on save.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            create_dirs: true,
        }
    }

    /// Toggle creation of missing parent directories on save.
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Write the snapshot of `tree` to `path`, replacing any existing file.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn try_save(&self, tree: &FullBinaryTree, path: &Path) -> ApplicationResult<()> {
        let bytes = tree.to_bytes()?;
        if self.create_dirs {
            self.fs
                .ensure_parent(path)
                .with_path_context("create parent directory of", path)?;
        }
        self.fs
            .write(path, &bytes)
            .with_path_context("write snapshot", path)?;
        debug!("try_save: {} nodes, {} bytes", tree.len(), bytes.len());
        Ok(())
    }

    /// Replace `tree` with the snapshot stored at `path`.
    ///
    /// The tree is cleared before anything is read, so it is empty when this
    /// returns an error.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn try_load(&self, tree: &mut FullBinaryTree, path: &Path) -> ApplicationResult<DecodeOutcome> {
        tree.clear();
        if !self.fs.exists(path) {
            return Err(ApplicationError::FileNotFound(path.to_path_buf()));
        }
        let bytes = self
            .fs
            .read(path)
            .with_path_context("read snapshot", path)?;

        let outcome = tree.load_bytes(&bytes);
        if !tree.is_full() {
            debug!("try_load: partial nodes {:?}", tree.partial_nodes());
        }
        Ok(outcome)
    }

    /// Save, logging and ignoring any failure.
    pub fn save(&self, tree: &FullBinaryTree, path: &Path) {
        if let Err(e) = self.try_save(tree, path) {
            warn!("save skipped: {}", e);
        }
    }

    /// Load, logging and ignoring any failure. The tree is always cleared first.
    pub fn load(&self, tree: &mut FullBinaryTree, path: &Path) {
        match self.try_load(tree, path) {
            Ok(DecodeOutcome::Complete { .. }) => {}
            Ok(outcome) => warn!("load of {} incomplete: {:?}", path.display(), outcome),
            Err(e) => warn!("load skipped: {}", e),
        }
    }
}

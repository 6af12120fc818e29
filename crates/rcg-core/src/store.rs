//! Store model: a roddyExecutionStore and its run directories.
//!
//! Stores are discovered once from the directory listing. Entries are sorted
//! by name so grouping's first-appearance order does not depend on the order
//! the filesystem returns them in.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use rcg_common::{Error, ParameterSet, Result};
use rcg_config::StoreLayout;

/// One run directory (`exec_*`) inside a roddyExecutionStore.
#[derive(Debug, Clone)]
pub struct ExecutionStore {
    pub roddy_store_path: PathBuf,
    pub execution_store_subdir: PathBuf,
    pub versions_info_name: String,
    pub parameter_file_names: Vec<PathBuf>,
    /// Filled in by the analyzer; more than one entry means the run is
    /// internally inconsistent.
    pub parameters: Vec<ParameterSet>,
}

impl ExecutionStore {
    /// Discover the parameter files of `roddy_store_dir/execution_store_subdir`.
    pub fn from_path(
        roddy_store_dir: &Path,
        execution_store_subdir: &Path,
        layout: &StoreLayout,
    ) -> Result<Self> {
        let execution_store = roddy_store_dir.join(execution_store_subdir);
        let parameter_file_names = list_names(&execution_store, |path, name| {
            path.is_file() && has_suffix(name, &layout.parameter_file_suffix)
        })?;
        debug!(
            execution_store = %execution_store.display(),
            parameter_files = parameter_file_names.len(),
            "discovered run directory"
        );
        Ok(Self {
            roddy_store_path: roddy_store_dir.to_path_buf(),
            execution_store_subdir: execution_store_subdir.to_path_buf(),
            versions_info_name: layout.versions_info_file.clone(),
            parameter_file_names,
            parameters: Vec::new(),
        })
    }

    pub fn execution_store(&self) -> PathBuf {
        self.roddy_store_path.join(&self.execution_store_subdir)
    }

    pub fn versions_info_file(&self) -> PathBuf {
        self.execution_store().join(&self.versions_info_name)
    }

    pub fn parameter_files(&self) -> Vec<PathBuf> {
        let dir = self.execution_store();
        self.parameter_file_names
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }
}

impl fmt::Display for ExecutionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution store = {}", self.execution_store().display())?;
        writeln!(f, "Version infos = {}", self.versions_info_file().display())?;
        write!(f, "Parameter files =")?;
        for file in self.parameter_files() {
            write!(f, "\n\t{}", file.display())?;
        }
        Ok(())
    }
}

/// A roddyExecutionStore: the base directory of one analysis.
#[derive(Debug, Clone)]
pub struct RoddyStore {
    pub base_dir: PathBuf,
    pub execution_stores: Vec<ExecutionStore>,
    /// Filled in by the analyzer; a single entry means all runs agree.
    pub parameters: Vec<ParameterSet>,
}

impl RoddyStore {
    /// Discover all run directories below `base_dir`.
    pub fn from_path(base_dir: &Path, layout: &StoreLayout) -> Result<Self> {
        let subdirs = list_names(base_dir, |path, name| {
            (path.is_dir() || path.is_symlink()) && has_prefix(name, &layout.execution_dir_prefix)
        })?;

        let execution_stores = subdirs
            .iter()
            .map(|subdir| ExecutionStore::from_path(base_dir, subdir, layout))
            .collect::<Result<Vec<_>>>()?;

        if execution_stores.is_empty() {
            warn!(
                store = %base_dir.display(),
                prefix = %layout.execution_dir_prefix,
                "no run subdirectories, store will be ignored"
            );
        }

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            execution_stores,
            parameters: Vec::new(),
        })
    }
}

impl fmt::Display for RoddyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base directory = {}", self.base_dir.display())?;
        for store in &self.execution_stores {
            write!(f, "\n\n{store}")?;
        }
        Ok(())
    }
}

/// Sorted names of the entries in `dir` accepted by `keep`.
///
/// Names need not be valid UTF-8; prefixes and suffixes are compared on the
/// encoded bytes.
fn list_names(dir: &Path, keep: impl Fn(&Path, &OsStr) -> bool) -> Result<Vec<PathBuf>> {
    let listing_error = |source| Error::StoreListing {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        let name = entry.file_name();
        if keep(&entry.path(), &name) {
            names.push(PathBuf::from(name));
        }
    }
    names.sort();
    Ok(names)
}

fn has_prefix(name: &OsStr, prefix: &str) -> bool {
    name.as_encoded_bytes().starts_with(prefix.as_bytes())
}

fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

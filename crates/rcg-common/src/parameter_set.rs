//! Context-addressed parameter sets.

use crate::value::ConfigMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A configuration together with every location it was observed at.
///
/// `contexts` are directories or files (parameter files, run directories,
/// store base directories). Grouping compares `parameters` only; contexts are
/// labels. `parameters` is `None` while unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(serialize_with = "serialize_paths")]
    pub contexts: Vec<PathBuf>,
    pub parameters: Option<ConfigMap>,
}

impl ParameterSet {
    pub fn new(contexts: Vec<PathBuf>, parameters: Option<ConfigMap>) -> Self {
        Self {
            contexts,
            parameters,
        }
    }

    /// A resolved set observed at a single location.
    pub fn resolved(context: impl Into<PathBuf>, parameters: ConfigMap) -> Self {
        Self {
            contexts: vec![context.into()],
            parameters: Some(parameters),
        }
    }

    /// Replace all contexts by `context`, keeping the configuration.
    pub fn relabel(self, context: &Path) -> Self {
        Self {
            contexts: vec![context.to_path_buf()],
            parameters: self.parameters,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.parameters.is_some()
    }
}

fn serialize_paths<S: Serializer>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(paths.iter().map(|p| p.to_string_lossy()))
}

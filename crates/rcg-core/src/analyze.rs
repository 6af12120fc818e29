//! Bottom-up analysis of roddyExecutionStores.
//!
//! Three levels are grouped, each with the same engine:
//!
//! 1. Parameter files of one run directory. A consistent run is relabelled
//!    with the run directory; an inconsistent one keeps its file contexts and
//!    is warned about.
//! 2. Runs of one store. A consistent store is relabelled with its base
//!    directory.
//! 3. Stores of one invocation ([`combine_stores`]). No relabelling; the
//!    number of groups decides the outcome.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::collect::{parse_parameter_file, read_version_info_file};
use crate::group::{group_parameter_sets, is_consistent};
use crate::store::{ExecutionStore, RoddyStore};
use crate::summarize::Summarizer;
use rcg_common::{ConfigMap, ParameterSet, Result};
use rcg_config::StoreLayout;

/// Runs a [`Summarizer`] over stores and groups the results.
pub struct Analyzer<S> {
    summarizer: S,
}

impl<S: Summarizer> Analyzer<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer }
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    /// Analyse every run directory of `roddy_store` and group them.
    ///
    /// Results are stored on the store and its run directories and returned.
    pub fn run(&self, roddy_store: &mut RoddyStore) -> Result<Vec<ParameterSet>> {
        let mut per_exec_store = Vec::new();
        for exec_store in &mut roddy_store.execution_stores {
            let store_parameters =
                self.analyze_execution_store(exec_store, &roddy_store.base_dir)?;
            exec_store.parameters = store_parameters.clone();
            per_exec_store.extend(store_parameters);
        }

        let mut grouped = group_parameter_sets(per_exec_store);
        if is_consistent(&grouped) {
            grouped = grouped
                .into_iter()
                .map(|set| set.relabel(&roddy_store.base_dir))
                .collect();
        }

        roddy_store.parameters = grouped.clone();
        Ok(grouped)
    }

    fn analyze_execution_store(
        &self,
        exec_store: &ExecutionStore,
        roddy_store_dir: &Path,
    ) -> Result<Vec<ParameterSet>> {
        let versions = read_version_info_file(&exec_store.versions_info_file())?;
        debug!(
            execution_store = %exec_store.execution_store().display(),
            components = versions.len(),
            "read version info"
        );

        let parameter_files = exec_store.parameter_files();
        if parameter_files.is_empty() {
            return Ok(vec![ParameterSet::resolved(
                roddy_store_dir,
                ConfigMap::new(),
            )]);
        }

        let mut job_parameters = Vec::with_capacity(parameter_files.len());
        for file in parameter_files {
            let raw_parameters = parse_parameter_file(&file)?;
            let summary = self.summarizer.summarize(&versions, &raw_parameters)?;
            job_parameters.push(ParameterSet::resolved(file, summary));
        }

        let grouped = group_parameter_sets(job_parameters);
        if is_consistent(&grouped) {
            Ok(grouped
                .into_iter()
                .map(|set| set.relabel(&exec_store.execution_store()))
                .collect())
        } else {
            warn!(
                execution_store = %exec_store.execution_store().display(),
                groups = grouped.len(),
                "inconsistent job parameters in run directory"
            );
            Ok(grouped)
        }
    }
}

/// Outcome of grouping across all stores of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    pub groups: Vec<ParameterSet>,
}

impl Combined {
    /// No two stores disagree. An invocation whose stores hold no runs at all
    /// has nothing to disagree about and counts as consistent.
    pub fn is_consistent(&self) -> bool {
        self.groups.len() <= 1
    }
}

/// Discover and analyse each store in turn, then group across stores.
pub fn analyze_stores<S: Summarizer>(
    analyzer: &Analyzer<S>,
    store_dirs: &[PathBuf],
    layout: &StoreLayout,
) -> Result<Combined> {
    let mut per_roddy_store = Vec::new();
    for dir in store_dirs {
        info!(store = %dir.display(), "analysing");
        let mut store = RoddyStore::from_path(dir, layout)?;
        per_roddy_store.extend(analyzer.run(&mut store)?);
    }
    Ok(combine_stores(per_roddy_store))
}

/// Group the results of several stores.
pub fn combine_stores(per_roddy_store: Vec<ParameterSet>) -> Combined {
    let combined = Combined {
        groups: group_parameter_sets(per_roddy_store),
    };
    if combined.is_consistent() {
        info!("same configuration in roddyExecutionStores");
    } else {
        warn!(
            groups = combined.groups.len(),
            "could not combine configurations in roddyExecutionStores"
        );
    }
    combined
}

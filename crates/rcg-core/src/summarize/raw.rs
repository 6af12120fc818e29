//! In-process summarizers.

use super::{SummarizeError, Summarizer};
use crate::collect::{RawParameters, Versions};
use rcg_common::{ConfigMap, ConfigValue};

/// Command-line name of [`RawSummarizer`].
pub const RAW_SUMMARIZER_NAME: &str = "builtin:raw";

/// Keeps all versions and raw parameters, uninterpreted.
///
/// Output: `{"versions": {...}, "parameters": {...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSummarizer;

impl Summarizer for RawSummarizer {
    fn name(&self) -> &str {
        RAW_SUMMARIZER_NAME
    }

    fn summarize(
        &self,
        versions: &Versions,
        parameters: &RawParameters,
    ) -> Result<ConfigMap, SummarizeError> {
        let mut summary = ConfigMap::new();
        summary.insert("versions".to_string(), string_map(versions));
        summary.insert("parameters".to_string(), string_map(parameters));
        Ok(summary)
    }
}

fn string_map(entries: &std::collections::BTreeMap<String, String>) -> ConfigValue {
    entries
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Adapts a closure to [`Summarizer`].
pub struct FnSummarizer<F> {
    name: String,
    f: F,
}

impl<F> FnSummarizer<F>
where
    F: Fn(&Versions, &RawParameters) -> ConfigMap,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Summarizer for FnSummarizer<F>
where
    F: Fn(&Versions, &RawParameters) -> ConfigMap,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn summarize(
        &self,
        versions: &Versions,
        parameters: &RawParameters,
    ) -> Result<ConfigMap, SummarizeError> {
        Ok((self.f)(versions, parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_keeps_everything() {
        let versions: Versions = [("Roddy".to_string(), "develop".to_string())]
            .into_iter()
            .collect();
        let parameters: RawParameters = [("A".to_string(), "\"quoted\"".to_string())]
            .into_iter()
            .collect();
        let summary = RawSummarizer.summarize(&versions, &parameters).unwrap();
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"parameters":{"A":"\"quoted\""},"versions":{"Roddy":"develop"}}"#
        );
    }

    #[test]
    fn test_fn_summarizer_selects_keys() {
        let summarizer = FnSummarizer::new("threads-only", |_: &Versions, p: &RawParameters| {
            let mut out = ConfigMap::new();
            out.insert(
                "threads".to_string(),
                p.get("BWA_MEM_THREADS").cloned().into(),
            );
            out
        });
        let parameters: RawParameters = [("OTHER".to_string(), "x".to_string())]
            .into_iter()
            .collect();
        let summary = summarizer
            .summarize(&Versions::new(), &parameters)
            .unwrap();
        assert!(summary["threads"].is_null());
        assert_eq!(summarizer.name(), "threads-only");
    }
}

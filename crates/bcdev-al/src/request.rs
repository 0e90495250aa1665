use crate::command::ShellKind;
use bcdev_core::{BcdevError, CompileDefaults, Result};
use serde::{Deserialize, Serialize};

/// One compile call. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub project_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_cache_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_probing_paths: Option<Vec<String>>,
}

impl CompileRequest {
    pub fn new(project_path: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            ..Self::default()
        }
    }

    pub fn package_cache_path(mut self, path: impl Into<String>) -> Self {
        self.package_cache_path = Some(path.into());
        self
    }

    pub fn output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn assembly_probing_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assembly_probing_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Rejects requests the native shell cannot carry. Runs before command building.
    pub fn validate(&self) -> Result<()> {
        self.validate_for(ShellKind::native())
    }

    /// Rejects a blank project path, and under cmd.exe any value containing `"`
    /// (Windows paths cannot contain one)
    pub fn validate_for(&self, shell: ShellKind) -> Result<()> {
        if self.project_path.trim().is_empty() {
            return Err(invalid("projectPath", "must not be empty"));
        }

        if shell == ShellKind::Cmd {
            for (field, value) in self.path_values() {
                if value.contains('"') {
                    return Err(invalid(field, "must not contain '\"'"));
                }
            }
        }
        Ok(())
    }

    fn path_values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let single = [
            ("projectPath", Some(self.project_path.as_str())),
            ("packageCachePath", self.package_cache_path.as_deref()),
            ("outputPath", self.output_path.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)));

        let probing = self
            .assembly_probing_paths
            .iter()
            .flatten()
            .map(|p| ("assemblyProbingPaths", p.as_str()));

        single.chain(probing)
    }

    /// Fill fields the request left unset from configured defaults
    pub fn with_defaults(mut self, defaults: &CompileDefaults) -> Self {
        if self.package_cache_path.is_none() {
            self.package_cache_path = defaults.package_cache_path.clone();
        }
        if self.assembly_probing_paths.is_none() && !defaults.assembly_probing_paths.is_empty() {
            self.assembly_probing_paths = Some(defaults.assembly_probing_paths.clone());
        }
        self
    }
}

fn invalid(field: &str, reason: &str) -> BcdevError {
    BcdevError::InvalidRequest {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

use crate::error::{ArtifactError, ArtifactErrorExt};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tnode_domain::Artifact;
use tnode_kernel::ports::ArtifactSource;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

/// Artifacts read from a compiler output tree (`artifacts/contracts/**/<Name>.json`).
///
/// JSON files that are not contract artifacts (no `contractName` or `bytecode`) are
/// ignored, as are `*.dbg.json` companions and everything under `build-info/`.
#[derive(Debug, Clone, Default)]
pub struct ArtifactDirectory {
    root: PathBuf,
    by_name: BTreeMap<String, Arc<Artifact>>,
    paths: BTreeMap<String, PathBuf>,
}

impl ArtifactDirectory {
    /// Scans `root` recursively.
    ///
    /// # Errors
    /// - [`ArtifactError::DirectoryNotFound`] when `root` is not a directory.
    /// - [`ArtifactError::DuplicateContract`] when two files declare the same contract.
    /// - [`ArtifactError::Codec`] for invalid JSON or an artifact with malformed bytecode.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ArtifactError::DirectoryNotFound {
                message: root.display().to_string().into(),
                context: None,
            });
        }

        let mut dir = Self { root: root.to_path_buf(), ..Self::default() };

        let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| !is_build_info(e));
        for entry in walker {
            let entry = entry.context(format!("Scanning {}", root.display()))?;
            if is_artifact_candidate(&entry) {
                dir.load_file(entry.path())?;
            }
        }

        info!(path = %root.display(), contracts = dir.by_name.len(), "Artifacts loaded");
        Ok(dir)
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ArtifactError> {
        let data = std::fs::read(path).context(format!("Read failed: {}", path.display()))?;
        let value: serde_json::Value =
            serde_json::from_slice(&data).context(format!("Invalid JSON: {}", path.display()))?;

        let is_artifact = value.get("contractName").is_some_and(serde_json::Value::is_string)
            && value.get("bytecode").is_some();
        if !is_artifact {
            debug!(path = %path.display(), "Skipping non-artifact JSON");
            return Ok(());
        }

        let artifact: Artifact =
            serde_json::from_value(value).context(format!("Invalid artifact: {}", path.display()))?;
        let name = artifact.contract_name.clone();

        if let Some(previous) = self.paths.get(&name) {
            return Err(ArtifactError::DuplicateContract {
                contract_name: name,
                context: Some(format!("{} and {}", previous.display(), path.display()).into()),
            });
        }

        debug!(contract = %name, path = %path.display(), bytes = artifact.bytecode.len(), "Artifact found");
        self.paths.insert(name.clone(), path.to_path_buf());
        self.by_name.insert(name, Arc::new(artifact));
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File the contract was loaded from.
    #[must_use]
    pub fn path_of(&self, contract_name: &str) -> Option<&Path> {
        self.paths.get(contract_name).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl ArtifactSource for ArtifactDirectory {
    fn artifact(&self, contract_name: &str) -> Option<Arc<Artifact>> {
        self.by_name.get(contract_name).cloned()
    }

    fn contract_names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }
}

fn is_build_info(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == BUILD_INFO_DIR
}

fn is_artifact_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".json") && !name.ends_with(DEBUG_SUFFIX))
}

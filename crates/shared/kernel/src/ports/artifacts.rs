use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tnode_domain::Artifact;

/// Read-only view over compiled contracts.
pub trait ArtifactSource: Debug + Send + Sync {
    fn artifact(&self, contract_name: &str) -> Option<Arc<Artifact>>;

    /// Known contract names, sorted.
    fn contract_names(&self) -> Vec<String>;
}

/// Artifacts held in memory, keyed by contract name.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifacts {
    by_name: BTreeMap<String, Arc<Artifact>>,
}

impl MemoryArtifacts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact, replacing any previous one with the same contract name.
    #[must_use]
    pub fn with(mut self, artifact: Artifact) -> Self {
        self.insert(artifact);
        self
    }

    pub fn insert(&mut self, artifact: Artifact) -> Option<Arc<Artifact>> {
        self.by_name.insert(artifact.contract_name.clone(), Arc::new(artifact))
    }
}

impl FromIterator<Artifact> for MemoryArtifacts {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl ArtifactSource for MemoryArtifacts {
    fn artifact(&self, contract_name: &str) -> Option<Arc<Artifact>> {
        self.by_name.get(contract_name).cloned()
    }

    fn contract_names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }
}

use crate::catalog::Provides;
use crate::error::{Result, StencilError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// MergeStrategy
// ---------------------------------------------------------------------------

/// How a skeleton file is reconciled with a pre-existing target file.
/// An unrecognized strategy string fails manifest parsing outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    Overwrite,
    MergeYaml,
    Append,
    /// Write only if the target does not exist. The default for files a
    /// manifest does not mention.
    #[default]
    Skip,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Overwrite => "overwrite",
            MergeStrategy::MergeYaml => "merge-yaml",
            MergeStrategy::Append => "append",
            MergeStrategy::Skip => "skip",
        }
    }
}

// ---------------------------------------------------------------------------
// SkeletonManifest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonKind {
    Code,
    Persistence,
    Deployment,
    Generic,
}

/// One `{path, strategy}` pair. `path` is relative to the skeleton root and
/// names the source file as it appears on disk (template suffix included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileManifest {
    pub path: String,
    #[serde(default)]
    pub strategy: MergeStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SkeletonKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub provides: Provides,
    #[serde(default)]
    pub files: Vec<FileManifest>,
}

impl SkeletonManifest {
    /// Read `skeleton.yaml` from a skeleton directory.
    pub fn load(skeleton_dir: &Path) -> Result<Self> {
        let path = paths::skeleton_manifest(skeleton_dir);
        let display = path.display().to_string();
        if !path.exists() {
            return Err(StencilError::InvalidManifest {
                path: display,
                reason: "manifest file missing".to_string(),
            });
        }
        let data = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&data).map_err(|e| StencilError::InvalidManifest {
            path: display,
            reason: e.to_string(),
        })
    }

    /// Declared strategy for a skeleton-relative source path, `skip` when
    /// the manifest does not mention it.
    pub fn strategy_for(&self, relative: &str) -> MergeStrategy {
        self.files
            .iter()
            .find(|f| f.path == relative)
            .map(|f| f.strategy)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// SkeletonStore
// ---------------------------------------------------------------------------

/// A directory holding one subdirectory per skeleton.
#[derive(Debug, Clone)]
pub struct SkeletonStore {
    root: PathBuf,
}

impl SkeletonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skeleton_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all skeletons in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir = entry.path();
            if paths::skeleton_manifest(&dir).exists() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn manifest(&self, name: &str) -> Result<SkeletonManifest> {
        let dir = self.skeleton_dir(name);
        if !dir.exists() {
            return Err(StencilError::SkeletonNotFound(name.to_string()));
        }
        SkeletonManifest::load(&dir)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_skeleton(root: &Path, name: &str, manifest: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("skeleton.yaml"), manifest).unwrap();
    }

    #[test]
    fn manifest_roundtrip() {
        let manifest = SkeletonManifest {
            name: "postgresql".to_string(),
            kind: SkeletonKind::Persistence,
            description: String::new(),
            provides: Provides {
                persistence: "postgresql".to_string(),
                ..Provides::default()
            },
            files: vec![FileManifest {
                path: "docker-compose.yml".to_string(),
                strategy: MergeStrategy::MergeYaml,
            }],
        };
        let yaml = serde_yaml::to_string(&manifest).unwrap();
        assert!(yaml.contains("strategy: merge-yaml"));
        let parsed: SkeletonManifest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let yaml = "name: x\ntype: generic\nfiles:\n  - path: a.txt\n    strategy: replace\n";
        let result = serde_yaml::from_str::<SkeletonManifest>(yaml);
        assert!(result.is_err(), "unknown strategy must fail parsing");
    }

    #[test]
    fn missing_strategy_defaults_to_skip() {
        let yaml = "name: x\ntype: generic\nfiles:\n  - path: a.txt\n";
        let manifest: SkeletonManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.files[0].strategy, MergeStrategy::Skip);
    }

    #[test]
    fn strategy_for_unlisted_path_is_skip() {
        let yaml = "name: x\ntype: generic\nfiles:\n  - path: a.txt\n    strategy: overwrite\n";
        let manifest: SkeletonManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.strategy_for("a.txt"), MergeStrategy::Overwrite);
        assert_eq!(manifest.strategy_for("b.txt"), MergeStrategy::Skip);
    }

    #[test]
    fn load_missing_manifest_errors() {
        let dir = TempDir::new().unwrap();
        let err = SkeletonManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, StencilError::InvalidManifest { .. }));
    }

    #[test]
    fn store_lists_sorted_skeletons() {
        let dir = TempDir::new().unwrap();
        write_skeleton(dir.path(), "zz", "name: zz\ntype: generic\n");
        write_skeleton(dir.path(), "aa", "name: aa\ntype: code\n");
        // A directory without a manifest is not a skeleton.
        std::fs::create_dir_all(dir.path().join("stray")).unwrap();

        let store = SkeletonStore::new(dir.path());
        assert_eq!(store.list().unwrap(), ["aa", "zz"]);
    }

    #[test]
    fn store_manifest_for_unknown_name() {
        let dir = TempDir::new().unwrap();
        let store = SkeletonStore::new(dir.path());
        let err = store.manifest("ghost").unwrap_err();
        assert!(matches!(err, StencilError::SkeletonNotFound(_)));
    }
}

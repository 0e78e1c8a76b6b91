use crate::error::{Result, StencilError};
use crate::io;
use crate::skeleton::{MergeStrategy, SkeletonManifest};
use crate::template::{self, TemplateContext};
use serde_yaml::{Mapping, Value};
use std::path::Path;

// ---------------------------------------------------------------------------
// Merge engine
// ---------------------------------------------------------------------------

/// One file written (or deliberately left alone) while applying a skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFile {
    /// Target-relative path, template suffix already dropped.
    pub path: String,
    pub strategy: MergeStrategy,
}

/// Materialize one skeleton into `target`, rendering every file against the
/// context and resolving collisions with the manifest's per-file strategy
/// (default `skip`). Fails fast; files already written stay written.
pub fn apply_skeleton(
    skeleton_dir: &Path,
    target: &Path,
    ctx: &TemplateContext,
) -> Result<Vec<AppliedFile>> {
    let manifest = SkeletonManifest::load(skeleton_dir)?;
    let mut sources = Vec::new();
    collect_files(skeleton_dir, skeleton_dir, &mut sources)?;
    sources.sort();

    let mut applied = Vec::with_capacity(sources.len());
    for relative in sources {
        if relative == crate::paths::SKELETON_MANIFEST {
            continue;
        }
        let strategy = manifest.strategy_for(&relative);
        let source_path = skeleton_dir.join(&relative);
        let raw = std::fs::read(&source_path)?;
        let text = String::from_utf8(raw).map_err(|_| StencilError::NonUtf8Template {
            file: relative.clone(),
        })?;
        let rendered = template::render(&text, &relative, ctx)?;

        let target_rel = template::target_name(&relative).to_string();
        let target_path = target.join(&target_rel);
        tracing::debug!(file = %target_rel, strategy = strategy.as_str(), "applying");
        apply_strategy(strategy, rendered.as_bytes(), &target_path)?;
        applied.push(AppliedFile {
            path: target_rel,
            strategy,
        });
    }
    Ok(applied)
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, out)?;
        } else {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            out.push(rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

/// Apply one rendered file to the target path under the given strategy.
pub fn apply_strategy(strategy: MergeStrategy, rendered: &[u8], target: &Path) -> Result<()> {
    match strategy {
        MergeStrategy::Overwrite => io::atomic_write(target, rendered),
        MergeStrategy::Skip => io::write_if_missing(target, rendered).map(|_| ()),
        MergeStrategy::Append => io::append_bytes(target, rendered),
        MergeStrategy::MergeYaml => {
            if !target.exists() {
                return io::atomic_write(target, rendered);
            }
            let existing = std::fs::read(target)?;
            let target_doc: Mapping = serde_yaml::from_slice(&existing)?;
            let source_doc: Mapping = serde_yaml::from_slice(rendered)?;
            let merged = merge_mappings(target_doc, source_doc);
            let out = serde_yaml::to_string(&Value::Mapping(merged))?;
            io::atomic_write(target, out.as_bytes())
        }
    }
}

/// Recursive structural merge: source keys override same-named scalars,
/// nested maps merge key-by-key, non-map values are replaced.
fn merge_mappings(mut target: Mapping, source: Mapping) -> Mapping {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                let merged = merge_mappings(std::mem::take(existing), incoming);
                target.insert(key, Value::Mapping(merged));
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
    target
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

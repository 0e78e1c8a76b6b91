use rust_embed::Embed;
use std::path::Path;
use stencil_core::io;

/// Built-in skeletons shipped inside the binary.
#[derive(Embed)]
#[folder = "skeletons/"]
struct BuiltinSkeletons;

/// Materialize the built-in skeletons into the skeleton cache. Managed
/// content: every file is refreshed on each call. Returns the number of
/// files written.
pub fn install_builtin_skeletons(cache_dir: &Path) -> anyhow::Result<usize> {
    let mut written = 0;
    for name in BuiltinSkeletons::iter() {
        let Some(file) = BuiltinSkeletons::get(name.as_ref()) else {
            continue;
        };
        io::atomic_write(&cache_dir.join(name.as_ref()), &file.data)?;
        written += 1;
    }
    Ok(written)
}

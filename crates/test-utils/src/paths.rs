//! Locating OSD resources for tests.
//!
//! Fonts and navball skins are large binary assets that are not always
//! checked out; tests that need real files look them up here and skip
//! when they are missing.

use std::path::{Path, PathBuf};

use osd_common::NavballSkin;

use crate::generators::create_quadrant_texture;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Resource root shipped with the workspace.
pub fn resources_dir() -> PathBuf {
    workspace_root().join("resources")
}

/// Searches for a resource file, relative to the resource root layout.
///
/// Locations, in order:
/// 1. `TEST_DATA_DIR` (if set)
/// 2. `resources/`
/// 3. `/usr/share/osd/`
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    candidates.extend([
        resources_dir().join(name),
        PathBuf::from("/usr/share/osd").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Creates a throwaway resource root holding a synthetic skin for `skin`.
///
/// No fonts are written, so every text layer falls back to disabled.
pub fn temp_resource_root(skin: NavballSkin) -> tempfile::TempDir {
    let dir = temp_test_dir_with_prefix("osd_resources_");
    write_skin(dir.path(), skin, &create_quadrant_texture(64, 32));
    dir
}

/// Writes `image` as the PNG for `skin` below `root`.
pub fn write_skin(root: &Path, skin: NavballSkin, image: &image::RgbaImage) -> PathBuf {
    let skins = root.join("navball_skins");
    std::fs::create_dir_all(&skins).expect("Failed to create skin directory");
    let path = skins.join(skin.filename());
    image.save(&path).expect("Failed to write skin texture");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(find_test_file("fonts/definitely-not-here.ttf").is_none());
    }

    #[test]
    fn test_temp_resource_root_has_skin() {
        let dir = temp_resource_root(NavballSkin::Jafo);
        let skin = dir.path().join("navball_skins").join("JAFO.png");
        assert!(skin.exists());
        assert!(!dir.path().join("fonts").exists());
    }

    #[test]
    fn test_temp_test_dir_with_prefix() {
        let dir = temp_test_dir_with_prefix("osd_test_");
        assert!(dir.path().to_string_lossy().contains("osd_test_"));
    }
}

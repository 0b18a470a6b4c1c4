use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageReader;
use log::{debug, info};
use rayon::prelude::*;

use super::SourceSprite;
use crate::error::TexpackError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Load sprites from input paths (files, directories or glob wildcards).
///
/// Sprites come back in input order: each input in turn, with glob matches
/// and directory entries sorted by path. Decoding runs in parallel.
pub fn load_sprites(inputs: &[impl AsRef<Path>]) -> Result<Vec<SourceSprite>> {
    let image_paths = collect_image_paths(inputs)?;

    if image_paths.is_empty() {
        return Err(TexpackError::NoImages.into());
    }

    info!("Loading {} images...", image_paths.len());

    image_paths
        .par_iter()
        .map(|path| load_single_sprite(path))
        .collect()
}

fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();

        if is_glob_pattern(&path.to_string_lossy()) {
            collect_from_pattern(path, &mut paths)?;
            continue;
        }

        if !path.exists() {
            return Err(TexpackError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_file() {
            if is_supported_image(path) {
                paths.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_from_directory(path, &mut found)?;
            found.sort();
            paths.extend(found);
        }
    }

    Ok(paths)
}

fn collect_from_pattern(pattern: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let pattern = pattern.to_string_lossy();
    let entries = glob::glob(&pattern).map_err(|e| TexpackError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
        if path.is_file() && is_supported_image(&path) {
            found.push(path);
        }
    }

    debug!("Pattern {} matched {} images", pattern, found.len());
    found.sort();
    paths.extend(found);
    Ok(())
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir).context("Failed to read directory")? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

/// Check if a pattern contains glob characters.
pub(crate) fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Display name of an image: its file name without extension
fn sprite_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn load_single_sprite(path: &Path) -> Result<SourceSprite> {
    let image = ImageReader::open(path)
        .map_err(|e| TexpackError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| TexpackError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(SourceSprite {
        path: path.to_path_buf(),
        name: sprite_name(path),
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("*.png"));
        assert!(is_glob_pattern("sprites/*.png"));
        assert!(is_glob_pattern("sprites/**/*.png"));
        assert!(is_glob_pattern("sprite?.png"));
        assert!(is_glob_pattern("sprite[0-9].png"));
        assert!(!is_glob_pattern("sprite.png"));
        assert!(!is_glob_pattern("sprites/hero.png"));
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("dir/b.JPG")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn test_sprite_name_drops_directory_and_extension() {
        assert_eq!(sprite_name(Path::new("assets/ui/button.png")), "button");
        assert_eq!(sprite_name(Path::new("hero.idle.png")), "hero.idle");
    }

    #[test]
    fn test_missing_input_is_reported() {
        let result = collect_image_paths(&["definitely/not/here.png"]);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TexpackError>(),
            Some(TexpackError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let result = collect_image_paths(&["sprites/[.png"]);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TexpackError>(),
            Some(TexpackError::InvalidPattern { .. })
        ));
    }
}

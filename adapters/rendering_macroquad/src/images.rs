use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use macroquad::texture::Texture2D;
use snake_rendering::ImageKey;
use tracing::debug;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from the image manifest.
#[derive(Debug)]
pub struct ImageAtlas {
    textures: HashMap<ImageKey, Texture2D>,
}

impl ImageAtlas {
    /// Loads images from the manifest located at the provided path.
    ///
    /// Must be called from inside the macroquad window, after the graphics
    /// context exists.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Returns the default manifest path relative to the working directory.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Returns whether the atlas contains the provided key.
    #[must_use]
    pub fn contains(&self, key: ImageKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Retrieves the texture associated with the provided key.
    #[must_use]
    pub fn texture(&self, key: ImageKey) -> Option<Texture2D> {
        self.textures.get(&key).copied()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(ImageKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read image manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(ImageKey, PathBuf)>,
        loader: &mut impl FnMut(ImageKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path).with_context(|| {
                format!("failed to load image {key:?} from {}", path.display())
            })?;
            debug!(?key, path = %path.display(), "image loaded");
            if textures.insert(key, texture).is_some() {
                bail!("duplicate image entry for {key:?}");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: ImageKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read image asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    images: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(ImageKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse image manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported image manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.images {
        let Some(key) = ImageKey::from_manifest_name(&name) else {
            bail!("unknown image key `{name}` in manifest");
        };
        let _ = resolved.insert(key, base_path.join(relative_path));
    }

    let mut ordered = Vec::with_capacity(ImageKey::ALL.len());
    for key in ImageKey::ALL {
        let Some(path) = resolved.remove(&key) else {
            bail!("image manifest missing entry for {key:?}");
        };
        ordered.push((key, path));
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn manifest_requires_every_known_key() {
        let manifest = r#"
            version = 1

            [images]
        "#;

        let result = parse_manifest(manifest, Path::new("assets"));
        assert!(result.is_err(), "manifest missing GameOver should fail");
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = r#"
            version = 1

            [images]
            GameOver = "game-over.png"
            Victory = "victory.png"
        "#;

        let result = parse_manifest(manifest, Path::new("assets"));
        assert!(result.is_err(), "unknown keys must be rejected");
    }

    #[test]
    fn manifest_rejects_other_versions() {
        let manifest = r#"
            version = 2

            [images]
            GameOver = "game-over.png"
        "#;

        let error = parse_manifest(manifest, Path::new("assets")).expect_err("version 2");
        assert!(error.to_string().contains("unsupported image manifest version 2"));
    }

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let manifest = r#"
            version = 1

            [images]
            GameOver = "ui/game-over.png"
        "#;

        let parsed = parse_manifest(manifest, Path::new("root")).expect("manifest should parse");
        assert_eq!(
            parsed,
            vec![(ImageKey::GameOver, PathBuf::from("root/ui/game-over.png"))]
        );
    }

    #[test]
    fn atlas_loads_each_image_once() {
        let entries = vec![(ImageKey::GameOver, PathBuf::from("game-over.png"))];
        let load_counts = RefCell::new(HashMap::new());
        let atlas = ImageAtlas::from_entries(entries, &mut |key, _| {
            *load_counts.borrow_mut().entry(key).or_insert(0) += 1;
            Ok(Texture2D::empty())
        })
        .expect("atlas should load textures once");

        for key in ImageKey::ALL {
            assert!(atlas.contains(key));
            assert!(atlas.texture(key).is_some());
        }
        assert_eq!(load_counts.into_inner().get(&ImageKey::GameOver), Some(&1));
    }

    #[test]
    fn loader_failures_carry_the_image_path() {
        let entries = vec![(ImageKey::GameOver, PathBuf::from("missing.png"))];
        let error = ImageAtlas::from_entries(entries, &mut |_, _| bail!("no such file"))
            .expect_err("loader failure should propagate");

        assert!(format!("{error:#}").contains("missing.png"));
    }

    #[test]
    fn missing_manifest_is_reported_with_its_path() {
        let error = ImageAtlas::from_manifest_with_loader("does/not/exist.toml", |_, _| {
            Ok(Texture2D::empty())
        })
        .expect_err("manifest does not exist");

        assert!(error.to_string().contains("does/not/exist.toml"));
    }
}

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

/// A font file the card stylesheet embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    pub file_name: &'static str,
    pub family: &'static str,
    pub weight: &'static str,
}

pub const FONTS: [FontSpec; 3] = [
    FontSpec {
        file_name: "Vera-Mono.woff2",
        family: "Vera",
        weight: "normal",
    },
    FontSpec {
        file_name: "Roboto-Regular.woff2",
        family: "Roboto",
        weight: "normal",
    },
    FontSpec {
        file_name: "Roboto-Bold.woff2",
        family: "Roboto",
        weight: "bold",
    },
];

#[derive(Debug, Clone)]
pub struct FontAsset {
    pub spec: FontSpec,
    /// Base64 of the woff2 bytes, ready for a `data:` URI.
    pub encoded: String,
}

/// Fonts read and encoded once at start-up, then shared read-only.
#[derive(Debug, Clone)]
pub struct AssetCache {
    fonts: Vec<FontAsset>,
}

impl AssetCache {
    /// Read every font in [`FONTS`] from `dir`. Any missing file is an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::load_with(|name| {
            let path = dir.join(name);
            std::fs::read(&path)
                .with_context(|| format!("failed to read font asset {}", path.display()))
        })
    }

    /// Build the cache from an arbitrary loader, called once per font.
    pub fn load_with<F>(mut loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Vec<u8>>,
    {
        let fonts = FONTS
            .iter()
            .map(|spec| {
                let bytes = loader(spec.file_name)?;
                tracing::info!("loaded font asset {} ({} bytes)", spec.file_name, bytes.len());
                Ok(FontAsset {
                    spec: *spec,
                    encoded: general_purpose::STANDARD.encode(&bytes),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fonts })
    }

    pub fn fonts(&self) -> &[FontAsset] {
        &self.fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn loads_each_font_once_in_order() {
        let mut calls = Vec::new();
        let cache = AssetCache::load_with(|name| {
            calls.push(name.to_string());
            Ok(name.as_bytes().to_vec())
        })
        .unwrap();

        assert_eq!(
            calls,
            vec!["Vera-Mono.woff2", "Roboto-Regular.woff2", "Roboto-Bold.woff2"]
        );
        assert_eq!(cache.fonts().len(), 3);
        assert_eq!(
            cache.fonts()[0].encoded,
            general_purpose::STANDARD.encode("Vera-Mono.woff2")
        );
    }

    #[test]
    fn loader_failure_is_fatal() {
        let err = AssetCache::load_with(|name| {
            if name == "Roboto-Bold.woff2" {
                Err(anyhow!("missing"))
            } else {
                Ok(vec![1, 2, 3])
            }
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "missing");
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for spec in FONTS {
            std::fs::write(dir.path().join(spec.file_name), [0u8, 1, 2]).unwrap();
        }
        let cache = AssetCache::load(dir.path()).unwrap();
        assert!(cache.fonts().iter().all(|f| f.encoded == "AAEC"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetCache::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Vera-Mono.woff2"));
    }
}

//! Extension manifest parsing for `native_extension.toml` files.
//!
//! A manifest describes one extension package: its identity, the extension
//! packages it must load after, the system packages it needs per
//! distribution and release, and how to build it. The registry core never
//! fetches or builds anything itself; the manifest is how the surrounding
//! installer workflow hands it the metadata it needs.
//!
//! # Example TOML
//!
//! ```toml
//! [extension]
//! name = "intl"
//! version = "1.2.0"
//! description = "ICU-backed internationalization extension"
//!
//! [requires]
//! extensions = ["unicode-base"]
//!
//! [system.Debian]
//! "12" = ["libicu-dev", "pkg-config"]
//! "13" = ["libicu-dev"]
//!
//! [build]
//! flags = "--enable-intl"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The canonical filename for extension manifest files.
///
/// Extension packages must place a file with this name at the root of
/// their source tree so the installer workflow can discover them.
pub const MANIFEST_FILENAME: &str = "native_extension.toml";

/// Complete extension manifest loaded from `native_extension.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtensionManifest {
    /// Core extension metadata.
    pub extension: ExtensionMeta,
    /// Load-order requirements on other extension packages.
    #[serde(default)]
    pub requires: Requires,
    /// System package requirements: distribution -> release -> packages.
    #[serde(default)]
    pub system: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Build configuration.
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// Basic metadata about an extension package.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionMeta {
    /// Extension package name (e.g., "intl").
    pub name: String,
    /// Semver version string.
    pub version: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Load-order requirements among extension packages.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Requires {
    /// Extension packages this one must load after.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Build configuration for the extension.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Full build command. When absent the installer synthesizes one for
    /// the target runtime.
    #[serde(default)]
    pub command: Option<String>,
    /// Extra flags for the synthesized configure step.
    #[serde(default)]
    pub flags: Option<String>,
}

impl ExtensionManifest {
    /// Parse a manifest from TOML content.
    ///
    /// Validates that the name is non-empty and the version is valid
    /// semver.
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;

        if manifest.extension.name.trim().is_empty() {
            return Err(Error::MetadataMissing {
                name: String::new(),
                reason: "manifest declares an empty extension name".to_string(),
            });
        }
        semver::Version::parse(&manifest.extension.version).map_err(|e| Error::InvalidVersion {
            version: manifest.extension.version.clone(),
            source: e,
        })?;

        Ok(manifest)
    }

    /// Load the manifest from an extension source directory.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path));
        }
        Self::from_toml(&ext_fs::read_text(&path)?)
    }

    /// Parsed semver version.
    pub fn version(&self) -> Result<semver::Version> {
        semver::Version::parse(&self.extension.version).map_err(|e| Error::InvalidVersion {
            version: self.extension.version.clone(),
            source: e,
        })
    }

    /// System packages required on a given distribution and release.
    ///
    /// The manifest must carry an entry for the exact distribution and
    /// release; a missing level is [`Error::MetadataMissing`] naming what
    /// is absent, raised before any mutation happens.
    pub fn system_packages_for(&self, distro: &str, release: &str) -> Result<&[String]> {
        let name = &self.extension.name;

        if self.system.is_empty() {
            return Err(Error::MetadataMissing {
                name: name.clone(),
                reason: "manifest declares no [system] package requirements".to_string(),
            });
        }

        let releases = self.system.get(distro).ok_or_else(|| Error::MetadataMissing {
            name: name.clone(),
            reason: format!("no system packages declared for distribution '{distro}'"),
        })?;

        let packages = releases.get(release).ok_or_else(|| Error::MetadataMissing {
            name: name.clone(),
            reason: format!("no system packages declared for {distro} release '{release}'"),
        })?;

        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[extension]
name = "intl"
version = "1.2.0"
description = "ICU-backed internationalization extension"

[requires]
extensions = ["unicode-base"]

[system.Debian]
"12" = ["libicu-dev", "pkg-config"]
"13" = ["libicu-dev"]

[build]
flags = "--enable-intl"
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ExtensionManifest::from_toml(FULL).unwrap();
        assert_eq!(manifest.extension.name, "intl");
        assert_eq!(manifest.version().unwrap(), semver::Version::new(1, 2, 0));
        assert_eq!(manifest.requires.extensions, vec!["unicode-base"]);
        assert_eq!(
            manifest.build.as_ref().unwrap().flags.as_deref(),
            Some("--enable-intl")
        );
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = ExtensionManifest::from_toml(
            "[extension]\nname = \"zlib\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        assert!(manifest.requires.extensions.is_empty());
        assert!(manifest.system.is_empty());
        assert!(manifest.build.is_none());
    }

    #[test]
    fn test_system_packages_lookup() {
        let manifest = ExtensionManifest::from_toml(FULL).unwrap();
        let packages = manifest.system_packages_for("Debian", "12").unwrap();
        assert_eq!(packages, ["libicu-dev", "pkg-config"]);
    }

    #[test]
    fn test_missing_distro_is_metadata_missing() {
        let manifest = ExtensionManifest::from_toml(FULL).unwrap();
        let err = manifest.system_packages_for("Ubuntu", "24.04").unwrap_err();
        match err {
            Error::MetadataMissing { name, reason } => {
                assert_eq!(name, "intl");
                assert!(reason.contains("Ubuntu"));
            }
            other => panic!("expected MetadataMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_release_is_metadata_missing() {
        let manifest = ExtensionManifest::from_toml(FULL).unwrap();
        let err = manifest.system_packages_for("Debian", "11").unwrap_err();
        assert!(matches!(err, Error::MetadataMissing { .. }));
    }

    #[test]
    fn test_no_system_table_is_metadata_missing() {
        let manifest = ExtensionManifest::from_toml(
            "[extension]\nname = \"zlib\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        let err = manifest.system_packages_for("Debian", "12").unwrap_err();
        assert!(matches!(err, Error::MetadataMissing { .. }));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = ExtensionManifest::from_toml(
            "[extension]\nname = \"zlib\"\nversion = \"one.two\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ExtensionManifest::from_toml(
            "[extension]\nname = \"  \"\nversion = \"0.1.0\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MetadataMissing { .. }));
    }

    #[test]
    fn test_unknown_meta_field_rejected() {
        let err = ExtensionManifest::from_toml(
            "[extension]\nname = \"zlib\"\nversion = \"0.1.0\"\nlicense = \"MIT\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ManifestParse(_)));
    }
}

//! The persisted record of installed extension packages.
//!
//! A [`Registry`] tracks, for every installed extension package, which
//! shared-library files it placed in the extension directory, which other
//! extension packages it must load after, and which system packages it
//! requires. System packages are reference-counted through per-package user
//! sets so a shared requirement is only reported as unneeded once its last
//! user is gone.
//!
//! The type is a plain value: all mutation happens in memory and the store
//! decides when a mutated value becomes durable. Map and set fields are
//! BTree-backed so serialization order is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The registry document, as held in memory between load and save.
///
/// Wire field names (`extFiles`, `dependencies`, `packages`) are the
/// backing document's top-level fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Extension package -> shared-library file names it placed on disk.
    #[serde(
        rename = "extFiles",
        default,
        deserialize_with = "wire::file_lists"
    )]
    extension_files: BTreeMap<String, Vec<String>>,

    /// Extension package -> extension packages it must load after.
    #[serde(default, deserialize_with = "wire::name_sets")]
    dependencies: BTreeMap<String, BTreeSet<String>>,

    /// System package -> extension packages currently requiring it.
    #[serde(rename = "packages", default, deserialize_with = "wire::name_sets")]
    system_package_users: BTreeMap<String, BTreeSet<String>>,
}

impl Registry {
    /// Whether an extension package has a record.
    pub fn is_registered(&self, name: &str) -> bool {
        self.extension_files.contains_key(name)
    }

    /// All recorded file lists, keyed by extension package.
    pub fn extension_files(&self) -> &BTreeMap<String, Vec<String>> {
        &self.extension_files
    }

    /// The load-after graph over extension packages.
    pub fn dependencies(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.dependencies
    }

    /// Reference-count state: system package -> current users.
    pub fn system_package_users(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.system_package_users
    }

    /// True when nothing is registered and nothing is reference-counted.
    pub fn is_empty(&self) -> bool {
        self.extension_files.is_empty()
            && self.dependencies.is_empty()
            && self.system_package_users.is_empty()
    }

    /// Record the file list an extension package placed on disk,
    /// replacing any previous list.
    pub fn record_files(&mut self, name: &str, files: Vec<String>) {
        self.extension_files.insert(name.to_string(), files);
    }

    /// Remove and return an extension package's recorded file list.
    pub fn take_files(&mut self, name: &str) -> Option<Vec<String>> {
        self.extension_files.remove(name)
    }

    /// Record which extension packages `name` must load after,
    /// replacing any previous declaration.
    pub fn record_dependencies(&mut self, name: &str, requires: BTreeSet<String>) {
        self.dependencies.insert(name.to_string(), requires);
    }

    /// Drop an extension package's file and dependency records.
    ///
    /// Reference counts are not touched here; pass an empty requirement set
    /// to [`Registry::reconcile_system_packages`] for that.
    pub fn remove_package(&mut self, name: &str) {
        self.extension_files.remove(name);
        self.dependencies.remove(name);
    }

    /// Bring the reference counts in line with `name` now requiring exactly
    /// `required`.
    ///
    /// `name` is added as a user of every package in `required` and removed
    /// from every other tracked package. A package whose user set becomes
    /// empty is dropped from the document entirely, and its name is
    /// returned as unneeded. Passing an empty `required` set is the removal
    /// path.
    pub fn reconcile_system_packages(
        &mut self,
        name: &str,
        required: &BTreeSet<String>,
    ) -> Vec<String> {
        for package in required {
            self.system_package_users
                .entry(package.clone())
                .or_default()
                .insert(name.to_string());
        }

        let mut unneeded = Vec::new();
        self.system_package_users.retain(|package, users| {
            if required.contains(package) {
                return true;
            }
            users.remove(name);
            if users.is_empty() {
                unneeded.push(package.clone());
                false
            } else {
                true
            }
        });

        unneeded
    }
}

/// Deserialization shims for representation artifacts of older documents.
///
/// Two legacy shapes are accepted on load and never written back:
/// a name set encoded as a dynamically-shaped `{"name": true}` object, and
/// an empty mapping encoded as an empty sequence.
mod wire {
    use std::collections::{BTreeMap, BTreeSet};

    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NameSet {
        Listed(Vec<String>),
        Flagged(BTreeMap<String, bool>),
    }

    impl From<NameSet> for BTreeSet<String> {
        fn from(value: NameSet) -> Self {
            match value {
                NameSet::Listed(names) => names.into_iter().collect(),
                NameSet::Flagged(flags) => flags
                    .into_iter()
                    .filter(|(_, present)| *present)
                    .map(|(name, _)| name)
                    .collect(),
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeMap<V> {
        Map(BTreeMap<String, V>),
        Sequence(Vec<V>),
    }

    fn materialize<V, E: de::Error>(value: MaybeMap<V>) -> Result<BTreeMap<String, V>, E> {
        match value {
            MaybeMap::Map(map) => Ok(map),
            MaybeMap::Sequence(seq) if seq.is_empty() => Ok(BTreeMap::new()),
            MaybeMap::Sequence(_) => Err(E::custom(
                "mapping-valued field serialized as a non-empty sequence",
            )),
        }
    }

    pub fn name_sets<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<String, BTreeSet<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: MaybeMap<NameSet> = Deserialize::deserialize(deserializer)?;
        Ok(materialize(raw)?
            .into_iter()
            .map(|(key, set)| (key, set.into()))
            .collect())
    }

    pub fn file_lists<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: MaybeMap<Vec<String>> = Deserialize::deserialize(deserializer)?;
        materialize(raw)
    }
}

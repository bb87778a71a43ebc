use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A `group:name:version` module coordinate.
///
/// This is what a dependency edge requests and what a resolved artifact reports as its owner.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ModuleCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Identity of one resolved dependency artifact.
///
/// `file` is part of identity: a module version can publish several artifacts (main jar,
/// sources jar, ...) and each one is pinned separately.
///
/// Ordering is lexicographic over the canonical `group:name:version:file` form. Two distinct
/// keys can only render the same canonical form when a component contains `:`; those fall
/// back to component order so `Ord` agrees with `Eq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DependencyKey {
    group: String,
    name: String,
    version: String,
    file: String,
}

impl DependencyKey {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            file: file.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn coordinate(&self) -> ModuleCoordinate {
        ModuleCoordinate::new(&self.group, &self.name, &self.version)
    }

    /// Canonical `group:name:version:file` form.
    pub fn all(&self) -> String {
        format!("{}:{}:{}:{}", self.group, self.name, self.version, self.file)
    }

    /// `group:name:version`, used in log and error messages.
    pub fn short(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.version)
    }

    fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.group
            .bytes()
            .chain(std::iter::once(b':'))
            .chain(self.name.bytes())
            .chain(std::iter::once(b':'))
            .chain(self.version.bytes())
            .chain(std::iter::once(b':'))
            .chain(self.file.bytes())
    }
}

impl Ord for DependencyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes()
            .cmp(other.canonical_bytes())
            .then_with(|| {
                (&self.group, &self.name, &self.version, &self.file).cmp(&(
                    &other.group,
                    &other.name,
                    &other.version,
                    &other.file,
                ))
            })
    }
}

impl PartialOrd for DependencyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.name, self.version, self.file
        )
    }
}

/// Lowercase hex content digest of an artifact file.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Wrap an already-rendered hex digest. Uppercase input is folded to lowercase.
    pub fn new<S: AsRef<str>>(hex: S) -> Self {
        Self(hex.as_ref().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Card faces and the face catalog.
//!
//! A `Face` is the graphic a card reveals when turned up. The engine never
//! loads images; it only deals with face names (e.g. `"cat.png"`). The host
//! resolves names to pixels.
//!
//! `FaceCatalog` is the set of faces a deck can be dealt from. It is usually
//! parsed from a list file with one image name per line.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Identifier for a face: its position in the catalog.
///
/// Two cards in a deck share a `FaceId` exactly when they form a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    /// Create a new face ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// A single face graphic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Catalog name, usually an image file name.
    pub name: String,
}

impl Face {
    /// Create a face from its catalog name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Human-readable label: the name without its file extension.
    ///
    /// ```
    /// use concentration::cards::Face;
    ///
    /// assert_eq!(Face::new("tiger.png").label(), "tiger");
    /// assert_eq!(Face::new("tiger").label(), "tiger");
    /// ```
    #[must_use]
    pub fn label(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) if dot > 0 => &self.name[..dot],
            _ => &self.name,
        }
    }
}

/// The faces available for dealing.
///
/// Names are trimmed; blank names and duplicates are dropped so every
/// entry is a distinct face. Order of first appearance is kept. A catalog
/// holds at most `u32::MAX` faces; later names are ignored.
///
/// Serializes as a plain list of names. Deserializing goes through
/// [`FaceCatalog::new`], so the same cleanup applies.
///
/// ```
/// use concentration::cards::FaceCatalog;
///
/// let catalog = FaceCatalog::from_list("cat.png\ndog.png\n\ncat.png\n");
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FaceCatalog {
    faces: Vec<Face>,
}

impl FaceCatalog {
    /// Build a catalog from face names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let faces = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                if name.is_empty() || !seen.insert(name.to_string()) {
                    None
                } else {
                    Some(Face::new(name))
                }
            })
            .take(usize::try_from(u32::MAX).unwrap_or(usize::MAX))
            .collect();
        Self { faces }
    }

    /// Parse a list file: one face name per line.
    pub fn from_list(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Get a face by ID.
    #[must_use]
    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Find the ID of a face by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<FaceId> {
        self.iter()
            .find(|(_, face)| face.name == name)
            .map(|(id, _)| id)
    }

    /// Number of distinct faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over `(FaceId, &Face)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        (0u32..).map(FaceId::new).zip(self.faces.iter())
    }
}

impl From<Vec<String>> for FaceCatalog {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<FaceCatalog> for Vec<String> {
    fn from(catalog: FaceCatalog) -> Self {
        catalog.faces.into_iter().map(|face| face.name).collect()
    }
}

//! Acoustic material classification for sampled surfaces.
//!
//! Every surface in the scene carries explicit material tags. When a sample ray
//! hits a surface, its tags are looked up in a [`MaterialTable`] to find the
//! absorption coefficient that damps the estimated reverb.

/// Acoustic properties of a tagged surface material.
///
/// # Example
///
/// ```
/// use roomsense::scene::AcousticMaterial;
///
/// let curtain = AcousticMaterial::new("curtain", 0.6);
/// assert_eq!(curtain.tag(), "curtain");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticMaterial {
    tag: String,

    /// Amount subtracted from the reverb wetness per direction that sees this material.
    ///
    /// Usually in 0.0 - 1.0. Values above 1.0 are allowed and cancel out reflections
    /// contributed by other directions.
    absorption: f32,
}

impl AcousticMaterial {
    pub fn new(tag: impl Into<String>, absorption: f32) -> Self {
        Self {
            tag: tag.into(),
            absorption,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn absorption(&self) -> f32 {
        self.absorption
    }

    /// Validates that the material has a tag and a finite, non-negative absorption
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.tag.is_empty() {
            return Err("Material tag must not be empty");
        }

        if !self.absorption.is_finite() || self.absorption < 0.0 {
            return Err("Absorption must be a finite value >= 0.0");
        }

        Ok(())
    }
}

/// Ordered material lookup table.
///
/// Index 0 is the default material, used for misses and for surfaces whose tags
/// match no entry. The table can never be empty.
///
/// # Example
///
/// ```
/// use roomsense::scene::{AcousticMaterial, MaterialTable};
///
/// let mut materials = MaterialTable::new(AcousticMaterial::new("generic", 0.1));
/// let wood = materials.add(AcousticMaterial::new("wood", 0.3));
///
/// assert_eq!(materials.resolve(&["wood"]), wood);
/// assert_eq!(materials.resolve(&["unknown"]), MaterialTable::DEFAULT_INDEX);
/// ```
#[derive(Debug, Clone)]
pub struct MaterialTable {
    materials: Vec<AcousticMaterial>,
}

impl MaterialTable {
    /// Index of the fallback material
    pub const DEFAULT_INDEX: usize = 0;

    /// Creates a table containing only the given default material
    pub fn new(default: AcousticMaterial) -> Self {
        Self {
            materials: vec![default],
        }
    }

    /// Creates a material table pre-loaded with common surface presets
    ///
    /// Materials are added in the following order:
    /// - 0: generic (default)
    /// - 1: stone
    /// - 2: metal
    /// - 3: glass
    /// - 4: wood
    /// - 5: dirt
    /// - 6: foliage
    /// - 7: carpet
    /// - 8: fabric
    pub fn with_presets() -> Self {
        let mut table = Self::new(AcousticMaterial::new("generic", 0.1));
        table.add(AcousticMaterial::new("stone", 0.02));
        table.add(AcousticMaterial::new("metal", 0.05));
        table.add(AcousticMaterial::new("glass", 0.05));
        table.add(AcousticMaterial::new("wood", 0.3));
        table.add(AcousticMaterial::new("dirt", 0.5));
        table.add(AcousticMaterial::new("foliage", 0.7));
        table.add(AcousticMaterial::new("carpet", 0.8));
        table.add(AcousticMaterial::new("fabric", 1.0));
        table
    }

    /// Appends a material and returns its index.
    ///
    /// Later entries take priority over earlier ones when a surface carries
    /// several matching tags.
    pub fn add(&mut self, material: AcousticMaterial) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Resolves the tags of a hit surface to a material index.
    ///
    /// Every entry is tested in table order and the last match wins. Surfaces
    /// with no matching tag resolve to [`Self::DEFAULT_INDEX`].
    pub fn resolve<S: AsRef<str>>(&self, surface_tags: &[S]) -> usize {
        let mut resolved = Self::DEFAULT_INDEX;
        for (index, material) in self.materials.iter().enumerate() {
            if surface_tags.iter().any(|tag| tag.as_ref() == material.tag) {
                resolved = index;
            }
        }
        resolved
    }

    /// Retrieves a material by its index, falling back to the default material
    pub fn get_or_default(&self, index: usize) -> &AcousticMaterial {
        self.materials
            .get(index)
            .unwrap_or(&self.materials[Self::DEFAULT_INDEX])
    }

    pub fn get(&self, index: usize) -> Option<&AcousticMaterial> {
        self.materials.get(index)
    }

    pub fn default_material(&self) -> &AcousticMaterial {
        &self.materials[Self::DEFAULT_INDEX]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always false; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &AcousticMaterial)> {
        self.materials.iter().enumerate()
    }

    /// Validates every material in the table
    pub fn validate(&self) -> Result<(), String> {
        for (index, material) in self.iter() {
            material
                .validate()
                .map_err(|e| format!("Material {} ('{}'): {}", index, material.tag, e))?;
        }
        Ok(())
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::with_presets()
    }
}

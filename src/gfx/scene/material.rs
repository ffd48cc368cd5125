//! Flat material definitions shared across a scene's objects.

use std::collections::HashMap;

/// A simple shaded material: base colour plus a specular response.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// RGBA base colour, linear components in `0.0..=1.0`.
    pub base_color: [f32; 4],
    /// RGB specular tint.
    pub specular: [f32; 3],
    /// Phong exponent; higher is glossier.
    pub shininess: f32,
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            specular: [0.1, 0.1, 0.1],
            shininess: 32.0,
        }
    }

    pub fn with_specular(mut self, specular: [f32; 3], shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Convenience constructor from a packed 0xRRGGBB colour.
    pub fn from_hex(name: &str, hex: u32) -> Self {
        Self::new(name, hex_to_rgba(hex))
    }
}

/// Unpacks 0xRRGGBB into linear-ish RGBA components.
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Unpacks 0xRRGGBB into RGB components.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let [r, g, b, _] = hex_to_rgba(hex);
    [r, g, b]
}

/// Material storage with a default for objects that name none.
pub struct MaterialSet {
    materials: HashMap<String, Material>,
    default: Material,
}

impl MaterialSet {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default: Material::new("default", [0.8, 0.8, 0.8, 1.0]),
        }
    }

    pub fn add(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Material for an object, falling back to the default when the object
    /// names none or names one that does not exist.
    pub fn for_object(&self, name: Option<&str>) -> &Material {
        name.and_then(|n| self.materials.get(n))
            .unwrap_or(&self.default)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialSet {
    fn default() -> Self {
        Self::new()
    }
}

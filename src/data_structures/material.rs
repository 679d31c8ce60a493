//! Phong materials and the material library.

use cgmath::Vector3;

/// Parameters controlling how a surface reflects the scene's lights.
///
/// Materials are immutable after creation; the full set is defined once at
/// startup and looked up by tag for every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: impl Into<String>,
        ambient_color: Vector3<f32>,
        ambient_strength: f32,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.into(),
            ambient_color,
            ambient_strength,
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

/// The fixed list of materials available to the scene.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// First-match scan in definition order. An empty library reports no
    /// match without scanning.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        if self.materials.is_empty() {
            return None;
        }
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn brass() -> Material {
        Material::new(
            "brass",
            vec3(0.33, 0.22, 0.03),
            0.4,
            vec3(0.78, 0.57, 0.11),
            vec3(0.99, 0.94, 0.81),
            27.9,
        )
    }

    #[test]
    fn find_returns_the_exact_record() {
        let mut library = MaterialLibrary::new();
        library.define(brass());
        let found = library.find("brass").unwrap();
        assert_eq!(*found, brass());
    }

    #[test]
    fn empty_library_finds_nothing() {
        let library = MaterialLibrary::new();
        assert!(library.find("brass").is_none());
    }

    #[test]
    fn unknown_tag_leaves_prior_state_unchanged() {
        let mut library = MaterialLibrary::new();
        library.define(brass());
        assert!(library.find("chrome").is_none());
        assert_eq!(library.len(), 1);
        assert!(library.find("brass").is_some());
    }

    #[test]
    fn first_definition_wins_on_duplicates() {
        let mut library = MaterialLibrary::new();
        let mut shinier = brass();
        shinier.shininess = 99.0;
        library.define(brass());
        library.define(shinier);
        assert_eq!(library.find("brass").unwrap().shininess, 27.9);
    }
}

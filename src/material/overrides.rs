use super::{Material, rgb};

/// Replaces a part's material when the part name contains any of the listed
/// substrings. Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    pub name_contains: &'static [&'static str],
    pub material: Material,
}

impl OverrideRule {
    pub fn matches(&self, part_name: &str) -> bool {
        self.name_contains.iter().any(|s| part_name.contains(s))
    }
}

/// The fixed override set for character models: outfit and body parts turn
/// red, face parts get a skin tone. Rule order matters; the first match wins.
pub fn character_overrides() -> Vec<OverrideRule> {
    vec![
        OverrideRule {
            name_contains: &["Outfit", "Body"],
            material: Material {
                base_color: rgb(0xff0000),
                emissive: rgb(0xff0000),
                emissive_intensity: 0.4,
                roughness: 0.5,
                metalness: 0.0,
                base_color_texture: None,
            },
        },
        OverrideRule {
            name_contains: &["Face"],
            material: Material {
                base_color: rgb(0xfad0a1),
                emissive: rgb(0xfad0a1),
                emissive_intensity: 0.3,
                roughness: 0.6,
                metalness: 0.0,
                base_color_texture: None,
            },
        },
    ]
}

/// Applies the first matching rule to `material`. Returns whether any rule
/// matched; unmatched parts keep their loaded material.
pub fn apply_first_match(rules: &[OverrideRule], part_name: &str, material: &mut Material) -> bool {
    for rule in rules {
        if rule.matches(part_name) {
            *material = rule.material.clone();
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Material {
        Material {
            base_color: [0.3, 0.3, 0.3],
            ..Material::default()
        }
    }

    #[test]
    fn outfit_and_body_turn_red() {
        let rules = character_overrides();
        for name in ["Outfit_Top", "Body_Outer", "LowerBody"] {
            let mut mat = loaded();
            assert!(apply_first_match(&rules, name, &mut mat), "{name}");
            assert_eq!(mat.base_color, rgb(0xff0000));
            assert_eq!(mat.emissive, rgb(0xff0000));
            assert_eq!(mat.emissive_intensity, 0.4);
            assert_eq!(mat.roughness, 0.5);
            assert_eq!(mat.metalness, 0.0);
        }
    }

    #[test]
    fn face_gets_skin_tone() {
        let rules = character_overrides();
        let mut mat = loaded();
        assert!(apply_first_match(&rules, "Face_01", &mut mat));
        assert_eq!(mat.base_color, rgb(0xfad0a1));
        assert_eq!(mat.emissive_intensity, 0.3);
        assert_eq!(mat.roughness, 0.6);
    }

    #[test]
    fn unmatched_part_keeps_loaded_material() {
        let rules = character_overrides();
        let mut mat = loaded();
        assert!(!apply_first_match(&rules, "Hair", &mut mat));
        assert_eq!(mat, loaded());
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = character_overrides();
        let mut mat = loaded();
        // contains both "Body" and "Face"; the body rule is listed first
        assert!(apply_first_match(&rules, "Body_Face", &mut mat));
        assert_eq!(mat.base_color, rgb(0xff0000));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let rules = character_overrides();
        let mut mat = loaded();
        assert!(!apply_first_match(&rules, "body_outer", &mut mat));
        assert_eq!(mat, loaded());
    }
}

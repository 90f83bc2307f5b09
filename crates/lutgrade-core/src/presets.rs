//! Built-in looks shipped with every install.

use serde::{Deserialize, Serialize};

use crate::transform::lut::{ChannelTransform, Lut};

/// A built-in look with catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub description: String,
    pub lut: Lut,
}

struct PresetDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    channels: [(f64, f64); 3],
}

const BUILTIN: [PresetDef; 3] = [
    PresetDef {
        id: "1",
        name: "Vintage",
        description: "Sepia-leaning tones for a retro look",
        channels: [(20.0, 1.1), (10.0, 0.9), (-10.0, 0.8)],
    },
    PresetDef {
        id: "2",
        name: "Cool",
        description: "Bluish tones for a cold look",
        channels: [(-10.0, 0.9), (0.0, 1.0), (20.0, 1.2)],
    },
    PresetDef {
        id: "3",
        name: "Warm",
        description: "Reddish tones for a warm look",
        channels: [(20.0, 1.2), (10.0, 1.0), (-10.0, 0.8)],
    },
];

impl PresetDef {
    fn to_preset(&self) -> Preset {
        let [r, g, b] = self
            .channels
            .map(|(offset, factor)| ChannelTransform::new(offset, factor));
        Preset {
            id: self.id.to_string(),
            description: self.description.to_string(),
            lut: Lut::new(self.name, r, g, b),
        }
    }
}

/// All built-in looks, in catalog order.
pub fn builtin_luts() -> Vec<Preset> {
    BUILTIN.iter().map(PresetDef::to_preset).collect()
}

/// Look up a built-in look by name or id, ignoring case.
pub fn find_builtin(key: &str) -> Option<Preset> {
    let key = key.trim();
    BUILTIN
        .iter()
        .find(|def| def.id == key || def.name.eq_ignore_ascii_case(key))
        .map(PresetDef::to_preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_three_looks() {
        let names: Vec<String> = builtin_luts().into_iter().map(|p| p.lut.name).collect();
        assert_eq!(names, ["Vintage", "Cool", "Warm"]);
    }

    #[test]
    fn test_find_by_name_or_id() {
        let cool = find_builtin("cool").unwrap();
        assert_eq!(cool.lut.b, ChannelTransform::new(20.0, 1.2));
        assert_eq!(find_builtin("3").unwrap().lut.name, "Warm");
        assert!(find_builtin("sepia").is_none());
    }

    #[test]
    fn test_no_builtin_is_identity() {
        assert!(builtin_luts().iter().all(|p| !p.lut.is_identity()));
    }
}

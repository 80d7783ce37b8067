use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub version: u32,

    #[serde(default)]
    pub backend: Option<BackendConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

pub fn default_poll_interval_secs() -> u64 {
    10
}

/// Top-level document served by `GET /system/config`. The audio registry is
/// the editable sub-document; the rest is read-only summary data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub active_campaign: String,

    #[serde(default)]
    pub llm_provider: String,

    #[serde(default)]
    pub art_style: String,

    #[serde(default)]
    pub audio_registry: AudioRegistry,
}

/// The backend keeps camelCase keys for the registry; everything else on the
/// wire is snake_case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRegistry {
    #[serde(rename = "dmName", default = "default_dm_name")]
    pub dm_name: String,

    #[serde(rename = "dmVoice", default)]
    pub dm_voice: String,

    #[serde(default)]
    pub archetypes: Vec<Archetype>,

    #[serde(default)]
    pub soundscapes: Vec<Soundscape>,
}

fn default_dm_name() -> String {
    "DM".to_string()
}

impl Default for AudioRegistry {
    fn default() -> Self {
        Self {
            dm_name: default_dm_name(),
            dm_voice: String::new(),
            archetypes: Vec::new(),
            soundscapes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub voice_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soundscape {
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub track_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub has_pin: bool,
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoiceAsset {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackAsset {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartyMember {
    pub name: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub race: String,

    #[serde(default)]
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub race: String,

    #[serde(default)]
    pub level: u32,

    #[serde(default)]
    pub hp: i32,

    #[serde(default)]
    pub hp_max: i32,

    #[serde(default)]
    pub ac: i32,

    #[serde(default)]
    pub speed: i32,

    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
}

/// The managed container stack, in the order the overview lists it.
pub const SERVICES: [Service; 8] = [
    Service {
        id: "rq-bot",
        name: "Neural Net (Bot)",
    },
    Service {
        id: "rq-api",
        name: "API Gateway",
    },
    Service {
        id: "rq-kenku",
        name: "Kenku Bridge",
    },
    Service {
        id: "rq-scribe",
        name: "Audio Scribe",
    },
    Service {
        id: "rq-chroma",
        name: "Chroma Vector DB",
    },
    Service {
        id: "rq-mongo",
        name: "Mongo DB",
    },
    Service {
        id: "rq-redis",
        name: "Redis Cache",
    },
    Service {
        id: "rq-portal",
        name: "Portal UI",
    },
];

pub fn known_service(id: &str) -> bool {
    SERVICES.iter().any(|s| s.id == id)
}

/// Generate an id for a new registry row. The backend drops rows whose id is
/// empty, so ids are minted client-side before the first save.
pub fn new_item_id(prefix: &str) -> String {
    let mut bytes = [0u8; 5];
    // Row ids only need to be unique within one registry; a zeroed fallback
    // still saves.
    let _ = getrandom::getrandom(&mut bytes);
    let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}_{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_registry_tolerates_missing_fields() {
        let reg: AudioRegistry = serde_json::from_str("{}").unwrap();
        assert_eq!(reg.dm_name, "DM");
        assert!(reg.archetypes.is_empty());
    }

    #[test]
    fn audio_registry_round_trips_camel_case() {
        let reg = AudioRegistry {
            dm_name: "Narrator".to_string(),
            dm_voice: "v1".to_string(),
            archetypes: vec![Archetype {
                id: "archetype_01".to_string(),
                label: "The Villain".to_string(),
                voice_id: "v2".to_string(),
            }],
            soundscapes: Vec::new(),
        };
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json["dmName"], "Narrator");
        assert_eq!(json["dmVoice"], "v1");
        let back: AudioRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back, reg);
    }

    #[test]
    fn new_item_ids_carry_prefix() {
        let id = new_item_id("archetype");
        assert!(id.starts_with("archetype_"));
        assert!(id.len() > "archetype_".len());
    }
}

use serde::{Deserialize, Serialize};

/// Astronomy Picture of the Day. Transient, never cached or persisted.
///
/// Every known field is optional: entries with `media_type: "other"` carry
/// no `url`, and whatever NASA sends is forwarded as-is. Fields the dashboard
/// does not read are carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverManifest {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub landing_date: Option<String>,
    #[serde(default)]
    pub max_sol: Option<i32>,
    #[serde(default)]
    pub max_date: Option<String>,
    pub total_photos: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManifestEnvelope {
    pub photo_manifest: RoverManifest,
}

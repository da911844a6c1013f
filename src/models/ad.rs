use serde::{Deserialize, Serialize};

/// Ad creative. Impression/click counters live behind the tracking sink,
/// not here; this is render data only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ad {
    pub id: String,
    pub campaign_id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub media: Option<String>,
    pub link: String,
    pub cta_label: String,
}

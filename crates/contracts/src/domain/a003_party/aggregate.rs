use serde::{Deserialize, Serialize};

/// OCPI party (CPO/eMSP) known to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub country_code: String,
    pub party_id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_connected: bool,
    pub last_synced_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDraft {
    pub country_code: String,
    pub party_id: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

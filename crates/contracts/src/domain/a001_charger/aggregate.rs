use serde::{Deserialize, Serialize};

// ============================================================================
// Charger (charge point as registered over OCPP)
// ============================================================================

/// Место установки зарядной станции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerLocation {
    pub city: Option<String>,
    pub address: Option<String>,
}

/// Ссылка на тенанта-владельца
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charger {
    pub id: String,
    /// OCPP charge point identity (`chargeBoxIdentity`)
    pub charge_point_id: String,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    /// Last reported OCPP status, e.g. "Available", "Faulted"
    pub status: Option<String>,
    pub is_online: bool,
    pub connector_count: u32,
    /// ISO 8601 timestamp of the last heartbeat
    pub last_heartbeat: Option<String>,
    pub location: Option<ChargerLocation>,
    pub tenant: Option<TenantRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerDraft {
    pub charge_point_id: String,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub tenant_id: Option<String>,
}

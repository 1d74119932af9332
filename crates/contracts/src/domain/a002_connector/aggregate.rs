use serde::{Deserialize, Serialize};

/// Коннектор зарядной станции (OCPP connectorId > 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub charger_id: Option<String>,
    pub connector_id: u32,
    pub status: String,
    pub standard: Option<String>,
    pub max_power_kw: Option<f64>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorDraft {
    pub connector_id: u32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charger_id: Option<String>,
}

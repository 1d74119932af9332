//! HTTP adapter of the connector aggregate. Connectors are never fetched
//! one by one, so the bundle has no `get`.

use contracts::domain::a002_connector::aggregate::{Connector, ConnectorDraft};
use serde_json::Value;

use crate::shared::api_utils::{delete, get_json, path_segment, post_json, put_json};
use crate::shared::resource::{OperationBundle, Resource};

impl Resource for Connector {
    const ENTITY_TYPE: &'static str = "Connector";
    type Draft = ConnectorDraft;
}

pub async fn get_connectors(token: String) -> Result<Value, String> {
    get_json("/api/connectors", &token, "fetch connectors").await
}

pub async fn create_connector(data: ConnectorDraft, token: String) -> Result<Value, String> {
    post_json("/api/connectors", &data, &token, "create connector").await
}

pub async fn update_connector(
    id: String,
    data: ConnectorDraft,
    token: String,
) -> Result<Value, String> {
    let path = format!("/api/connectors/{}", path_segment(&id));
    put_json(&path, &data, &token, "update connector").await
}

pub async fn delete_connector(id: String, token: String) -> Result<(), String> {
    let path = format!("/api/connectors/{}", path_segment(&id));
    delete(&path, &token, "delete connector").await
}

pub fn bundle() -> OperationBundle<Connector> {
    OperationBundle::new()
        .list(get_connectors)
        .create(create_connector)
        .update(update_connector)
        .delete(delete_connector)
}

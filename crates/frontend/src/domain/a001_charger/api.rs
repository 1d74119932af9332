//! HTTP adapter of the charger aggregate.

use contracts::domain::a001_charger::aggregate::{Charger, ChargerDraft};
use serde_json::Value;

use crate::shared::api_utils::{delete, get_json, path_segment, post_json, put_json};
use crate::shared::resource::{OperationBundle, Resource};

impl Resource for Charger {
    const ENTITY_TYPE: &'static str = "Charger";
    type Draft = ChargerDraft;
}

pub async fn get_chargers(token: String) -> Result<Value, String> {
    get_json("/api/chargers", &token, "fetch chargers").await
}

pub async fn get_charger(id: String, token: String) -> Result<Value, String> {
    let path = format!("/api/chargers/{}", path_segment(&id));
    get_json(&path, &token, "fetch charger").await
}

pub async fn create_charger(data: ChargerDraft, token: String) -> Result<Value, String> {
    post_json("/api/chargers", &data, &token, "create charger").await
}

pub async fn update_charger(id: String, data: ChargerDraft, token: String) -> Result<Value, String> {
    let path = format!("/api/chargers/{}", path_segment(&id));
    put_json(&path, &data, &token, "update charger").await
}

pub async fn delete_charger(id: String, token: String) -> Result<(), String> {
    let path = format!("/api/chargers/{}", path_segment(&id));
    delete(&path, &token, "delete charger").await
}

pub fn bundle() -> OperationBundle<Charger> {
    OperationBundle::new()
        .list(get_chargers)
        .get(get_charger)
        .create(create_charger)
        .update(update_charger)
        .delete(delete_charger)
}

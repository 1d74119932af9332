//! OCPI parties are read-only in the console.

use contracts::domain::a003_party::aggregate::{Party, PartyDraft};
use serde_json::Value;

use crate::shared::api_utils::{get_json, path_segment};
use crate::shared::resource::{OperationBundle, Resource};

impl Resource for Party {
    const ENTITY_TYPE: &'static str = "Party";
    type Draft = PartyDraft;
}

pub async fn get_parties(token: String) -> Result<Value, String> {
    get_json("/api/ocpi/parties", &token, "fetch parties").await
}

pub async fn get_party(id: String, token: String) -> Result<Value, String> {
    let path = format!("/api/ocpi/parties/{}", path_segment(&id));
    get_json(&path, &token, "fetch party").await
}

pub fn bundle() -> OperationBundle<Party> {
    OperationBundle::new().list(get_parties).get(get_party)
}

use contracts::domain::a004_tenant::aggregate::{Tenant, TenantDraft};
use serde_json::Value;

use crate::shared::api_utils::{delete, get_json, path_segment, post_json, put_json};
use crate::shared::resource::{OperationBundle, Resource};

impl Resource for Tenant {
    const ENTITY_TYPE: &'static str = "Tenant";
    type Draft = TenantDraft;
}

pub async fn get_tenants(token: String) -> Result<Value, String> {
    get_json("/api/tenants", &token, "fetch tenants").await
}

pub async fn get_tenant(id: String, token: String) -> Result<Value, String> {
    let path = format!("/api/tenants/{}", path_segment(&id));
    get_json(&path, &token, "fetch tenant").await
}

pub async fn create_tenant(data: TenantDraft, token: String) -> Result<Value, String> {
    post_json("/api/tenants", &data, &token, "create tenant").await
}

pub async fn update_tenant(id: String, data: TenantDraft, token: String) -> Result<Value, String> {
    let path = format!("/api/tenants/{}", path_segment(&id));
    put_json(&path, &data, &token, "update tenant").await
}

pub async fn delete_tenant(id: String, token: String) -> Result<(), String> {
    let path = format!("/api/tenants/{}", path_segment(&id));
    delete(&path, &token, "delete tenant").await
}

pub fn bundle() -> OperationBundle<Tenant> {
    OperationBundle::new()
        .list(get_tenants)
        .get(get_tenant)
        .create(create_tenant)
        .update(update_tenant)
        .delete(delete_tenant)
}

use serde::{Deserialize, Serialize};

/// Тенант (оператор сети зарядных станций)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub charger_count: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDraft {
    pub name: String,
    pub contact_email: Option<String>,
    pub is_active: bool,
}

impl From<&Tenant> for TenantDraft {
    fn from(tenant: &Tenant) -> Self {
        Self {
            name: tenant.name.clone(),
            contact_email: tenant.contact_email.clone(),
            is_active: tenant.is_active,
        }
    }
}

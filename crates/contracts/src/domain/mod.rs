pub mod a001_charger;
pub mod a002_connector;
pub mod a003_party;
pub mod a004_tenant;

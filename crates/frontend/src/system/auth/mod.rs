pub mod api;
pub mod context;
pub mod storage;

pub use context::{use_auth, AuthProvider, AuthState, AuthTokenSource};

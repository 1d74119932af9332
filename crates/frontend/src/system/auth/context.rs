use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::resource::TokenSource;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

/// Auth context provider component
///
/// The session itself is issued elsewhere; the console only picks up the
/// stored token and checks it against the backend.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState {
        access_token: storage::get_access_token(),
        user_info: None,
    });

    Effect::new(move |_| {
        let Some(access_token) = auth_state.with_untracked(|s| s.access_token.clone()) else {
            log::info!("no stored access token");
            return;
        };
        spawn_local(async move {
            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    log::debug!("signed in as {}", user_info.username);
                    auth_state.update(|s| s.user_info = Some(user_info));
                }
                Err(e) => {
                    log::warn!("stored token rejected: {}", e);
                    storage::clear_tokens();
                    auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state.read_only());
    provide_context(auth_state.write_only());

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

/// Token of the auth context, falling back to localStorage when the
/// signal is gone (a binding outliving its screen).
#[derive(Clone, Copy)]
pub struct AuthTokenSource {
    state: ReadSignal<AuthState>,
}

impl AuthTokenSource {
    pub fn new(state: ReadSignal<AuthState>) -> Self {
        Self { state }
    }
}

impl TokenSource for AuthTokenSource {
    fn token(&self) -> Option<String> {
        match self.state.try_with_untracked(|s| s.access_token.clone()) {
            Some(token) => token,
            None => storage::get_access_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_comes_from_auth_state() {
        let state = RwSignal::new(AuthState {
            access_token: Some("t-1".to_string()),
            user_info: None,
        });
        let source = AuthTokenSource::new(state.read_only());
        assert_eq!(source.token().as_deref(), Some("t-1"));

        state.set(AuthState::default());
        assert_eq!(source.token(), None);
    }
}

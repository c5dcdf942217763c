use contracts::system::auth::{LoginResponse, RegisterRequest, UserInfo};
use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    /// Session saved by a previous visit, if both halves are present
    pub fn restore() -> Self {
        match (storage::get_access_token(), storage::get_user()) {
            (Some(token), Some(user)) => AuthState {
                access_token: Some(token),
                user_info: Some(user),
            },
            _ => AuthState::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user_info.as_ref().is_some_and(|u| u.is_admin())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    // Сессия восстанавливается из localStorage синхронно, до первого рендера
    let (auth_state, set_auth_state) = signal(AuthState::restore());

    provide_context(auth_state);
    provide_context(set_auth_state);

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

fn sign_in(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_access_token(&response.token);
    storage::save_user(&response.user);

    log::info!("signed in as {}", response.user.email);
    set_auth_state.set(AuthState {
        access_token: Some(response.token),
        user_info: Some(response.user),
    });
}

/// Helper: Perform login
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(email, password).await?;
    sign_in(set_auth_state, response);
    Ok(())
}

/// Helper: Perform registration
pub async fn do_register(
    set_auth_state: WriteSignal<AuthState>,
    request: RegisterRequest,
) -> Result<(), String> {
    let response = api::register(request).await?;
    sign_in(set_auth_state, response);
    Ok(())
}

/// Helper: Perform logout. The token is stateless on the API side, so this
/// only forgets it locally.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

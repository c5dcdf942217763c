use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Component that requires authentication
/// Redirects to the login page if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges
/// Signed-in customers are sent back to the storefront
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=move || {
                let path = if auth_state.get_untracked().is_authenticated() { "/" } else { "/login" };
                view! { <Redirect path=path /> }
            }
        >
            {children()}
        </Show>
    }
}

use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::system::auth::context::{do_register, use_auth};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = RegisterRequest {
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
        };

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match do_register(set_auth_state, request).await {
                Ok(()) => {
                    set_is_loading.set(false);
                    navigate("/", Default::default());
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    required
                    disabled=move || is_loading.get()
                />
            </div>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Create account"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    {field("first-name", "First name", "text", first_name)}
                    {field("last-name", "Last name", "text", last_name)}
                    {field("email", "Email", "email", email)}
                    {field("password", "Password", "password", password)}

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Creating..." } else { "Create account" }}
                    </button>
                </form>

                <p class="login-info">
                    "Already registered? " <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}

use crate::shared::api_utils::api_url;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    fn display_text(&self) -> &'static str {
        match self {
            ServerStatus::Online => "API: Online",
            ServerStatus::Offline => "API: Offline",
            ServerStatus::Checking => "API: Checking...",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);

    let check_server = move || {
        status.set(ServerStatus::Checking);

        spawn_local(async move {
            let online = ping_server().await;
            status.set(if online {
                ServerStatus::Online
            } else {
                ServerStatus::Offline
            });
        });
    };

    // Проверка при монтировании
    Effect::new(move |_| {
        check_server();
    });

    view! {
        <footer data-zone="footer" class="status-bar">
            <span class="status-bar__copyright">"© Mobile Gear"</span>
            <span
                class=move || status.get().css_class()
                title="Click to check again"
                on:click=move |_| check_server()
            >
                {move || status.get().display_text()}
            </span>
        </footer>
    }
}

/// Any answer from the API counts as online; only a transport failure is
/// offline. The first page of products is the cheapest public endpoint.
async fn ping_server() -> bool {
    match Request::get(&api_url("/api/products?page=1&limit=1"))
        .header("Accept", "application/json")
        .send()
        .await
    {
        Ok(_) => true,
        Err(e) => {
            log::warn!("API is unreachable: {}", e);
            false
        }
    }
}

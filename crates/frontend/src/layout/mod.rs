pub mod footer;
pub mod header;

use leptos::prelude::*;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                    |
/// +------------------------------------------+
/// |              routed page                  |
/// +------------------------------------------+
/// |                 Footer                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header::Header />
            <main class="app-main">
                {children()}
            </main>
            <footer::Footer />
        </div>
    }
}

use crate::domain::a003_cart::context::CartContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Корзина переживает смену маршрутов, поэтому живёт на уровне приложения
    provide_context(CartContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}

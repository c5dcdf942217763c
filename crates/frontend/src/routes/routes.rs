use crate::domain::a001_product::ui::admin::AdminProductList;
use crate::domain::a001_product::ui::details::ProductDetails;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_order::ui::admin_list::AdminOrderList;
use crate::domain::a002_order::ui::history::OrderHistory;
use crate::domain::a003_cart::ui::checkout::{CheckoutPage, CheckoutSuccess};
use crate::domain::a003_cart::ui::CartPage;
use crate::layout::Shell;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page empty-state">
            <h1>"Page not found"</h1>
            <a href="/">"Back to the store"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/products") view=ProductList />
                    <Route path=path!("/products/:id") view=ProductDetails />
                    <Route path=path!("/cart") view=CartPage />
                    <Route
                        path=path!("/checkout")
                        view=|| view! { <RequireAuth><CheckoutPage /></RequireAuth> }
                    />
                    <Route
                        path=path!("/checkout/success")
                        view=|| view! { <RequireAuth><CheckoutSuccess /></RequireAuth> }
                    />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route
                        path=path!("/orders")
                        view=|| view! { <RequireAuth><OrderHistory /></RequireAuth> }
                    />
                    <Route
                        path=path!("/admin/products")
                        view=|| view! { <RequireAdmin><AdminProductList /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/orders")
                        view=|| view! { <RequireAdmin><AdminOrderList /></RequireAdmin> }
                    />
                </Routes>
            </Shell>
        </Router>
    }
}

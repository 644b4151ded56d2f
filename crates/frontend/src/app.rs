use crate::app_shell::AppShell;
use crate::shared::notify::{NotificationHost, NotificationService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(NotificationService::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppShell />
            </AuthProvider>
            <NotificationHost />
        </ConfigProvider>
    }
}

//! Корень приложения: auth gate и общий каркас страницы

use crate::shared::icons::icon;
use crate::shared::notify::use_notifications;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::logs::ui::list::UsageLogList;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let notify = use_notifications();
    let user_label = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| {
                    let name = u.full_name.clone().unwrap_or_else(|| u.username.clone());
                    if u.is_admin {
                        format!("{} (admin)", name)
                    } else {
                        name
                    }
                })
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <span class="top-header__title">"Журнал API"</span>
            <div class="top-header__user">
                <span>{user_label}</span>
                <button
                    class="top-header__logout"
                    title="Выйти"
                    on:click=move |_| {
                        spawn_local(async move {
                            do_logout(set_auth_state).await;
                            notify.show_info("Сессия завершена");
                        })
                    }
                >
                    {icon("log-out")}
                </button>
            </div>
        </header>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <main class="app-layout__content">
                <UsageLogList />
            </main>
        </div>
    }
}

/// Показывает `LoginPage` без сессии и `MainLayout` после входа
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated() && s.user_info.is_some())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

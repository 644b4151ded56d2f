//! PageFrame: корневая обёртка страницы с `id` и `data-page-category`.

use leptos::prelude::*;

pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, например `"usage_log--list"`
    page_id: &'static str,
    /// PAGE_CAT_LIST или PAGE_CAT_SYSTEM
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

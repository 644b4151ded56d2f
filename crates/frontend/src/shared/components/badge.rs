use leptos::prelude::*;

/// Бейдж: "primary", "success", "warning", "error", остальное = "neutral"
#[component]
pub fn Badge(
    #[prop(optional, into)] variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        let modifier = match variant.get().as_deref() {
            Some("primary") => "badge--primary",
            Some("success") => "badge--success",
            Some("warning") => "badge--warning",
            Some("error") => "badge--error",
            _ => "badge--neutral",
        };
        format!("badge {}", modifier)
    };

    view! { <span class=class>{children()}</span> }
}

use contracts::shared::logger::LogType;
use leptos::prelude::*;

use crate::shared::date_utils::{input_to_unix, unix_to_input};
use crate::shared::icons::icon;
use crate::system::logs::model::LogFilter;

fn text_field(
    filter: RwSignal<LogFilter>,
    id: &'static str,
    label: &'static str,
    get: fn(&LogFilter) -> String,
    set: fn(&mut LogFilter, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="text"
                id=id
                name=id
                prop:value=move || filter.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| set(f, value));
                }
            />
        </div>
    }
}

fn time_field(
    filter: RwSignal<LogFilter>,
    id: &'static str,
    label: &'static str,
    tz_offset: i32,
    get: fn(&LogFilter) -> i64,
    set: fn(&mut LogFilter, i64),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="datetime-local"
                id=id
                name=id
                prop:value=move || unix_to_input(filter.with(get), tz_offset)
                on:change=move |ev| {
                    let ts = input_to_unix(&event_target_value(&ev), tz_offset);
                    filter.update(|f| set(f, ts));
                }
            />
        </div>
    }
}

/// Форма поиска. Пользователь и канал видны только администратору.
#[component]
pub fn LogToolbar(
    filter: RwSignal<LogFilter>,
    #[prop(into)] privileged: Signal<bool>,
    #[prop(into)] searching: Signal<bool>,
    /// Смещение часового пояса браузера, минуты
    tz_offset: i32,
    on_search: Callback<()>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_search.run(());
    };

    view! {
        <form class="filter-panel-content log-toolbar" on:submit=on_submit>
            {text_field(filter, "token_name", "Токен", |f| f.token_name.clone(), |f, v| f.token_name = v)}
            {text_field(filter, "model_name", "Модель", |f| f.model_name.clone(), |f, v| f.model_name = v)}
            {time_field(filter, "start_timestamp", "С", tz_offset, |f| f.start_timestamp, |f, v| f.start_timestamp = v)}
            {time_field(filter, "end_timestamp", "По", tz_offset, |f| f.end_timestamp, |f, v| f.end_timestamp = v)}

            <div class="form-group">
                <label for="log_type">"Тип"</label>
                <select
                    id="log_type"
                    name="type"
                    prop:value=move || filter.with(|f| f.log_type.to_string())
                    on:change=move |ev| {
                        let code = event_target_value(&ev).parse().unwrap_or(0);
                        filter.update(|f| f.log_type = code);
                    }
                >
                    {LogType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.code().to_string()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || privileged.get()>
                {text_field(filter, "username", "Пользователь", |f| f.username.clone(), |f, v| f.username = v)}
                {text_field(filter, "channel", "Канал (id)", |f| f.channel.clone(), |f, v| f.channel = v)}
            </Show>

            <div class="form-group form-group--action">
                <button type="submit" class="btn-primary" disabled=move || searching.get()>
                    {icon("search")}
                    " Поиск"
                </button>
            </div>
        </form>
    }
}

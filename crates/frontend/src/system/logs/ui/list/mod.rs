mod state;
mod table;
mod toolbar;

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::badge::Badge;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{local_offset_minutes, now_unix};
use crate::shared::icons::icon;
use crate::shared::notify::{use_notifications, NotificationService};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::context::use_auth;
use crate::system::logs::api::HttpLogSource;
use crate::system::logs::loader::{dispatch, reset_criteria, LoadFeedback, PageAction};
use crate::system::logs::model::{LogFilter, PAGE_SIZE_OPTIONS};
use state::{create_state, persist_page_size};
use table::LogTable;
use toolbar::LogToolbar;

/// Индикатор загрузки и уведомления страницы
#[derive(Clone, Copy)]
struct PageFeedback {
    searching: RwSignal<bool>,
    notify: NotificationService,
}

impl LoadFeedback for PageFeedback {
    fn set_searching(&self, searching: bool) {
        self.searching.set(searching);
    }

    fn show_error(&self, message: &str) {
        self.notify.show_error(message);
    }
}

#[component]
pub fn UsageLogList() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let privileged = Signal::derive(move || auth_state.with(|s| s.is_admin()));
    let tz_offset = local_offset_minutes();

    let page = create_state();
    let filter = RwSignal::new(LogFilter::defaults(now_unix()));
    let searching = RwSignal::new(false);
    let feedback = PageFeedback {
        searching,
        notify: use_notifications(),
    };

    // Снимок состояния -> запрос -> запись снимка обратно.
    // Параллельные действия не блокируются: побеждает последний ответ.
    let run = move |action: PageAction| {
        // Один и тот же `now` для формы и для запроса
        let now = now_unix();
        if action == PageAction::Refresh {
            filter.update(|f| reset_criteria(f, now));
        }
        spawn_local(async move {
            let mut st = page.get_untracked();
            let mut criteria = filter.get_untracked();
            dispatch(
                &HttpLogSource,
                &feedback,
                action,
                &mut st,
                &mut criteria,
                privileged.get_untracked(),
                now,
            )
            .await;
            if let PageAction::PageSize(size) = action {
                persist_page_size(size);
            }
            page.set(st);
        });
    };

    // Первая загрузка
    Effect::new(move |_| run(PageAction::Refresh));

    let rows = Signal::derive(move || page.with(|s| s.visible_rows().to_vec()));

    view! {
        <PageFrame page_id="usage_log--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Журнал использования API"</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.with(|s| s.total_count.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| run(PageAction::Refresh)
                        disabled=Signal::derive(move || searching.get())
                    >
                        {icon("refresh")}
                        " Сбросить фильтры"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <LogToolbar
                        filter=filter
                        privileged=privileged
                        searching=searching
                        tz_offset=tz_offset
                        on_search=Callback::new(move |_| run(PageAction::Search))
                    />
                </div>

                <Show when=move || searching.get()>
                    <div class="progress-bar progress-bar--indeterminate"></div>
                </Show>

                <LogTable rows=rows privileged=privileged searching=searching tz_offset=tz_offset />

                <PaginationControls
                    current_page=Signal::derive(move || page.with(|s| s.current_page))
                    total_pages=Signal::derive(move || page.with(|s| s.total_pages()))
                    total_count=Signal::derive(move || page.with(|s| s.total_count))
                    page_size=Signal::derive(move || page.with(|s| s.page_size))
                    on_page_change=Callback::new(move |p| run(PageAction::GoTo(p)))
                    on_page_size_change=Callback::new(move |size| run(PageAction::PageSize(size)))
                    page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                    disabled=Signal::derive(move || searching.get())
                />
            </div>
        </PageFrame>
    }
}

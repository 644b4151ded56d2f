//! Загрузка страниц логов и реакции на действия пользователя.
//!
//! Функции работают с `&mut LogPageState`, компонент берёт снимок состояния
//! из сигнала, дожидается результата и записывает снимок обратно.

use contracts::shared::logger::{LogListResponse, LogQuery};

use super::model::{LogFilter, LogPageState};

/// Источник страниц логов (HTTP в браузере, фейк в тестах)
#[allow(async_fn_in_trait)]
pub trait LogSource {
    async fn fetch(&self, privileged: bool, query: &LogQuery) -> Result<LogListResponse, String>;
}

/// Обратная связь со страницей: индикатор загрузки и показ ошибок
pub trait LoadFeedback {
    fn set_searching(&self, searching: bool);
    fn show_error(&self, message: &str);
}

/// Действие пользователя на странице
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAction {
    GoTo(usize),
    PageSize(usize),
    Search,
    Refresh,
}

/// Запросить страницу `page` и влить ответ в буфер
///
/// При ошибке буфер и total не меняются, сообщение уходит в `feedback`.
pub async fn load_page<S, F>(
    source: &S,
    feedback: &F,
    state: &mut LogPageState,
    filter: &LogFilter,
    privileged: bool,
    page: usize,
) -> bool
where
    S: LogSource,
    F: LoadFeedback,
{
    feedback.set_searching(true);
    let query = filter.to_query(page, state.page_size, privileged);
    log::debug!("Loading log page {} (size {})", page, state.page_size);

    let result = source
        .fetch(privileged, &query)
        .await
        .and_then(|response| response.into_result());

    let loaded = match result {
        Ok((data, total)) => {
            state.apply_page(page, data, total);
            true
        }
        Err(message) => {
            log::warn!("Log page {} failed: {}", page, message);
            feedback.show_error(&message);
            false
        }
    };

    feedback.set_searching(false);
    loaded
}

/// Переход на страницу. Следующую ещё не загруженную страницу сначала
/// запрашиваем; номер страницы меняется в любом случае.
pub async fn change_page<S: LogSource, F: LoadFeedback>(
    source: &S,
    feedback: &F,
    state: &mut LogPageState,
    filter: &LogFilter,
    privileged: bool,
    page: usize,
) {
    if state.needs_fetch(page) {
        load_page(source, feedback, state, filter, privileged, page).await;
    }
    state.current_page = page;
}

/// Смена размера страницы: возврат на страницу 0 и загрузка с нуля
pub async fn change_page_size<S: LogSource, F: LoadFeedback>(
    source: &S,
    feedback: &F,
    state: &mut LogPageState,
    filter: &LogFilter,
    privileged: bool,
    page_size: usize,
) {
    state.page_size = page_size.max(1);
    state.current_page = 0;
    load_page(source, feedback, state, filter, privileged, 0).await;
}

/// Поиск по текущим критериям с первой страницы
pub async fn search<S: LogSource, F: LoadFeedback>(
    source: &S,
    feedback: &F,
    state: &mut LogPageState,
    filter: &LogFilter,
    privileged: bool,
) {
    load_page(source, feedback, state, filter, privileged, 0).await;
    state.current_page = 0;
}

/// Критерии по умолчанию на момент `now`
pub fn reset_criteria(filter: &mut LogFilter, now: i64) {
    *filter = LogFilter::defaults(now);
}

/// Сброс критериев к значениям по умолчанию и загрузка первой страницы
pub async fn refresh<S: LogSource, F: LoadFeedback>(
    source: &S,
    feedback: &F,
    state: &mut LogPageState,
    filter: &mut LogFilter,
    privileged: bool,
    now: i64,
) {
    reset_criteria(filter, now);
    state.current_page = 0;
    load_page(source, feedback, state, filter, privileged, 0).await;
}

pub async fn dispatch<S: LogSource, F: LoadFeedback>(
    source: &S,
    feedback: &F,
    action: PageAction,
    state: &mut LogPageState,
    filter: &mut LogFilter,
    privileged: bool,
    now: i64,
) {
    match action {
        PageAction::GoTo(page) => {
            change_page(source, feedback, state, filter, privileged, page).await
        }
        PageAction::PageSize(size) => {
            change_page_size(source, feedback, state, filter, privileged, size).await
        }
        PageAction::Search => search(source, feedback, state, filter, privileged).await,
        PageAction::Refresh => refresh(source, feedback, state, filter, privileged, now).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::logs::model::tests::records;
    use contracts::shared::api_response::ApiResponse;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeSource {
        calls: RefCell<Vec<(bool, LogQuery)>>,
        replies: RefCell<VecDeque<Result<LogListResponse, String>>>,
    }

    impl FakeSource {
        fn reply(self, r: Result<LogListResponse, String>) -> Self {
            self.replies.borrow_mut().push_back(r);
            self
        }

        fn ok(self, ids: std::ops::Range<i64>, total: i64) -> Self {
            self.reply(Ok(ApiResponse::ok(records(ids), total)))
        }

        fn pages_requested(&self) -> Vec<i64> {
            self.calls.borrow().iter().map(|(_, q)| q.p).collect()
        }
    }

    impl LogSource for FakeSource {
        async fn fetch(
            &self,
            privileged: bool,
            query: &LogQuery,
        ) -> Result<LogListResponse, String> {
            self.calls.borrow_mut().push((privileged, query.clone()));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err("no reply queued".into()))
        }
    }

    #[derive(Default)]
    struct Feedback {
        searching: RefCell<Vec<bool>>,
        errors: RefCell<Vec<String>>,
    }

    impl LoadFeedback for Feedback {
        fn set_searching(&self, searching: bool) {
            self.searching.borrow_mut().push(searching);
        }

        fn show_error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn loaded_state(source: &FakeSource, fb: &Feedback) -> LogPageState {
        let mut st = LogPageState::new(10);
        let filter = LogFilter::defaults(0);
        block_on(load_page(source, fb, &mut st, &filter, true, 0));
        st
    }

    #[test]
    fn test_load_toggles_searching() {
        let source = FakeSource::default().ok(0..10, 10);
        let fb = Feedback::default();
        let st = loaded_state(&source, &fb);
        assert_eq!(st.buffer.len(), 10);
        assert_eq!(*fb.searching.borrow(), vec![true, false]);
        assert!(fb.errors.borrow().is_empty());
    }

    #[test]
    fn test_failure_keeps_buffer_and_reports_once() {
        let source = FakeSource::default().ok(0..10, 42).reply(Ok(ApiResponse::fail("нет доступа")));
        let fb = Feedback::default();
        let mut st = loaded_state(&source, &fb);
        let before = st.clone();

        let ok = block_on(load_page(&source, &fb, &mut st, &LogFilter::defaults(0), true, 1));
        assert!(!ok);
        assert_eq!(st, before);
        assert_eq!(*fb.errors.borrow(), vec!["нет доступа".to_string()]);
        assert_eq!(*fb.searching.borrow(), vec![true, false, true, false]);
    }

    #[test]
    fn test_transport_error_is_reported() {
        let source = FakeSource::default().reply(Err("HTTP 502".into()));
        let fb = Feedback::default();
        let st = loaded_state(&source, &fb);
        assert!(st.buffer.is_empty());
        assert_eq!(*fb.errors.borrow(), vec!["HTTP 502".to_string()]);
    }

    #[test]
    fn test_change_page_fetches_only_unloaded_next_page() {
        let source = FakeSource::default().ok(0..10, 25).ok(10..20, 25);
        let fb = Feedback::default();
        let mut st = loaded_state(&source, &fb);
        let filter = LogFilter::defaults(0);

        block_on(change_page(&source, &fb, &mut st, &filter, true, 1));
        assert_eq!(st.current_page, 1);
        assert_eq!(source.pages_requested(), vec![0, 1]);

        // already buffered
        block_on(change_page(&source, &fb, &mut st, &filter, true, 0));
        block_on(change_page(&source, &fb, &mut st, &filter, true, 1));
        assert_eq!(st.current_page, 1);
        assert_eq!(source.pages_requested(), vec![0, 1]);
    }

    #[test]
    fn test_change_page_moves_even_when_load_fails() {
        let source = FakeSource::default().ok(0..10, 25).reply(Err("timeout".into()));
        let fb = Feedback::default();
        let mut st = loaded_state(&source, &fb);

        block_on(change_page(&source, &fb, &mut st, &LogFilter::defaults(0), true, 1));
        assert_eq!(st.current_page, 1);
        assert_eq!(st.buffer.len(), 10);
        assert!(st.visible_rows().is_empty());
        assert_eq!(fb.errors.borrow().len(), 1);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let source = FakeSource::default()
            .ok(0..10, 60)
            .ok(10..20, 60)
            .ok(0..25, 60);
        let fb = Feedback::default();
        let mut st = loaded_state(&source, &fb);
        let filter = LogFilter::defaults(0);
        block_on(change_page(&source, &fb, &mut st, &filter, true, 1));

        block_on(change_page_size(&source, &fb, &mut st, &filter, true, 25));
        assert_eq!(st.current_page, 0);
        assert_eq!(st.page_size, 25);
        assert_eq!(st.buffer.len(), 25);
        let calls = source.calls.borrow();
        let (_, last) = calls.last().unwrap();
        assert_eq!(last.p, 0);
        assert_eq!(last.page_size, Some(25));
    }

    #[test]
    fn test_search_uses_current_filter_from_page_zero() {
        let source = FakeSource::default().ok(0..10, 30).ok(0..3, 3);
        let fb = Feedback::default();
        let mut st = loaded_state(&source, &fb);
        st.current_page = 2;

        let mut filter = LogFilter::defaults(0);
        filter.model_name = "claude".into();
        block_on(search(&source, &fb, &mut st, &filter, true));

        assert_eq!(st.current_page, 0);
        assert_eq!(st.total_count, 3);
        let calls = source.calls.borrow();
        assert_eq!(calls[1].1.model_name, "claude");
        assert_eq!(calls[1].1.p, 0);
    }

    #[test]
    fn test_refresh_resets_filter() {
        let source = FakeSource::default().ok(0..5, 5);
        let fb = Feedback::default();
        let mut st = LogPageState::new(10);
        st.current_page = 3;
        let mut filter = LogFilter::defaults(0);
        filter.token_name = "prod".into();
        filter.username = "bob".into();

        block_on(dispatch(
            &source,
            &fb,
            PageAction::Refresh,
            &mut st,
            &mut filter,
            false,
            1_000,
        ));

        assert_eq!(filter, LogFilter::defaults(1_000));
        assert_eq!(st.current_page, 0);
        let calls = source.calls.borrow();
        let (privileged, query) = &calls[0];
        assert!(!privileged);
        assert!(query.username.is_none());
        assert!(query.channel.is_none());
        assert_eq!(query.token_name, "");
        assert_eq!(query.end_timestamp, 4_600);
    }

    #[test]
    fn test_non_privileged_requests_never_carry_privileged_fields() {
        let source = FakeSource::default().ok(0..10, 20).ok(10..20, 20);
        let fb = Feedback::default();
        let mut st = LogPageState::new(10);
        let mut filter = LogFilter::defaults(0);
        filter.username = "mallory".into();
        filter.channel = "9".into();

        block_on(dispatch(&source, &fb, PageAction::Search, &mut st, &mut filter, false, 0));
        block_on(dispatch(&source, &fb, PageAction::GoTo(1), &mut st, &mut filter, false, 0));

        for (privileged, query) in source.calls.borrow().iter() {
            assert!(!privileged);
            assert!(query.username.is_none() && query.channel.is_none());
        }
        assert_eq!(source.pages_requested(), vec![0, 1]);
    }

    #[test]
    fn test_refresh_sends_the_criteria_shown_in_form() {
        let source = FakeSource::default().ok(0..5, 5);
        let fb = Feedback::default();
        let now = 1_700_000_000;

        let mut shown = LogFilter::defaults(0);
        shown.model_name = "gpt-4o".into();
        reset_criteria(&mut shown, now);

        let mut st = LogPageState::new(10);
        let mut sent = shown.clone();
        block_on(refresh(&source, &fb, &mut st, &mut sent, true, now));

        assert_eq!(sent, shown);
        let calls = source.calls.borrow();
        assert_eq!(calls[0].1.end_timestamp, shown.end_timestamp);
        assert_eq!(calls[0].1.model_name, "");
    }
}

//! Состояние страницы логов: критерии фильтра и буфер загруженных записей.
//!
//! Всё здесь чистая логика без обращения к DOM, поэтому покрыто нативными тестами.

use contracts::shared::logger::{LogQuery, LogRecord};

/// Размер страницы по умолчанию
pub const ITEMS_PER_PAGE: usize = 10;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Конец периода по умолчанию сдвинут на час вперёд, чтобы свежие записи
/// не выпадали из выборки
const DEFAULT_END_OFFSET_SECS: i64 = 3600;

/// Эндпоинт списка логов для роли пользователя
pub fn endpoint(privileged: bool) -> &'static str {
    if privileged {
        "/api/log/"
    } else {
        "/api/log/self/"
    }
}

/// Критерии поиска
#[derive(Clone, Debug, PartialEq)]
pub struct LogFilter {
    pub username: String,
    pub token_name: String,
    pub model_name: String,
    /// Unix seconds, 0 = без нижней границы
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    /// 0 = все типы
    pub log_type: i32,
    /// Id канала строкой, как его ввёл пользователь
    pub channel: String,
}

impl LogFilter {
    pub fn defaults(now: i64) -> Self {
        Self {
            username: String::new(),
            token_name: String::new(),
            model_name: String::new(),
            start_timestamp: 0,
            end_timestamp: now + DEFAULT_END_OFFSET_SECS,
            log_type: 0,
            channel: String::new(),
        }
    }

    /// Параметры запроса страницы. Для обычного пользователя username и
    /// channel в запрос не попадают.
    pub fn to_query(&self, page: usize, page_size: usize, privileged: bool) -> LogQuery {
        let query = LogQuery {
            p: page as i64,
            page_size: Some(page_size as i64),
            username: Some(self.username.clone()),
            token_name: self.token_name.clone(),
            model_name: self.model_name.clone(),
            start_timestamp: self.start_timestamp,
            end_timestamp: self.end_timestamp,
            log_type: self.log_type,
            channel: Some(self.channel.clone()),
        };

        if privileged {
            query
        } else {
            query.strip_privileged()
        }
    }
}

/// Пагинация и локальный буфер записей
///
/// `buffer[i]` это запись с абсолютной позицией `i` в серверной выборке.
/// `total_count` хранит последний total от сервера, а не длину буфера.
#[derive(Clone, Debug, PartialEq)]
pub struct LogPageState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub buffer: Vec<LogRecord>,
}

impl Default for LogPageState {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl LogPageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
            total_count: 0,
            buffer: Vec::new(),
        }
    }

    /// Влить ответ сервера за страницу `page`
    ///
    /// Страница 0 заменяет буфер целиком. Страница N перезаписывает
    /// `[N*page_size, N*page_size + data.len())`, дописывая хвост при нехватке.
    /// Если буфер короче `N*page_size`, данные ложатся в его конец.
    pub fn apply_page(&mut self, page: usize, data: Vec<LogRecord>, total: i64) {
        if page == 0 {
            self.buffer = data;
        } else {
            let start = (page * self.page_size).min(self.buffer.len());
            let end = (start + data.len()).min(self.buffer.len());
            self.buffer.splice(start..end, data);
        }
        self.total_count = total.max(0) as usize;
    }

    /// Сколько страниц уже лежит в буфере: `ceil(buffer.len / page_size)`
    pub fn loaded_pages(&self) -> usize {
        self.buffer.len().div_ceil(self.page_size)
    }

    /// Переход на `page` требует запроса к серверу
    pub fn needs_fetch(&self, page: usize) -> bool {
        page == self.loaded_pages()
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    /// Записи текущей страницы
    pub fn visible_rows(&self) -> &[LogRecord] {
        let start = (self.current_page * self.page_size).min(self.buffer.len());
        let end = (start + self.page_size).min(self.buffer.len());
        &self.buffer[start..end]
    }
}

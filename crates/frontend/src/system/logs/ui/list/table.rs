use contracts::shared::logger::{LogRecord, LogType};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::badge::Badge;
use crate::shared::date_utils::format_unix;
use crate::shared::number_format::{format_elapsed, format_int};

/// Подпись и вариант бейджа для кода типа
pub fn type_badge(code: i32) -> (&'static str, &'static str) {
    match LogType::from_code(code) {
        Some(LogType::Topup) => (LogType::Topup.label(), "success"),
        Some(LogType::Consume) => (LogType::Consume.label(), "primary"),
        Some(LogType::Manage) => (LogType::Manage.label(), "warning"),
        Some(LogType::System) => (LogType::System.label(), "neutral"),
        Some(LogType::All) | None => ("Неизвестно", "error"),
    }
}

const BASE_COLUMNS: usize = 9;
const ADMIN_COLUMNS: usize = 2;

#[component]
fn LogRow(record: LogRecord, privileged: bool, tz_offset: i32) -> impl IntoView {
    let (type_label, variant) = type_badge(record.log_type);
    let created = format_unix(record.created_at, tz_offset);
    let channel = if record.channel > 0 {
        record.channel.to_string()
    } else {
        String::new()
    };
    let elapsed = if record.is_stream {
        format!("{} · stream", format_elapsed(record.elapsed_time))
    } else {
        format_elapsed(record.elapsed_time)
    };
    let LogRecord {
        username,
        token_name,
        model_name,
        content,
        prompt_tokens,
        completion_tokens,
        quota,
        ..
    } = record;
    let content_title = content.clone();

    let admin_cells = privileged.then(move || {
        view! {
            <TableCell><TableCellLayout>{channel}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{username}</TableCellLayout></TableCell>
        }
    });

    view! {
        <TableRow>
            <TableCell><TableCellLayout>{created}</TableCellLayout></TableCell>
            {admin_cells}
            <TableCell><TableCellLayout>{token_name}</TableCellLayout></TableCell>
            <TableCell>
                <TableCellLayout>
                    <Badge variant=variant.to_string()>{type_label}</Badge>
                </TableCellLayout>
            </TableCell>
            <TableCell><TableCellLayout>{model_name}</TableCellLayout></TableCell>
            <TableCell><span class="cell--number">{format_int(prompt_tokens)}</span></TableCell>
            <TableCell><span class="cell--number">{format_int(completion_tokens)}</span></TableCell>
            <TableCell><span class="cell--number">{format_int(quota)}</span></TableCell>
            <TableCell><span class="cell--number">{elapsed}</span></TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class="cell--truncate" title=content_title>{content}</span>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
}

/// Таблица записей текущей страницы
#[component]
pub fn LogTable(
    #[prop(into)] rows: Signal<Vec<LogRecord>>,
    #[prop(into)] privileged: Signal<bool>,
    #[prop(into)] searching: Signal<bool>,
    tz_offset: i32,
) -> impl IntoView {
    let columns = move || {
        if privileged.get() {
            BASE_COLUMNS + ADMIN_COLUMNS
        } else {
            BASE_COLUMNS
        }
    };

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%; min-width: 1000px;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=150.0>"Время"</TableHeaderCell>
                        {move || privileged.get().then(|| view! {
                            <TableHeaderCell min_width=70.0>"Канал"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Пользователь"</TableHeaderCell>
                        })}
                        <TableHeaderCell min_width=120.0>"Токен"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Тип"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Модель"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Prompt"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Completion"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Квота"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Время ответа"</TableHeaderCell>
                        <TableHeaderCell min_width=200.0>"Подробности"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let data = rows.get();
                        if data.is_empty() {
                            let text = if searching.get() { "Загрузка..." } else { "Нет записей" };
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan=columns().to_string()>
                                        <TableCellLayout>{text}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        let admin = privileged.get();
                        data.into_iter()
                            .map(|record| view! { <LogRow record=record privileged=admin tz_offset=tz_offset /> })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_badge() {
        assert_eq!(type_badge(1), ("Пополнение", "success"));
        assert_eq!(type_badge(2), ("Расход", "primary"));
        assert_eq!(type_badge(3).1, "warning");
        assert_eq!(type_badge(4).1, "neutral");
        assert_eq!(type_badge(0), ("Неизвестно", "error"));
        assert_eq!(type_badge(77), ("Неизвестно", "error"));
    }
}

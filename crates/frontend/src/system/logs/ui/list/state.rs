use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::system::logs::model::{LogPageState, ITEMS_PER_PAGE, PAGE_SIZE_OPTIONS};

const STORAGE_KEY: &str = "usage_log_list_state_v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    page_size: usize,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Размер страницы из сохранённого JSON; неизвестные значения игнорируются
fn restore_page_size(raw: Option<&str>) -> usize {
    raw.and_then(|raw| serde_json::from_str::<PersistedState>(raw).ok())
        .map(|p| p.page_size)
        .filter(|size| PAGE_SIZE_OPTIONS.contains(size))
        .unwrap_or(ITEMS_PER_PAGE)
}

pub fn persist_page_size(page_size: usize) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(&PersistedState { page_size }) else {
        return;
    };
    let _ = storage.set_item(STORAGE_KEY, &raw);
}

pub fn create_state() -> RwSignal<LogPageState> {
    let raw = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    RwSignal::new(LogPageState::new(restore_page_size(raw.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_page_size() {
        assert_eq!(restore_page_size(None), ITEMS_PER_PAGE);
        assert_eq!(restore_page_size(Some(r#"{"page_size":50}"#)), 50);
        assert_eq!(restore_page_size(Some(r#"{"page_size":7}"#)), ITEMS_PER_PAGE);
        assert_eq!(restore_page_size(Some("not json")), ITEMS_PER_PAGE);
    }
}

use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Администратор видит логи всех пользователей
    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Восстановить сессию из localStorage: проверить access-токен, при отказе
/// обновить его по refresh-токену
async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;

    if let Ok(user_info) = api::get_current_user(&access_token).await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(user_info),
        });
    }

    let refresh_token = storage::get_refresh_token()?;
    let refreshed = api::refresh_token(refresh_token).await.ok()?;
    storage::save_access_token(&refreshed.access_token);
    let user_info = api::get_current_user(&refreshed.access_token).await.ok()?;

    Some(AuthState {
        access_token: Some(refreshed.access_token),
        user_info: Some(user_info),
    })
}

#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            match restore_session().await {
                Some(state) => set_auth_state.set(state),
                None => storage::clear_tokens(),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Выход: отозвать refresh-токен и очистить сессию
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u-1".into(),
            username: "alice".into(),
            full_name: None,
            is_admin,
        }
    }

    #[test]
    fn test_role_flags() {
        assert!(!AuthState::default().is_admin());
        assert!(!AuthState::default().is_authenticated());

        let state = AuthState {
            access_token: Some("t".into()),
            user_info: Some(user(true)),
        };
        assert!(state.is_authenticated());
        assert!(state.is_admin());

        let state = AuthState {
            user_info: Some(user(false)),
            ..state
        };
        assert!(!state.is_admin());
    }
}

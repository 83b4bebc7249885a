//! Auth collaborator types and the chat access gate.
//!
//! Authentication itself lives outside this crate; the controller only ever
//! sees the resolved profile, passed in explicitly at construction.
//!
//! ```rust
//! use mchat::{AuthState, ChatAccess, UserProfile, resolve_access};
//!
//! let profile = UserProfile::new("user-1", "Priya", "priya@example.com");
//! let access = resolve_access(&AuthState::authenticated(profile));
//! assert!(matches!(access, ChatAccess::Ready(_)));
//! ```

use mcommon::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Snapshot of the external auth collaborator's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_loading: true,
        }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            is_loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAccess {
    /// Auth state is still resolving; show the loading view.
    Pending,
    /// Not signed in; the chat view is never constructed.
    RedirectToLogin,
    Ready(UserProfile),
}

pub fn resolve_access(auth: &AuthState) -> ChatAccess {
    if auth.is_loading {
        return ChatAccess::Pending;
    }

    match (&auth.is_authenticated, &auth.user) {
        (true, Some(user)) => ChatAccess::Ready(user.clone()),
        _ => ChatAccess::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new("user-1", "Priya", "priya@example.com")
    }

    #[test]
    fn loading_auth_is_pending() {
        assert_eq!(resolve_access(&AuthState::loading()), ChatAccess::Pending);
    }

    #[test]
    fn unauthenticated_user_is_redirected() {
        assert_eq!(
            resolve_access(&AuthState::anonymous()),
            ChatAccess::RedirectToLogin
        );
    }

    #[test]
    fn authenticated_user_reaches_the_chat() {
        let access = resolve_access(&AuthState::authenticated(profile()));
        assert_eq!(access, ChatAccess::Ready(profile()));
    }

    #[test]
    fn authenticated_flag_without_profile_still_redirects() {
        let inconsistent = AuthState {
            is_authenticated: true,
            user: None,
            is_loading: false,
        };
        assert_eq!(resolve_access(&inconsistent), ChatAccess::RedirectToLogin);
    }
}

/// Creates a [`UserProfile`](crate::UserProfile) from id, name, and email.
///
/// ```rust
/// use mindscape::ms_user;
///
/// let profile = ms_user!("user-1", "Priya", "priya@example.com");
/// assert_eq!(profile.name, "Priya");
/// ```
#[macro_export]
macro_rules! ms_user {
    ($id:expr, $name:expr, $email:expr $(,)?) => {
        $crate::UserProfile::new($id, $name, $email)
    };
}

/// Creates an [`AuthState`](crate::AuthState) from a state shorthand.
///
/// ```rust
/// use mindscape::{ms_auth, ChatAccess, resolve_access};
///
/// let pending = ms_auth!(loading);
/// assert_eq!(resolve_access(&pending), ChatAccess::Pending);
///
/// let signed_in = ms_auth!("user-1", "Priya", "priya@example.com");
/// assert!(matches!(resolve_access(&signed_in), ChatAccess::Ready(_)));
/// ```
#[macro_export]
macro_rules! ms_auth {
    (loading $(,)?) => {
        $crate::AuthState::loading()
    };
    (anonymous $(,)?) => {
        $crate::AuthState::anonymous()
    };
    ($id:expr, $name:expr, $email:expr $(,)?) => {
        $crate::AuthState::authenticated($crate::UserProfile::new($id, $name, $email))
    };
}

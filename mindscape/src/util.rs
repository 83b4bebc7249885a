//! Small convenience constructors for common types.

use crate::{AuthState, TranscriptSnapshot, UserProfile};

pub fn user_profile(
    id: impl Into<mcommon::UserId>,
    name: impl Into<String>,
    email: impl Into<String>,
) -> UserProfile {
    UserProfile::new(id, name, email)
}

pub fn authenticated(profile: UserProfile) -> AuthState {
    AuthState::authenticated(profile)
}

/// Plain-text rendering of a snapshot, banner and disclaimer included.
pub fn snapshot_lines(snapshot: &TranscriptSnapshot) -> Vec<String> {
    mview::to_lines(&mview::render(snapshot))
}

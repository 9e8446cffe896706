//! Client wrappers for the current user's profile endpoints.

use crate::app_lib::{get_json, post_form, ApiError};
use crate::features::auth::store::SessionStore;
use crate::features::me::types::Profile;

pub async fn fetch_profile(store: &SessionStore) -> Result<Profile, ApiError> {
    get_json(store, "/api/auth/user-profile/").await
}

/// Uploads a new avatar as multipart form data and returns the updated profile.
pub async fn update_avatar(store: &SessionStore, file: &web_sys::File) -> Result<Profile, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Config("Failed to build upload form.".to_string()))?;
    form.append_with_blob("avatar", file)
        .map_err(|_| ApiError::Config("Failed to attach avatar file.".to_string()))?;
    post_form(store, "/api/auth/update-avatar/", form).await
}

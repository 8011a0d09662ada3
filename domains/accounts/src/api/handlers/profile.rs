//! Current-user profile handler

use axum::{extract::State, response::Json};

use yachay_auth::CurrentUser;
use yachay_common::Error;
use yachay_profiles::UserProfile;

use crate::api::middleware::AccountsState;

/// GET /api/users/me - Profile of the authenticated caller.
/// Authentication comes from the extractor, not the route policy.
pub async fn me(
    CurrentUser(identity): CurrentUser,
    State(state): State<AccountsState>,
) -> Result<Json<UserProfile>, Error> {
    let profile = state
        .profiles
        .get_profile(&identity.user_id)
        .await
        .map_err(|e| Error::Internal(format!("Failed to load profile: {}", e)))?
        .ok_or_else(|| Error::NotFound("Perfil no encontrado".to_string()))?;

    Ok(Json(profile))
}

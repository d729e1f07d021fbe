//! Handlers for the `/users` resource.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use marquee_core::password::Password;
use marquee_core::validator::Validator;
use marquee_db::models::user::{
    validate_email, validate_name, validate_password_plaintext, validate_user, UserFields,
};
use marquee_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::json::StrictJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /v1/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /v1/users
///
/// Register a new, not yet activated user. The welcome email is sent in the
/// background, so the response is 202.
/// Plaintext rules are checked before the password is hashed.
pub async fn register_user(
    State(state): State<AppState>,
    StrictJson(input): StrictJson<RegisterUser>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    validate_name(&mut v, &input.name);
    validate_email(&mut v, &input.email);
    validate_password_plaintext(&mut v, &input.password);
    v.finish()?;

    let fields = UserFields {
        name: input.name,
        email: input.email,
        password: Password::set(&input.password)?,
        activated: false,
    };

    let mut v = Validator::new();
    validate_user(&mut v, &fields);
    v.finish()?;

    let user = UserRepo::insert(&state.pool, &fields).await?;
    tracing::info!(user_id = user.id, "User registered");

    let mailer = Arc::clone(&state.mailer);
    let recipient = user.clone();
    state.background.spawn("welcome_email", async move {
        mailer.send_welcome(&recipient).await
    });

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: user })))
}

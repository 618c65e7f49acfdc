use actix_web::{get, post, web, HttpResponse};
use log::{debug, error};

use crate::{
    db::{
        users::{insert_user, next_user_id},
        with_connection,
    },
    errors::{ApiError, ADD_USER_FAILED, NEXT_ID_FAILED},
    models::{AddUserRequest, MessageResponse, NextIdResponse},
    validator::validate_new_user,
    AppState,
};

pub const ADD_USER_OK: &str = "Usuario agregado correctamente";

#[post("/add")]
pub async fn add_user(
    state: web::Data<AppState>,
    input: web::Json<AddUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = validate_new_user(input.into_inner())?;
    debug!("Inserting user {}", user.id_usuario);

    match with_connection(&state.db, move |conn| insert_user(conn, &user)).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse {
            message: ADD_USER_OK.to_owned(),
        })),
        Err(why) => {
            error!("{}", why);
            Err(ApiError::Internal(ADD_USER_FAILED))
        }
    }
}

#[get("/next-id")]
pub async fn get_next_id(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    match with_connection(&state.db, next_user_id).await {
        Ok(next_id) => Ok(HttpResponse::Ok().json(NextIdResponse { next_id })),
        Err(why) => {
            error!("{}", why);
            Err(ApiError::Internal(NEXT_ID_FAILED))
        }
    }
}

use serde::{Deserialize, Serialize};

/// A row of the `Usuarios` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id_usuario: i64,
    pub nombre: String,
    pub correo: String,
}

/// Body of `POST /add` as it arrives on the wire. Every field is optional so
/// that missing values reach the validator instead of failing extraction.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    pub id_usuario: Option<i64>,
    pub nombre: Option<String>,
    pub correo: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NextIdResponse {
    pub next_id: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

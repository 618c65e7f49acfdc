use thiserror::Error;

use crate::models::AddUserRequest;

pub const MAX_NOMBRE_LEN: usize = 100;
pub const MAX_CORREO_LEN: usize = 254;
/// Largest id the `Usuarios` table takes: the range of a 32-bit `INT` column.
pub const MAX_ID_USUARIO: i64 = i32::MAX as i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },

    #[error("{field} must not exceed {max}")]
    OutOfRange { field: &'static str, max: i64 },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// A user that passed validation and can be handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id_usuario: i64,
    pub nombre: String,
    pub correo: String,
}

pub fn validate_new_user(input: AddUserRequest) -> Result<NewUser, ValidationError> {
    let id_usuario = input
        .id_usuario
        .ok_or(ValidationError::Missing { field: "idUsuario" })?;
    if id_usuario < 1 {
        return Err(ValidationError::NotPositive { field: "idUsuario" });
    }
    if id_usuario > MAX_ID_USUARIO {
        return Err(ValidationError::OutOfRange {
            field: "idUsuario",
            max: MAX_ID_USUARIO,
        });
    }

    let nombre = required_text("nombre", input.nombre, MAX_NOMBRE_LEN)?;
    let correo = required_text("correo", input.correo, MAX_CORREO_LEN)?;
    check_email(&correo)?;

    Ok(NewUser {
        id_usuario,
        nombre,
        correo,
    })
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

fn check_email(correo: &str) -> Result<(), ValidationError> {
    let invalid = |reason| ValidationError::InvalidFormat {
        field: "correo",
        reason,
    };

    if correo.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    let mut parts = correo.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(invalid("must look like name@domain")),
    }
}

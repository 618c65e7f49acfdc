pub mod form;
pub mod user;

pub use form::FormResponse;
pub use user::{
    AddUserRequest, ErrorResponse, MessageResponse, NextIdResponse, StatusResponse, User,
};

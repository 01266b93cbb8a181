//! HTTP adapter for signup and login endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, FieldError, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
};
pub use handlers::AuthAppState;
pub use routes::auth_router;

//! Request DTOs and JSON mapping helpers.
//!
//! Domain drafts and patches deserialize straight from request bodies; only
//! shapes that need extra handling before touching the domain live here.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use clubhouse_auth::{Registration, Role, User};
use clubhouse_roster::SquadRole;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            role: req.role,
            avatar: req.avatar,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SquadRoleRequest {
    pub squad_role: SquadRole,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

/// User wire shape, built by hand so the credential hash cannot leak.
pub fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "full_name": user.full_name,
        "role": user.role,
        "avatar": user.avatar,
        "created_at": user.created_at,
    })
}

/// Response for register/login: the token plus the user it identifies.
pub fn session_json(token: &str, user: &User) -> Value {
    json!({
        "token": token,
        "user": user_json(user),
    })
}

pub fn items_json<T: Serialize>(items: &[T]) -> Value {
    json!({ "items": items })
}

use crate::auth::policy::{Action, allowed};
use crate::error::ApiError;
use crate::model::role::Role;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Identity resolved by the auth middleware from the bearer token.
#[derive(Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // the middleware on the protected scope puts this here
        let user = req.extensions().get::<AuthUser>().cloned();

        match user {
            Some(user) => ready(Ok(user)),
            None => ready(Err(ApiError::Unauthenticated.into())),
        }
    }
}

impl AuthUser {
    pub fn require(&self, action: Action) -> Result<(), ApiError> {
        if allowed(self.role, action) {
            return Ok(());
        }

        let needed = if allowed(Role::Staff, action) {
            "Staff"
        } else {
            "Admin"
        };
        Err(ApiError::Forbidden(format!("{needed} access required")))
    }
}

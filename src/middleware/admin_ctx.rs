//! Request context for the admin surface.
//!
//! Extracting an [`AdminCtx`] resolves the `admin_session` cookie to a
//! user once per request; handlers then call `require_auth` or
//! `require_admin` to guard their operation. A request without a valid
//! cookie still extracts successfully — it simply carries no user, so
//! the public surface can share the extractor.

use actix_web::dev::Payload;
use actix_web::{error, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::db::get_db_pool;
use crate::orm::users;
use crate::session;

#[derive(Clone, Debug, Default)]
pub struct AdminCtx {
    user: Option<users::Model>,
}

impl AdminCtx {
    pub fn user(&self) -> Option<&users::Model> {
        self.user.as_ref()
    }

    /// The signed-in user, or Unauthorized when the cookie resolves to
    /// nobody.
    pub fn require_auth(&self) -> Result<&users::Model, Error> {
        self.user
            .as_ref()
            .ok_or_else(|| error::ErrorUnauthorized("Authentication required"))
    }

    /// The signed-in admin. Unauthenticated requests get Unauthorized,
    /// authenticated non-admins get Forbidden.
    pub fn require_admin(&self) -> Result<&users::Model, Error> {
        let user = self.require_auth()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(error::ErrorForbidden("Admin access required"))
        }
    }
}

impl FromRequest for AdminCtx {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = session::current_user(&req, get_db_pool())
                .await
                .map_err(|e| {
                    log::error!("Session lookup failed: {}", e);
                    error::ErrorInternalServerError("Session lookup failed")
                })?;
            Ok(AdminCtx { user })
        })
    }
}

use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Admin API key authentication middleware
///
/// Every request must carry an `X-API-Key` header whose value verifies
/// against the configured argon2 hash. Wrap only the admin scope with it;
/// health probes stay public.
#[derive(Clone)]
pub struct AdminAuth {
    key_hash: Arc<str>,
}

impl AdminAuth {
    pub fn new(key_hash: impl Into<Arc<str>>) -> Self {
        Self {
            key_hash: key_hash.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            key_hash: self.key_hash.clone(),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    key_hash: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let key_hash = self.key_hash.clone();

        Box::pin(async move {
            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?;

            // Argon2 verification is CPU-bound
            let valid = web::block(move || verify_api_key(&api_key, &key_hash))
                .await
                .map_err(|e| AppError::internal(format!("Key verification failed: {}", e)))??;

            if !valid {
                tracing::warn!(path = %req.path(), "Rejected request with invalid API key");
                return Err(AppError::unauthorized("Invalid API key").into());
            }

            svc.call(req).await
        })
    }
}

/// Hash an API key with Argon2; the output goes into `ADMIN_API_KEY_HASH`
pub fn hash_api_key(api_key: &str) -> crate::core::Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(api_key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

/// Verify an API key against an Argon2 PHC string
pub fn verify_api_key(api_key: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(api_key.as_bytes(), &parsed_hash)
        .is_ok())
}

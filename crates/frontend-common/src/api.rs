//! Wrapped API client that handles auth errors automatically

use crate::auth::{AuthError, SessionManager};
use ara_http::client::endpoints::Resource;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Backend client that attaches the session's bearer token to every request.
///
/// A 401 response ends the session: [`SessionManager::logout`] runs, then
/// the call fails with [`AuthError::SessionExpired`]. Other error responses
/// come back as [`AuthError::Client`] carrying the server's message.
#[derive(Clone)]
pub struct ApiClient {
    session: SessionManager,
}

impl ApiClient {
    pub const fn new(session: SessionManager) -> Self {
        Self { session }
    }

    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AuthError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AuthError> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }

    /// Execute a request and handle auth errors
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let client = self.session.authorized_client();
        let mut request = client.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        match client.execute(request).await {
            Ok(result) => Ok(result),
            Err(error) if error.is_auth_expired() => {
                tracing::warn!(%method, path, "Session rejected by server");
                self.session.logout().await;
                Err(AuthError::SessionExpired)
            }
            Err(error) => {
                tracing::error!(%method, path, error = %error, "API request failed");
                Err(error.into())
            }
        }
    }

    /// List a resource collection
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<T, AuthError> {
        self.get(resource.path()).await
    }

    /// Fetch one item of a resource
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: impl std::fmt::Display,
    ) -> Result<T, AuthError> {
        self.get(&resource.item(id)).await
    }

    /// Create an item in a resource collection
    pub async fn create<T, B>(&self, resource: Resource, body: &B) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(resource.path(), body).await
    }
}

// crates/tripcat-core/src/backend.rs

//! # Appwrite Client
//!
//! A thin REST client for the document store that owns users and trips.
//! It is built once from [`BackendConfig`] and handed to whoever needs it;
//! there is no process-wide instance.

use crate::auth::{SessionProvider, User};
use crate::error::{Result, TripError};
use crate::settings::BackendConfig;
use crate::trip::{SubmissionIntent, TripStore};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

const GOOGLE_PHOTOS_URL: &str = "https://people.googleapis.com/v1/people/me?personFields=photos";

/// Appwrite query builders (JSON query syntax).
pub mod query {
    use serde_json::json;

    pub fn limit(n: usize) -> String {
        json!({ "method": "limit", "values": [n] }).to_string()
    }

    pub fn offset(n: usize) -> String {
        json!({ "method": "offset", "values": [n] }).to_string()
    }

    pub fn equal(attribute: &str, value: &str) -> String {
        json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
    }
}

/// A created document; only the id is of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRef {
    #[serde(rename = "$id")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: usize,
    pub documents: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    #[serde(default)]
    provider_access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct GooglePhotos {
    #[serde(default)]
    photos: Vec<GooglePhoto>,
}

#[derive(Debug, Deserialize)]
struct GooglePhoto {
    url: String,
}

/// Body of a new users-collection document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewUser {
    account_id: String,
    email: String,
    name: String,
    image_url: Option<String>,
    joined_at: String,
}

impl NewUser {
    fn from_account(account: Account, image_url: Option<String>) -> Self {
        Self {
            account_id: account.id,
            email: account.email,
            name: account.name,
            image_url,
            joined_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub struct AppwriteClient {
    config: BackendConfig,
    http: Client,
}

impl AppwriteClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| TripError::Backend(e.to_string()))?;
        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: BackendConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn collection_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.config.database_id, collection_id
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.url(path))
            .header("X-Appwrite-Project", &self.config.project_id);
        if let Some(key) = &self.config.api_key {
            req = req.header("X-Appwrite-Key", key);
        }
        if let Some(session) = &self.config.session {
            req = req.header("X-Appwrite-Session", session);
        }
        req
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let response = req.send().map_err(|e| TripError::Backend(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(TripError::Backend(format!("{status}: {body}")))
    }

    fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .map_err(|e| TripError::Backend(format!("unexpected response: {e}")))
    }

    fn create_request<T: Serialize>(&self, collection_id: &str, data: &T) -> RequestBuilder {
        let body = json!({ "documentId": "unique()", "data": data });
        self.request(Method::POST, &self.collection_path(collection_id))
            .json(&body)
    }

    /// Create a document with a server-generated id and decode the stored
    /// document as `R`.
    pub fn create_document<T: Serialize, R: DeserializeOwned>(
        &self,
        collection_id: &str,
        data: &T,
    ) -> Result<R> {
        Self::parse(self.send(self.create_request(collection_id, data))?)
    }

    pub fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[String],
    ) -> Result<DocumentList<T>> {
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();
        let req = self
            .request(Method::GET, &self.collection_path(collection_id))
            .query(&params);
        Self::parse(self.send(req)?)
    }

    /// One page of the users collection.
    pub fn list_users(&self, limit: usize, offset: usize) -> Result<UserPage> {
        let list: DocumentList<User> = self.list_documents(
            &self.config.user_collection_id,
            &[query::limit(limit), query::offset(offset)],
        )?;
        Ok(UserPage {
            users: list.documents,
            total: list.total,
        })
    }

    /// The user document belonging to an auth account.
    pub fn find_user(&self, account_id: &str) -> Result<Option<User>> {
        let list: DocumentList<User> = self.list_documents(
            &self.config.user_collection_id,
            &[query::equal("accountId", account_id), query::limit(1)],
        )?;
        Ok(list.documents.into_iter().next())
    }

    /// The auth account behind the session, `None` when signed out.
    fn account(&self) -> Result<Option<Account>> {
        let response = self
            .request(Method::GET, "/account")
            .send()
            .map_err(|e| TripError::Backend(e.to_string()))?;
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("no active session");
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(TripError::Backend(format!("{status}: {body}")));
        }
        Self::parse(response).map(Some)
    }

    /// Profile picture of the OAuth provider account, if any. Failures are
    /// logged and give `None`.
    fn profile_picture(&self) -> Option<String> {
        let session: Session = self
            .send(self.request(Method::GET, "/account/sessions/current"))
            .and_then(Self::parse)
            .unwrap_or_default();
        if session.provider_access_token.is_empty() {
            return None;
        }
        let photos = self
            .http
            .get(GOOGLE_PHOTOS_URL)
            .bearer_auth(&session.provider_access_token)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<GooglePhotos>());
        match photos {
            Ok(p) => p.photos.into_iter().map(|p| p.url).find(|u| !u.is_empty()),
            Err(e) => {
                warn!(error = %e, "profile picture unavailable");
                None
            }
        }
    }

    /// Record the signed-in account in the users collection and return the
    /// stored document.
    pub fn store_user(&self) -> Result<User> {
        let account = self
            .account()?
            .ok_or_else(|| TripError::Backend("no active session to store".into()))?;
        let image_url = self.profile_picture();
        let new_user = NewUser::from_account(account, image_url);
        let user: User = self.create_document(&self.config.user_collection_id, &new_user)?;
        info!(account = %user.account_id, "stored user");
        Ok(user)
    }

    fn logout_request(&self) -> RequestBuilder {
        self.request(Method::DELETE, "/account/sessions/current")
    }

    /// End the current session.
    pub fn logout(&self) -> Result<()> {
        self.send(self.logout_request())?;
        info!("session closed");
        Ok(())
    }
}

impl TripStore for AppwriteClient {
    fn save(&self, intent: &SubmissionIntent) -> Result<String> {
        let doc: DocumentRef = self.create_document(&self.config.trip_collection_id, intent)?;
        Ok(doc.id)
    }
}

impl SessionProvider for AppwriteClient {
    fn current_user(&self) -> Result<Option<User>> {
        match self.account()? {
            Some(account) => self.find_user(&account.id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as Json;

    fn config() -> BackendConfig {
        BackendConfig {
            endpoint: "https://cloud.appwrite.io/v1/".into(),
            project_id: "travel".into(),
            api_key: Some("secret".into()),
            session: None,
            database_id: "main".into(),
            user_collection_id: "users".into(),
            trip_collection_id: "trips".into(),
        }
    }

    #[test]
    fn builds_collection_urls() {
        let client = AppwriteClient::new(config()).unwrap();
        assert_eq!(
            client.url(&client.collection_path("trips")),
            "https://cloud.appwrite.io/v1/databases/main/collections/trips/documents"
        );
    }

    #[test]
    fn requests_carry_project_headers() {
        let client = AppwriteClient::new(config()).unwrap();
        let req = client.request(Method::GET, "/account").build().unwrap();
        assert_eq!(req.headers()["X-Appwrite-Project"], "travel");
        assert_eq!(req.headers()["X-Appwrite-Key"], "secret");
        assert!(req.headers().get("X-Appwrite-Session").is_none());
    }

    #[test]
    fn queries_use_the_json_syntax() {
        let q: Json = serde_json::from_str(&query::equal("accountId", "abc")).unwrap();
        assert_eq!(q["method"], "equal");
        assert_eq!(q["attribute"], "accountId");
        assert_eq!(q["values"][0], "abc");
        let q: Json = serde_json::from_str(&query::limit(25)).unwrap();
        assert_eq!(q["values"][0], 25);
    }

    #[test]
    fn user_documents_decode() {
        let body = r#"{ "total": 1, "documents": [ {
            "$id": "doc-1", "accountId": "acc-1", "name": "Ada",
            "email": "ada@example.com", "imageUrl": null, "joinedAt": "2025-07-08T11:52:00.000Z"
        } ] }"#;
        let list: DocumentList<User> = serde_json::from_str(body).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.documents[0].account_id, "acc-1");
        assert_eq!(list.documents[0].image_url, None);
    }

    #[test]
    fn logout_deletes_the_current_session() {
        let client = AppwriteClient::new(config()).unwrap();
        let req = client.logout_request().build().unwrap();
        assert_eq!(req.method(), &Method::DELETE);
        assert_eq!(
            req.url().as_str(),
            "https://cloud.appwrite.io/v1/account/sessions/current"
        );
        assert_eq!(req.headers()["X-Appwrite-Project"], "travel");
    }

    #[test]
    fn new_users_are_created_with_a_unique_id() {
        let client = AppwriteClient::new(config()).unwrap();
        let account: Account = serde_json::from_str(
            r#"{ "$id": "acc-1", "name": "Ada", "email": "ada@example.com", "status": true }"#,
        )
        .unwrap();
        let new_user = NewUser::from_account(account, None);
        let req = client.create_request("users", &new_user).build().unwrap();

        assert_eq!(req.method(), &Method::POST);
        assert!(req.url().path().ends_with("/collections/users/documents"));
        let body: Json = serde_json::from_slice(req.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body["documentId"], "unique()");
        let data = &body["data"];
        assert_eq!(data["accountId"], "acc-1");
        assert_eq!(data["email"], "ada@example.com");
        assert_eq!(data["name"], "Ada");
        assert!(data["imageUrl"].is_null());
        let joined = data["joinedAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(joined).is_ok());
        assert!(joined.ends_with('Z'));
    }

    #[test]
    fn created_user_documents_decode() {
        let body = r#"{ "$id": "doc-9", "$collectionId": "users", "accountId": "acc-1",
            "name": "Ada", "email": "ada@example.com",
            "imageUrl": "https://lh3.example/ada.jpg", "joinedAt": "2025-07-08T11:52:00.000Z" }"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert_eq!(user.account_id, "acc-1");
        assert_eq!(user.image_url.as_deref(), Some("https://lh3.example/ada.jpg"));
    }

    #[test]
    fn google_photos_decode() {
        let body = r#"{ "resourceName": "people/1", "photos": [ { "url": "https://lh3.example/a.jpg" } ] }"#;
        let photos: GooglePhotos = serde_json::from_str(body).unwrap();
        assert_eq!(photos.photos[0].url, "https://lh3.example/a.jpg");
        let empty: GooglePhotos = serde_json::from_str("{}").unwrap();
        assert!(empty.photos.is_empty());
    }
}

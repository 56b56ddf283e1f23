use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tt_core::errors::NotesSyncError;
use tt_core::ports::NotesRemotePort;
use tt_core::UserId;

/// HTTP client for the notes-sync worker.
///
/// Wire contract:
/// - `GET {base}?action=getNotes&userId=<id>` → `{status, notes}`
/// - `POST {base}?action=saveNotes` with `{userId, notes}` → `{status}`
///
/// `notes` is the sealed envelope; the worker treats it as opaque. Older
/// deployments may answer with a bare JSON array instead of a string, the
/// caller decides whether such a payload still opens.
pub struct NotesWorkerClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GetNotesResponse {
    status: String,
    #[serde(default)]
    notes: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveNotesResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveNotesBody<'a> {
    user_id: &'a str,
    notes: &'a str,
}

impl NotesWorkerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NotesSyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotesSyncError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn rejection(status: String, message: Option<String>) -> NotesSyncError {
        NotesSyncError::Rejected(message.unwrap_or(status))
    }
}

#[async_trait]
impl NotesRemotePort for NotesWorkerClient {
    async fn fetch_notes(&self, user_id: &UserId) -> Result<Option<String>, NotesSyncError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("action", "getNotes"), ("userId", user_id.as_ref())])
            .send()
            .await
            .map_err(|e| NotesSyncError::Network(e.to_string()))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(NotesSyncError::Status(http_status.as_u16()));
        }

        let body: GetNotesResponse = response
            .json()
            .await
            .map_err(|e| NotesSyncError::Network(e.to_string()))?;
        if body.status != "success" {
            return Err(Self::rejection(body.status, body.message));
        }

        let notes = match body.notes {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) if s.is_empty() => None,
            Some(serde_json::Value::String(s)) => Some(s),
            // Legacy array payload: hand back its JSON form.
            Some(other) => Some(other.to_string()),
        };
        debug!(user_id = %user_id, present = notes.is_some(), "fetched cloud notes");
        Ok(notes)
    }

    async fn save_notes(&self, user_id: &UserId, blob: &str) -> Result<(), NotesSyncError> {
        let response = self
            .client
            .post(&self.base_url)
            .query(&[("action", "saveNotes")])
            .json(&SaveNotesBody {
                user_id: user_id.as_ref(),
                notes: blob,
            })
            .send()
            .await
            .map_err(|e| NotesSyncError::Network(e.to_string()))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(NotesSyncError::Status(http_status.as_u16()));
        }

        let body: SaveNotesResponse = response
            .json()
            .await
            .map_err(|e| NotesSyncError::Network(e.to_string()))?;
        if body.status != "success" {
            return Err(Self::rejection(body.status, body.message));
        }
        debug!(user_id = %user_id, "cloud notes saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> NotesWorkerClient {
        NotesWorkerClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_the_stored_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("action".into(), "getNotes".into()),
                mockito::Matcher::UrlEncoded("userId".into(), "user-1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status":"success","notes":"sealed-blob"}"#)
            .create_async()
            .await;

        let notes = client(&server.url())
            .fetch_notes(&UserId::from("user-1"))
            .await
            .unwrap();

        assert_eq!(notes.as_deref(), Some("sealed-blob"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_with_no_stored_notes_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"success","notes":""}"#)
            .create_async()
            .await;

        let notes = client(&server.url())
            .fetch_notes(&UserId::from("user-1"))
            .await
            .unwrap();
        assert_eq!(notes, None);
    }

    #[tokio::test]
    async fn legacy_array_payload_comes_back_as_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"success","notes":[{"title":"Old"}]}"#)
            .create_async()
            .await;

        let notes = client(&server.url())
            .fetch_notes(&UserId::from("user-1"))
            .await
            .unwrap();
        assert_eq!(notes.as_deref(), Some(r#"[{"title":"Old"}]"#));
    }

    #[tokio::test]
    async fn save_posts_the_envelope_under_the_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_query(mockito::Matcher::UrlEncoded(
                "action".into(),
                "saveNotes".into(),
            ))
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "userId": "user-1",
                "notes": "sealed-blob",
            })))
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        client(&server.url())
            .save_notes(&UserId::from("user-1"), "sealed-blob")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_http_status_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server.url())
            .save_notes(&UserId::from("user-1"), "blob")
            .await
            .unwrap_err();
        assert!(matches!(err, NotesSyncError::Status(500)));
    }

    #[tokio::test]
    async fn worker_level_rejection_carries_the_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"error","message":"unknown user"}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .fetch_notes(&UserId::from("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotesSyncError::Rejected(msg) if msg == "unknown user"));
    }
}

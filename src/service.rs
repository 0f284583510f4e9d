//! Content service - request validation and error mapping over the post store
//!
//! Every caller (HTTP handlers, CLI commands) goes through this layer, so
//! they share one set of checks and one mapping from store errors to
//! response statuses.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{NewPost, Post, PostStore, PostSummary, PostUpdate};
use crate::error::BlogError;

/// Response class of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The request was missing something it needs
    ClientError,
    /// The request named a post that does not exist
    NotFound,
    /// Storage failed underneath
    ServerError,
}

impl Status {
    pub fn code(self) -> StatusCode {
        match self {
            Status::ClientError => StatusCode::BAD_REQUEST,
            Status::NotFound => StatusCode::NOT_FOUND,
            Status::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed request, ready to be turned into a response
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Status,
    pub message: String,
}

impl ApiError {
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            status: Status::ClientError,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            message: "Post not found".to_string(),
        }
    }
}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::Validation(message) => ApiError::client(message),
            BlogError::NotFound(slug) => {
                tracing::debug!("No post for slug {:?}", slug);
                ApiError::not_found()
            }
            BlogError::Storage(message) => {
                tracing::error!("Storage failure: {}", message);
                ApiError {
                    status: Status::ServerError,
                    message,
                }
            }
        }
    }
}

/// Result type for content service calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Query for the list operation; a slug narrows it to one full post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub slug: Option<String>,
}

/// Body of a create request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_emoji: Option<String>,
}

/// Body of an update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_emoji: Option<String>,
}

/// Body of a delete request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRequest {
    pub slug: Option<String>,
}

/// Either every summary or a single post
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing {
    All(Vec<PostSummary>),
    One(Box<Post>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugResponse {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Request handling over a [`PostStore`]
#[derive(Debug, Clone)]
pub struct ContentService {
    store: PostStore,
}

impl ContentService {
    pub fn new(store: PostStore) -> Self {
        Self { store }
    }

    /// All post summaries, newest first
    pub fn list(&self) -> ApiResult<Vec<PostSummary>> {
        Ok(self.store.list_posts()?)
    }

    /// One full post
    pub fn get(&self, slug: &str) -> ApiResult<Post> {
        self.store.get_post(slug)?.ok_or_else(ApiError::not_found)
    }

    /// List, or fetch one post when the query carries a slug
    pub fn query(&self, query: ListQuery) -> ApiResult<Listing> {
        match present(query.slug) {
            Some(slug) => Ok(Listing::One(Box::new(self.get(&slug)?))),
            None => Ok(Listing::All(self.list()?)),
        }
    }

    pub fn create(&self, req: CreateRequest) -> ApiResult<SlugResponse> {
        let (Some(title), Some(content)) = (present(req.title), present(req.content)) else {
            return Err(ApiError::client("Title and content are required."));
        };

        let slug = self.store.create_post(NewPost {
            title,
            content,
            tags: req.tags,
            cover_emoji: req.cover_emoji,
        })?;
        Ok(SlugResponse { slug })
    }

    pub fn update(&self, req: UpdateRequest) -> ApiResult<SlugResponse> {
        let slug = present(req.slug).ok_or_else(|| ApiError::client("Slug is required"))?;
        let content = present(req.content).ok_or_else(|| ApiError::client("Content is required."))?;

        let slug = self.store.update_post(
            &slug,
            PostUpdate {
                title: req.title,
                content,
                tags: req.tags,
                cover_emoji: req.cover_emoji,
            },
        )?;
        Ok(SlugResponse { slug })
    }

    pub fn delete(&self, req: DeleteRequest) -> ApiResult<DeleteResponse> {
        let slug = present(req.slug).ok_or_else(|| ApiError::client("Slug is required"))?;
        self.store.delete_post(&slug)?;
        Ok(DeleteResponse { success: true })
    }
}

/// Treat blank strings the same as absent ones
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service() -> (tempfile::TempDir, ContentService) {
        let dir = tempdir().unwrap();
        let store = PostStore::open(dir.path().join("blogs")).unwrap();
        (dir, ContentService::new(store))
    }

    fn create_hello(svc: &ContentService) -> String {
        svc.create(CreateRequest {
            title: Some("Hello World".to_string()),
            content: Some("# Hi\nBody text.".to_string()),
            tags: Some(vec!["intro".to_string()]),
            cover_emoji: Some("🚀".to_string()),
        })
        .unwrap()
        .slug
    }

    #[test]
    fn test_create_and_query() {
        let (_dir, svc) = service();
        let slug = create_hello(&svc);

        match svc.query(ListQuery::default()).unwrap() {
            Listing::All(posts) => {
                assert_eq!(posts.len(), 1);
                assert_eq!(posts[0].slug, slug);
            }
            other => panic!("expected listing, got {:?}", other),
        }

        match svc.query(ListQuery { slug: Some(slug.clone()) }).unwrap() {
            Listing::One(post) => assert_eq!(post.excerpt, "Hi Body text."),
            other => panic!("expected one post, got {:?}", other),
        }
    }

    #[test]
    fn test_query_unknown_slug() {
        let (_dir, svc) = service();
        let err = svc
            .query(ListQuery {
                slug: Some("missing".to_string()),
            })
            .unwrap_err();
        assert_eq!(err.status, Status::NotFound);
        assert_eq!(err.status.code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let (_dir, svc) = service();

        let err = svc
            .create(CreateRequest {
                content: Some("body".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.status, Status::ClientError);

        let err = svc
            .create(CreateRequest {
                title: Some("Title".to_string()),
                content: Some("  ".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.status, Status::ClientError);
        assert!(svc.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_requires_slug_and_content() {
        let (_dir, svc) = service();
        let slug = create_hello(&svc);

        let err = svc
            .update(UpdateRequest {
                content: Some("body".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.status, Status::ClientError);
        assert_eq!(err.message, "Slug is required");

        let err = svc
            .update(UpdateRequest {
                slug: Some(slug),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.status, Status::ClientError);
    }

    #[test]
    fn test_update_unknown_slug_is_not_found() {
        let (_dir, svc) = service();
        let err = svc
            .update(UpdateRequest {
                slug: Some("ghost".to_string()),
                content: Some("body".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.status, Status::NotFound);
    }

    #[test]
    fn test_update_keeps_slug() {
        let (_dir, svc) = service();
        let slug = create_hello(&svc);

        let resp = svc
            .update(UpdateRequest {
                slug: Some(slug.clone()),
                content: Some("New body".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(resp.slug, slug);

        let post = svc.get(&slug).unwrap();
        assert_eq!(post.excerpt, "New body");
        assert_eq!(post.title, "Untitled");
    }

    #[test]
    fn test_delete() {
        let (_dir, svc) = service();
        let slug = create_hello(&svc);

        let err = svc.delete(DeleteRequest::default()).unwrap_err();
        assert_eq!(err.status, Status::ClientError);

        let resp = svc
            .delete(DeleteRequest {
                slug: Some(slug.clone()),
            })
            .unwrap();
        assert!(resp.success);

        let err = svc.delete(DeleteRequest { slug: Some(slug) }).unwrap_err();
        assert_eq!(err.status, Status::NotFound);
    }

    #[test]
    fn test_storage_error_maps_to_server_error() {
        let err: ApiError = BlogError::storage("disk full").into();
        assert_eq!(err.status, Status::ServerError);
        assert_eq!(err.status.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "disk full");
    }

    #[test]
    fn test_validation_error_maps_to_client_error() {
        let err: ApiError = BlogError::validation("Content is required.").into();
        assert_eq!(err.status, Status::ClientError);
        assert_eq!(err.to_string(), "Content is required.");
    }
}

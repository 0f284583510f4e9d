//! HTTP server: JSON API for posts plus a minimal HTML reader

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{MarkdownRenderer, Post, PostSummary};
use crate::service::{
    ApiError, ApiResult, ContentService, CreateRequest, DeleteRequest, ListQuery, Status,
    UpdateRequest,
};
use crate::Blog;

/// Shared handler state
pub struct AppState {
    pub service: ContentService,
    pub site_title: String,
    pub renderer: MarkdownRenderer,
}

impl AppState {
    pub fn new(service: ContentService, site_title: impl Into<String>) -> Self {
        Self {
            service,
            site_title: site_title.into(),
            renderer: MarkdownRenderer::new().escape_html(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status.code(), body).into_response()
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/blogs",
            get(list_posts)
                .post(create_post)
                .put(update_post)
                .delete(delete_post),
        )
        .route("/", get(index_page))
        .route("/blog/:slug", get(post_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl+C
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let service = blog.service()?;
    let state = Arc::new(AppState::new(service, blog.config.title.clone()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Posts directory: {:?}", blog.posts_dir);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

/// Run a blocking service call off the async runtime
async fn blocking<T, F>(state: Arc<AppState>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ContentService) -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| {
            tracing::error!("Request task failed: {}", e);
            ApiError {
                status: Status::ServerError,
                message: "Internal server error".to_string(),
            }
        })?
}

/// Unwrap a JSON request body; a rejected one becomes a client error
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(req)| req).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::client(rejection.body_text())
    })
}

// GET /api/blogs[?slug=]
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    match blocking(state, move |svc| svc.query(query)).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => e.into_response(),
    }
}

// POST /api/blogs
async fn create_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };
    match blocking(state, move |svc| svc.create(req)).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => e.into_response(),
    }
}

// PUT /api/blogs
async fn update_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };
    match blocking(state, move |svc| svc.update(req)).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => e.into_response(),
    }
}

// DELETE /api/blogs
async fn delete_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };
    match blocking(state, move |svc| svc.delete(req)).await {
        Ok(deleted) => Json(deleted).into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /
async fn index_page(State(state): State<Arc<AppState>>) -> Response {
    let title = state.site_title.clone();
    match blocking(state, |svc| svc.list()).await {
        Ok(posts) => Html(render_index(&title, &posts)).into_response(),
        Err(e) => error_page(&title, e),
    }
}

// GET /blog/:slug
async fn post_page(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let title = state.site_title.clone();
    let renderer = state.renderer.clone();
    match blocking(state, move |svc| svc.get(&slug)).await {
        Ok(post) => Html(render_post(&title, &post, &renderer)).into_response(),
        Err(e) => error_page(&title, e),
    }
}

fn render_index(site_title: &str, posts: &[PostSummary]) -> String {
    let mut items = String::new();
    for post in posts {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        items.push_str(&format!(
            r#"<li><a href="/blog/{slug}">{emoji} {title}</a> <time>{date}</time><p>{excerpt}</p></li>"#,
            slug = escape_html(&post.slug),
            emoji = escape_html(&post.cover_emoji),
            title = escape_html(&post.title),
            date = date,
            excerpt = escape_html(&post.excerpt),
        ));
        items.push('\n');
    }
    page(site_title, site_title, &format!("<ul class=\"posts\">\n{}</ul>", items))
}

fn render_post(site_title: &str, post: &Post, renderer: &MarkdownRenderer) -> String {
    let tags: Vec<String> = post
        .tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
        .collect();
    let body = format!(
        "<article>\n<h1>{} {}</h1>\n<p class=\"meta\">{} {}</p>\n{}</article>\n<p><a href=\"/\">&larr; Back</a></p>",
        escape_html(&post.cover_emoji),
        escape_html(&post.title),
        post.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        tags.join(" "),
        renderer.render(&post.content),
    );
    page(site_title, &post.title, &body)
}

fn error_page(site_title: &str, err: ApiError) -> Response {
    let heading = match err.status {
        Status::NotFound => "Post not found",
        _ => "Something went wrong",
    };
    let html = page(
        site_title,
        heading,
        &format!("<h1>{}</h1>\n<p><a href=\"/\">&larr; Back</a></p>", heading),
    );
    (err.status.code(), Html(html)).into_response()
}

fn page(site_title: &str, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<header><a href=\"/\">{}</a></header>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(site_title),
        body
    )
}

/// Simple HTML escaping
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

//! Blog handlers.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;

use blog_core::domain::parse_hashtags;
use blog_core::ports::{ResourceType, StoredImage};
use blog_core::{BlogDraft, BlogId, BlogPost, DomainError};
use blog_shared::{BlogResponse, ErrorResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Fields of the create-post multipart body.
#[derive(Debug, Default)]
struct BlogForm {
    heading: Option<String>,
    content: Option<String>,
    hashtags: Option<String>,
    image: Option<Vec<u8>>,
}

impl BlogForm {
    async fn read(mut payload: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = payload.try_next().await.map_err(invalid_multipart)? {
            let name = field.name().map(str::to_owned);
            let is_file = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .is_some_and(|filename| !filename.is_empty());
            let bytes = read_field(field).await?;

            match name.as_deref() {
                // A file input left empty, or a plain text part, is not an image.
                Some("image") if is_file && !bytes.is_empty() => form.image = Some(bytes),
                Some("image") => {}
                Some("heading") => form.heading = Some(into_text(bytes)?),
                Some("content") => form.content = Some(into_text(bytes)?),
                Some("hashtags") => form.hashtags = Some(into_text(bytes)?),
                _ => {} // Ignore unknown fields.
            }
        }

        Ok(form)
    }
}

async fn read_field(mut field: Field) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(invalid_multipart)? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn into_text(bytes: Vec<u8>) -> AppResult<String> {
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest("Invalid multipart body".into()))
}

fn invalid_multipart(err: MultipartError) -> AppError {
    tracing::debug!("Rejecting multipart body: {}", err);
    AppError::BadRequest("Invalid multipart body".to_string())
}

/// POST /api/blogs
///
/// Uploads the image, then persists the post. If persisting fails the
/// uploaded image is deleted again. Missing text fields are caught before the
/// upload and reported like any other creation failure.
pub async fn create_blog(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let form = BlogForm::read(payload).await?;

    let image = form
        .image
        .ok_or_else(|| AppError::BadRequest(ErrorResponse::image_required().error))?;

    let draft = BlogDraft::new(
        form.heading.unwrap_or_default(),
        form.content.unwrap_or_default(),
        parse_hashtags(form.hashtags.as_deref()),
    )
    .map_err(|e| AppError::internal("Error creating blog", e))?;

    let stored = state
        .images
        .upload(image, ResourceType::Auto)
        .await
        .map_err(|e| AppError::internal("Error uploading image", e))?;

    let saved = match save_post(&state, draft, &stored).await {
        Ok(saved) => saved,
        Err(err) => {
            discard_upload(&state, &stored).await;
            return Err(err);
        }
    };

    tracing::info!(blog_id = %saved.id, "Blog created");

    Ok(HttpResponse::Created().json(BlogResponse::from(saved)))
}

async fn save_post(state: &AppState, draft: BlogDraft, stored: &StoredImage) -> AppResult<BlogPost> {
    let post = draft
        .with_image(stored.secure_url.as_str())
        .map_err(|e| AppError::internal("Error creating blog", e))?;

    state
        .blogs
        .insert(post)
        .await
        .map_err(|e| AppError::internal("Error creating blog", e))
}

/// Remove an image whose post could not be saved.
async fn discard_upload(state: &AppState, stored: &StoredImage) {
    match state.images.delete(stored).await {
        Ok(()) => tracing::warn!(public_id = %stored.public_id, "Discarded orphaned upload"),
        Err(e) => tracing::error!(
            public_id = %stored.public_id,
            "Failed to discard orphaned upload: {}",
            e
        ),
    }
}

/// GET /api/blogs
pub async fn list_blogs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state
        .blogs
        .find_all()
        .await
        .map_err(|e| AppError::internal("Error fetching blogs", e))?;

    let body: Vec<BlogResponse> = blogs.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/blogs/{id}
///
/// A malformed id is reported like any other lookup failure.
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id: BlogId = path
        .parse()
        .map_err(|e| AppError::internal("Error fetching blog", e))?;

    let blog = state
        .blogs
        .find_by_id(id)
        .await
        .map_err(|e| AppError::internal("Error fetching blog", e))?
        .ok_or(DomainError::NotFound(id))?;

    Ok(HttpResponse::Ok().json(BlogResponse::from(blog)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use blog_infra::{InMemoryBlogRepository, InMemoryImageStore, UnavailableBlogRepository};

    use super::*;
    use crate::handlers::configure_routes;
    use crate::middleware::cors::cors;

    const BOUNDARY: &str = "blog-test-boundary";
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    struct Fixture {
        repo: Arc<InMemoryBlogRepository>,
        images: Arc<InMemoryImageStore>,
        state: AppState,
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryImageStore::new())
    }

    fn fixture_with(images: InMemoryImageStore) -> Fixture {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let images = Arc::new(images);
        let state = AppState::from_parts(repo.clone(), images.clone());
        Fixture {
            repo,
            images,
            state,
        }
    }

    fn multipart(fields: &[(&str, &str)], image: Option<&[u8]>) -> test::TestRequest {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    async fn send(state: &AppState, req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    async fn create(state: &AppState, heading: &str, hashtags: &str) -> Value {
        let (status, body) = send(
            state,
            multipart(
                &[("heading", heading), ("content", "body"), ("hashtags", hashtags)],
                Some(PNG),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[actix_web::test]
    async fn test_create_returns_persisted_record() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            multipart(
                &[("heading", "Hello"), ("content", "World"), ("hashtags", "a,b,c")],
                Some(PNG),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["heading"], "Hello");
        assert_eq!(body["content"], "World");
        assert_eq!(body["hashtags"], json!(["a", "b", "c"]));
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert!(body["image"].as_str().unwrap().starts_with("memory://images/"));

        assert_eq!(fx.repo.len().await, 1);
        assert_eq!(fx.images.len().await, 1);
    }

    #[actix_web::test]
    async fn test_create_without_image_is_rejected() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            multipart(&[("heading", "Hello"), ("content", "World")], None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Image is required" }));
        assert!(fx.repo.is_empty().await);
        assert!(fx.images.is_empty().await);
    }

    /// Send one `image` part with the given disposition suffix and bytes.
    fn multipart_with_image_part(disposition: &str, bytes: &[u8]) -> test::TestRequest {
        let mut body = Vec::new();
        for (name, value) in [("heading", "Hello"), ("content", "World")] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"{disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_create_with_empty_file_input_is_rejected() {
        let fx = fixture();

        let (status, body) =
            send(&fx.state, multipart_with_image_part("; filename=\"\"", b"")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Image is required" }));
        assert!(fx.repo.is_empty().await);
        assert!(fx.images.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_with_empty_named_file_is_rejected() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            multipart_with_image_part("; filename=\"photo.png\"", b""),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Image is required" }));
        assert!(fx.repo.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_with_text_image_field_is_rejected() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            multipart(
                &[("heading", "Hello"), ("content", "World"), ("image", "not-a-file")],
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Image is required" }));
        assert!(fx.repo.is_empty().await);
        assert!(fx.images.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_without_heading_skips_upload() {
        let fx = fixture();

        let (status, body) = send(&fx.state, multipart(&[("content", "World")], Some(PNG))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error creating blog" }));
        assert!(fx.repo.is_empty().await);
        assert!(fx.images.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_without_content_skips_upload() {
        let fx = fixture();

        let (status, body) = send(&fx.state, multipart(&[("heading", "Hello")], Some(PNG))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error creating blog" }));
        assert!(fx.repo.is_empty().await);
        assert!(fx.images.is_empty().await);
    }

    #[actix_web::test]
    async fn test_create_without_hashtags_yields_empty_list() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            multipart(&[("heading", "Hello"), ("content", "World")], Some(PNG)),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["hashtags"], json!([]));
    }

    #[actix_web::test]
    async fn test_create_rejects_non_multipart_body() {
        let fx = fixture();

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(json!({ "heading": "Hello" }));
        let (status, body) = send(&fx.state, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid multipart body");
    }

    #[actix_web::test]
    async fn test_storage_failure_persists_nothing() {
        let fx = fixture_with(InMemoryImageStore::failing());

        let (status, body) = send(
            &fx.state,
            multipart(&[("heading", "Hello"), ("content", "World")], Some(PNG)),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error uploading image" }));
        assert!(fx.repo.is_empty().await);
    }

    #[actix_web::test]
    async fn test_persistence_failure_discards_upload() {
        let images = Arc::new(InMemoryImageStore::new());
        let state = AppState::from_parts(
            Arc::new(UnavailableBlogRepository::new("connection refused")),
            images.clone(),
        );

        let (status, body) = send(
            &state,
            multipart(&[("heading", "Hello"), ("content", "World")], Some(PNG)),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error creating blog" }));
        assert!(images.is_empty().await);
    }

    #[actix_web::test]
    async fn test_fetch_returns_created_post() {
        let fx = fixture();
        let created = create(&fx.state, "Hello", "rust,web").await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &fx.state,
            test::TestRequest::get().uri(&format!("/api/blogs/{id}")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for field in ["id", "heading", "content", "image", "hashtags"] {
            assert_eq!(body[field], created[field], "field {field} differs");
        }
    }

    #[actix_web::test]
    async fn test_fetch_unknown_id_is_not_found() {
        let fx = fixture();

        let uri = format!("/api/blogs/{}", BlogId::generate());
        let (status, body) = send(&fx.state, test::TestRequest::get().uri(&uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Blog not found" }));
    }

    #[actix_web::test]
    async fn test_fetch_malformed_id_is_server_error() {
        let fx = fixture();

        let (status, body) = send(
            &fx.state,
            test::TestRequest::get().uri("/api/blogs/not-a-valid-id"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error fetching blog" }));
    }

    #[actix_web::test]
    async fn test_list_returns_each_post_once() {
        let fx = fixture();
        let first = create(&fx.state, "first", "a").await;
        let second = create(&fx.state, "second", "").await;

        let (status, body) = send(&fx.state, test::TestRequest::get().uri("/api/blogs")).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].clone())
            .collect();
        assert_eq!(ids, vec![first["id"].clone(), second["id"].clone()]);
    }

    #[actix_web::test]
    async fn test_list_store_failure_is_server_error() {
        let state = AppState::from_parts(
            Arc::new(UnavailableBlogRepository::new("connection refused")),
            Arc::new(InMemoryImageStore::new()),
        );

        let (status, body) = send(&state, test::TestRequest::get().uri("/api/blogs")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error fetching blogs" }));
    }

    #[actix_web::test]
    async fn test_cors_allows_any_origin() {
        let fx = fixture();
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::new(fx.state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/blogs")
            .insert_header((header::ORIGIN, "https://example.com"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );

        let preflight = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/blogs")
            .insert_header((header::ORIGIN, "https://example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE"))
            .to_request();
        let res = test::call_service(&app, preflight).await;
        assert!(res.status().is_success());
        let methods = res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("DELETE"));
    }

    #[actix_web::test]
    async fn test_cors_allows_content_type_and_authorization() {
        let fx = fixture();
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::new(fx.state.clone()))
                .configure(configure_routes),
        )
        .await;

        let preflight = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/blogs")
            .insert_header((header::ORIGIN, "https://example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "content-type, authorization",
            ))
            .to_request();
        let res = test::call_service(&app, preflight).await;
        assert!(res.status().is_success());

        let allowed = res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("content-type"));
        assert!(allowed.contains("authorization"));
    }

    #[actix_web::test]
    async fn test_health_reports_backends() {
        let fx = fixture();

        let (status, body) = send(&fx.state, test::TestRequest::get().uri("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "custom");
    }
}

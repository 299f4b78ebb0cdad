//! Post CRUD handlers plus the public read path.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;
use uuid::Uuid;

use quill_core::content::{PostPatch, generate_unique_slug, validate_new_post};
use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        markdown_content: post.markdown_content.clone(),
        published: post.published,
        tags: post.tags.clone(),
        tag_list: post.tag_list(),
        author_id: post.author_id.to_string(),
        created_on: post
            .created_on
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        // Doubles as the optimistic-concurrency token.
        updated_on: post.concurrency_token(),
    }
}

/// GET /api/v1/posts
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts.iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {id} not found")))?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// POST /api/v1/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let slug = match req.slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_owned(),
        None => generate_unique_slug(state.posts.as_ref(), &req.title, None).await?,
    };

    let errors = validate_new_post(&req.title, &slug, req.tags.as_deref());
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Fast path; the unique indexes still guard the insert itself.
    if state
        .posts
        .find_by_title_or_slug(&req.title, &slug)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Post with title '{}' or slug '{slug}' already exists",
            req.title
        )));
    }

    let mut post = Post::new(identity.admin_id, req.title, slug);
    post.excerpt = req.excerpt.filter(|e| !e.is_empty());
    post.markdown_content = req.markdown_content.filter(|c| !c.is_empty());
    post.published = req.published.unwrap_or(false);
    post.tags = req.tags.filter(|t| !t.is_empty());

    let created = match state.posts.create(post).await {
        Ok(post) => post,
        Err(RepoError::Constraint(msg)) => return Err(AppError::Conflict(msg)),
        Err(err) => return Err(err.into()),
    };

    tracing::info!(title = %created.title, slug = %created.slug, author = %identity.username, "Post created");
    Ok(HttpResponse::Created().json(post_response(&created)))
}

/// PATCH /api/v1/posts/{id}
pub async fn patch(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        slug: req.slug,
        excerpt: req.excerpt,
        markdown_content: req.markdown_content,
        published: req.published,
        tags: req.tags,
    };

    let updated = state
        .updates
        .update(
            path.into_inner(),
            identity.admin_id,
            patch,
            req.last_known_update.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&updated)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {id} not found")))?;

    if post.author_id != identity.admin_id {
        return Err(AppError::Forbidden(
            "You are not the author of this post".to_string(),
        ));
    }

    state.posts.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/public/posts - recent published posts.
pub async fn list_public(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published(Some(5)).await?;
    let body: Vec<PostResponse> = posts.iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/public/posts/{slug} - a published post by slug.
pub async fn get_public(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = state
        .posts
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with slug '{slug}'")))?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

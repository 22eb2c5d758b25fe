//! Post handlers - listing, search and CRUD.

use actix_web::{HttpResponse, web};

use postboard_core::domain::{NewPost, PostId, PostPatch};
use postboard_core::query::{ListParams, SearchCriteria};
use postboard_shared::dto::{
    CreatePostRequest, ListPostsQuery, MessageResponse, SearchPostsQuery, UpdatePostRequest,
};

use crate::middleware::error::{AppResult, decode_json_object};
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /api/posts?sort=&direction=&page=&limit=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let params = ListParams::parse(
        query.sort.as_deref(),
        query.direction.as_deref(),
        query.page.as_deref(),
        query.limit.as_deref(),
    )?;

    let posts = state.posts.list(&params).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/search?title=&content=&author=&date=
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchPostsQuery>,
) -> AppResult<HttpResponse> {
    let criteria = SearchCriteria::new(
        query.title.as_deref(),
        query.content.as_deref(),
        query.author.as_deref(),
        query.date.as_deref(),
    );

    let posts = state.posts.search(&criteria).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = decode_json_object(&body)?;
    let draft = NewPost::parse(req.title, req.content, req.author, req.date)?;

    let post = state.posts.create(draft).await?;
    tracing::debug!(request_id = %request_id.as_str(), post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
///
/// The post must exist before the body is looked at.
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<PostId>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.get(id).await?;

    let req: UpdatePostRequest = decode_json_object(&body)?;
    let patch = PostPatch::parse(req.title, req.content, req.author, req.date)?;

    let post = state.posts.update(id, patch).await?;
    tracing::debug!(request_id = %request_id.as_str(), post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::debug!(request_id = %request_id.as_str(), post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post with id {id} has been deleted successfully."
    ))))
}

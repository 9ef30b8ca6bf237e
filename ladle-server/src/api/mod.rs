use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{auth::token_auth_middleware, state::AppState};
use shared::error::AppError;

mod health;
mod ingredient;
mod recipe;
mod tag;
mod user;

pub type ApiResult<T> = Result<Json<T>, AppError>;

pub fn create_router(state: AppState) -> Router {
    // Everything past the token middleware sees an AuthUser extension
    let authed = Router::new()
        .route(
            "/user/me",
            get(user::me).patch(user::update_me).delete(user::delete_me),
        )
        .route(
            "/recipe/recipes",
            get(recipe::list_recipes).post(recipe::create_recipe),
        )
        .route(
            "/recipe/recipes/{id}",
            get(recipe::get_recipe)
                .put(recipe::replace_recipe)
                .patch(recipe::patch_recipe)
                .delete(recipe::delete_recipe),
        )
        .route(
            "/recipe/recipes/{id}/upload-image",
            post(recipe::upload_image)
                .layer(DefaultBodyLimit::max(crate::media::MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/recipe/tags", get(tag::list_tags).post(tag::create_tag))
        .route(
            "/recipe/tags/{id}",
            put(tag::update_tag)
                .patch(tag::update_tag)
                .delete(tag::delete_tag),
        )
        .route(
            "/recipe/ingredients",
            get(ingredient::list_ingredients).post(ingredient::create_ingredient),
        )
        .route(
            "/recipe/ingredients/{id}",
            put(ingredient::update_ingredient)
                .patch(ingredient::update_ingredient)
                .delete(ingredient::delete_ingredient),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            token_auth_middleware,
        ));

    let public = Router::new()
        .route("/user/create", post(user::register))
        .route("/user/token", post(user::create_token));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", public.merge(authed))
        .nest_service("/media", ServeDir::new(state.media.root()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! API service routes

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    catalog,
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{
        SigninRequest, UpdateQuantityRequest, UserResponse,
        cart::NewCartItem,
        user::NewUser,
    },
    password,
    state::AppState,
    validation,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cart_routes = Router::new()
        .route("/api/cart", get(get_cart).post(add_cart_item))
        .route(
            "/api/cart/:product_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .route("/api/products", get(list_products))
        .merge(cart_routes)
        .nest_service("/images", ServeDir::new("public/images"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name(&payload.name).map_err(ApiError::BadRequest)?;
    validation::validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validation::validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    state.user_repository.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully!"})),
    ))
}

/// Sign a user in and issue a bearer token
///
/// Unknown email and wrong password are indistinguishable to the client.
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Signin attempt for {}", payload.email);

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid credentials.".to_string()))?;

    if !password::verify(&payload.password, &user.password_hash) {
        return Err(ApiError::BadRequest("Invalid credentials.".to_string()));
    }

    let token = state.jwt_service.issue_token(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({
        "message": "Logged in successfully!",
        "token": token,
        "user": UserResponse::from(&user),
    })))
}

/// List the product catalog
pub async fn list_products() -> impl IntoResponse {
    Json(catalog::products())
}

/// Fetch the current user's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state.cart_repository.get(user.id).await?;
    Ok(Json(cart))
}

/// Add an item to the cart, merging quantities for an existing product
pub async fn add_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewCartItem>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state.cart_repository.upsert_item(user.id, payload).await?;
    Ok(Json(cart))
}

/// Overwrite an item's quantity; zero or less removes the item
pub async fn update_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .cart_repository
        .set_quantity(user.id, &product_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// Remove an item from the cart
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .cart_repository
        .remove_item(user.id, &product_id)
        .await?;

    Ok(Json(json!({
        "message": "Item removed from cart.",
        "cart": cart,
    })))
}

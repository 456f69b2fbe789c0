//! API routes

use axum::{
    extract::OriginalUri,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use inv_models::{
    Article, BillingRecord, Category, City, Consecutive, Country, Department, MeasurementUnit,
    MovementType, Payment, Person, Role, Status, User,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::extractors::AppState;
use crate::handlers;
use crate::resource::Resource;

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_router())
        // legacy mount kept for existing clients
        .nest("/estados", resource_router::<Status>())
        .fallback(no_route)
}

/// CRUD routes for one resource, relative to its mount point
pub fn resource_router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list::<R>)
                .post(handlers::create::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>)
                .fallback(wrong_method),
        )
        .route("/:key", get(handlers::get::<R>).fallback(wrong_method))
}

macro_rules! mount {
    ($($resource:ty),+ $(,)?) => {
        fn api_router() -> Router<AppState> {
            Router::new()
                .route("/", get(api_index))
                $(.nest(
                    &format!("/{}", <$resource as Resource>::PATH),
                    resource_router::<$resource>(),
                ))+
        }

        fn index() -> Vec<ResourceLink> {
            vec![$(ResourceLink::of::<$resource>()),+]
        }
    };
}

mount!(
    Country,
    Department,
    City,
    MeasurementUnit,
    MovementType,
    Category,
    Status,
    Article,
    Person,
    Role,
    User,
    Payment,
    BillingRecord,
    Consecutive,
);

#[derive(Debug, Serialize)]
struct ResourceLink {
    name: &'static str,
    href: String,
}

impl ResourceLink {
    fn of<R: Resource>() -> Self {
        Self {
            name: R::PLURAL,
            href: format!("/api/{}", R::PATH),
        }
    }
}

#[derive(Serialize)]
struct ApiIndex {
    resources: Vec<ResourceLink>,
}

async fn api_index() -> Json<ApiIndex> {
    Json(ApiIndex { resources: index() })
}

async fn no_route(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

async fn wrong_method(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} is not allowed on {}", method, uri.path()))
}

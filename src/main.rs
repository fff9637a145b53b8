use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use interview_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes,
    services::user_service::UserService,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Seed rows cannot carry an argon2 hash; stamp the bootstrap admin
    // password before serving.
    UserService::new(pool.clone()).ensure_bootstrap_admin().await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let admin_api = Router::new()
        .route(
            "/api/admin/interviews",
            get(routes::admin::list_interviews).post(routes::admin::create_interview),
        )
        .route(
            "/api/admin/interviews/:id",
            get(routes::admin::get_interview)
                .patch(routes::admin::update_interview)
                .delete(routes::admin::delete_interview),
        )
        .route(
            "/api/admin/interviews/:id/questions",
            post(routes::admin::save_questions),
        )
        .route(
            "/api/admin/interviews/:id/analytics",
            get(routes::analytics::get_interview_analytics),
        )
        .route(
            "/api/admin/interviews/:id/export",
            get(routes::analytics::export_sessions),
        )
        .route(
            "/api/admin/interviews/:id/share",
            get(routes::share::get_share_overview),
        )
        .route(
            "/api/admin/interviews/:id/share-links",
            post(routes::share::create_share_link),
        )
        .route(
            "/api/admin/interviews/:id/invites",
            post(routes::share::send_invites),
        )
        .route(
            "/api/admin/share-links/:id",
            axum::routing::delete(routes::share::delete_share_link),
        )
        .route(
            "/api/admin/sessions/:id",
            get(routes::analytics::get_session_details),
        )
        .route(
            "/api/admin/users",
            get(routes::admin::list_users).post(routes::admin::create_user),
        )
        .route(
            "/api/admin/users/:id",
            axum::routing::patch(routes::admin::update_user)
                .delete(routes::admin::delete_user),
        )
        .layer(axum::middleware::from_fn(
            interview_backend::middleware::auth::require_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            interview_backend::middleware::rate_limit::new_rps_state(config.admin_rps),
            interview_backend::middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route(
            "/api/auth/login",
            post(routes::auth::login),
        )
        .route(
            "/api/public/access/:token",
            get(routes::public::validate_token),
        )
        .route(
            "/api/public/access/:token/questions",
            get(routes::public::get_questions_by_token),
        )
        .route(
            "/api/public/sessions/:id/start",
            post(routes::public::start_session),
        )
        .route(
            "/api/public/sessions/:id/complete",
            post(routes::public::complete_session),
        )
        .route(
            "/api/public/responses",
            post(routes::public::submit_response),
        )
        .route(
            "/api/public/tracking-events",
            post(routes::public::track_event),
        )
        .route("/api/public/uploads", post(routes::upload::upload_file))
        .layer(axum::middleware::from_fn_with_state(
            interview_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            interview_backend::middleware::rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(admin_api)
        .merge(public_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

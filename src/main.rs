mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, TokenService};
use crate::features::contacts::{routes as contacts_routes, ContactService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::hospitals::{routes as hospitals_routes, HospitalService};
use crate::features::locator::dataset;
use crate::features::locator::geolocation::GeolocationService;
use crate::features::locator::{
    routes as locator_routes, HospitalFeed, HospitalSource, LocatorService,
};
use crate::features::medical_services::{routes as services_routes, CatalogService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::mailer::{EmailSender, ResendClient};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Starting with tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth and accounts
    let token_service = Arc::new(TokenService::new(&config.auth));
    let user_service = Arc::new(UserService::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        Arc::clone(&token_service),
    ));
    tracing::info!("Auth services initialized");

    // Hospitals and the static baseline
    let hospital_service = Arc::new(HospitalService::new(pool.clone()));
    let baseline = dataset::load_baseline(config.locator.dataset_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load hospital dataset: {}", e))?;
    tracing::info!(
        "Loaded {} hospitals from {}",
        baseline.len(),
        config
            .locator
            .dataset_path
            .as_deref()
            .unwrap_or("bundled dataset")
    );

    if config.app.seed_on_startup {
        let summary = hospital_service
            .import(&baseline)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed hospitals: {}", e))?;
        tracing::info!(
            "Seeded {} hospitals ({} service links)",
            summary.hospitals,
            summary.services_linked
        );
    }

    let catalog_service = Arc::new(CatalogService::new(pool.clone()));

    // Locator feed polls the database and merges it over the baseline
    let source: Arc<dyn HospitalSource> = hospital_service.clone();
    let feed = Arc::new(HospitalFeed::new(
        source,
        baseline.clone(),
        config.locator.poll_interval,
    ));
    tokio::spawn(Arc::clone(&feed).run());
    tracing::info!("Hospital feed worker spawned");

    let locator_service = Arc::new(LocatorService::new(
        Arc::clone(&feed),
        GeolocationService::new(config.locator.location_timeout),
    ));

    // Contact form and outbound mail
    let resend = ResendClient::new(&config.mail)
        .map_err(|e| anyhow::anyhow!("Failed to initialize mail client: {}", e))?;
    tracing::info!("Outgoing e-mail enabled: {}", resend.is_enabled());
    let mailer: Arc<dyn EmailSender> = Arc::new(resend);
    let contact_service = Arc::new(ContactService::new(
        pool.clone(),
        mailer,
        config.mail.clone(),
    ));

    let dashboard_service = Arc::new(DashboardService::new(
        pool.clone(),
        Arc::clone(&contact_service),
    ));
    tracing::info!("Application services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a session token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(users_routes::routes(Arc::clone(&user_service)))
        .merge(hospitals_routes::admin_routes(
            Arc::clone(&hospital_service),
            Arc::new(baseline),
        ))
        .merge(services_routes::admin_routes(Arc::clone(&catalog_service)))
        .merge(contacts_routes::admin_routes(Arc::clone(&contact_service)))
        .merge(dashboard_routes::routes(dashboard_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&token_service),
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(hospitals_routes::public_routes(hospital_service))
        .merge(services_routes::public_routes(catalog_service))
        .merge(locator_routes::routes(locator_service))
        .merge(contacts_routes::public_routes(contact_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

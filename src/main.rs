mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::dispatch::{routes as dispatch_routes, DispatchResolver};
use crate::features::notifications::{
    routes as notifications_routes, NotificationDispatcher, NotificationService,
    OutboxNotificationDispatcher,
};
use crate::features::providers::{routes as providers_routes, PgProviderDirectory, ProviderService};
use crate::features::requests::{routes as requests_routes, RedispatchWorker, RequestService};
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

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // Dispatch core: Postgres directory behind the resolver
    let dispatch_config = Arc::new(config.dispatch.clone());
    let directory = Arc::new(PgProviderDirectory::new(pool.clone()));
    let resolver = Arc::new(DispatchResolver::new(directory, dispatch_config.policy()));
    tracing::info!(
        "Dispatch resolver initialized (radius={} km, fanout={}, candidates={}, include_offline={}, unlocated_as_zero={})",
        dispatch_config.default_radius_km,
        dispatch_config.default_max_fanout,
        dispatch_config.candidate_limit,
        dispatch_config.include_offline,
        dispatch_config.unlocated_as_zero
    );

    // Notifications
    let notifier: Arc<dyn NotificationDispatcher> = Arc::new(
        OutboxNotificationDispatcher::new(pool.clone(), &config.notification)
            .map_err(|e| anyhow::anyhow!("Failed to initialize notifications: {}", e))?,
    );
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    match &config.notification.webhook_url {
        Some(url) => tracing::info!("Notification webhook enabled: {}", url),
        None => tracing::info!("Notification webhook disabled (outbox only)"),
    }

    // Providers
    let provider_service = Arc::new(ProviderService::new(pool.clone()));
    tracing::info!("Provider service initialized");

    // Requests
    let request_service = Arc::new(RequestService::new(
        pool.clone(),
        Arc::clone(&resolver),
        Arc::clone(&notifier),
        Arc::clone(&dispatch_config),
    ));
    tracing::info!("Request service initialized");

    // Spawn background redispatch worker
    if config.redispatch.enabled {
        let worker = RedispatchWorker::new(Arc::clone(&request_service), config.redispatch.clone());
        tokio::spawn(async move {
            worker.run().await;
        });
        tracing::info!("Redispatch worker spawned");
    } else {
        tracing::info!("Redispatch worker disabled");
    }

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
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

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(dispatch_routes::routes(
            Arc::clone(&resolver),
            Arc::clone(&dispatch_config),
        ))
        .merge(providers_routes::routes(provider_service))
        .merge(requests_routes::routes(request_service))
        .merge(notifications_routes::routes(notification_service));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
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

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
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

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use blog_service::config::Config;
use blog_service::db::MIGRATOR;
use blog_service::middleware::MetricsMiddleware;
use crypto_core::jwt;
use db_pool::{create_pool, DbConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,blog_service=debug,actix_web=info".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    for origin in origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Blog Service
///
/// # Routes
///
/// - `/api/v1/posts/*` - posts and nested comments
/// - `/api/v1/groups/*` - read-only groups
/// - `/api/v1/follow/` - the caller's subscriptions
/// - `/api/v1/health*`, `/metrics`, `/api/v1/openapi.json` - operations
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let public_key = jwt::load_validation_key().context("JWT public key not configured")?;
    jwt::initialize_jwt_validation_only(&public_key).context("Failed to initialize JWT keys")?;

    let db_cfg = DbConfig::from_env("blog-service")
        .map_err(anyhow::Error::msg)
        .context("Failed to load database configuration")?;
    db_cfg.log_config();
    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    MIGRATOR
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let pagination = web::Data::new(config.pagination.clone());
    let origins: Vec<String> = config
        .cors
        .origins()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let bind_address = (config.app.host.clone(), config.app.port);

    tracing::info!(
        "Starting HTTP server at {}:{} with {} workers",
        bind_address.0,
        bind_address.1,
        config.app.workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(pagination.clone())
            .wrap(NormalizePath::trim())
            .wrap(MetricsMiddleware)
            .wrap(build_cors(&origins))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(blog_service::configure_routes)
    })
    .workers(config.app.workers)
    .shutdown_timeout(30)
    .bind(bind_address)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    tracing::info!("blog-service shutting down");
    Ok(())
}

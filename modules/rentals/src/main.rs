use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use blob_storage::{BlobStore, InMemoryBlobStore, S3BlobStore};
use mailer::{HttpMailer, InMemoryMailer, Mailer};

use rentals_rs::{
    config::Config,
    db,
    health::health,
    routes::{
        admin_bills, admin_catalog, admin_payments, admin_readings, admin_settings,
        admin_tenants, portal_bills, portal_dashboard, portal_meters, portal_rent,
    },
    services::currency::FixedRateConverter,
    AppState,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting rentals service...");

    // Load configuration from environment
    let config = Config::from_env()
        .expect("Failed to load configuration from environment");

    tracing::info!(
        "Configuration loaded: host={}, port={}, zone={}",
        config.host,
        config.port,
        config.time_zone
    );

    // Database connection
    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    sqlx::migrate!("./db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Outbound mail: HTTP gateway in production, in-memory otherwise
    let mail: Arc<dyn Mailer> = match &config.mail_gateway_url {
        Some(url) => {
            tracing::info!("Using HTTP mail gateway at {}", url);
            Arc::new(HttpMailer::new(url.clone()))
        }
        None => {
            tracing::info!("MAIL_GATEWAY_URL not set; using in-memory mailer");
            Arc::new(InMemoryMailer::new())
        }
    };

    // Bill attachments: S3-compatible bucket in production, in-memory otherwise
    let blobs: Arc<dyn BlobStore> = match &config.blob_bucket {
        Some(bucket) => {
            tracing::info!("Using blob bucket {}", bucket);
            Arc::new(S3BlobStore::from_env(bucket.clone()).await)
        }
        None => {
            tracing::info!("BLOB_BUCKET not set; using in-memory blob store");
            Arc::new(InMemoryBlobStore::new())
        }
    };

    let state = AppState {
        db: pool,
        mailer: mail,
        blobs,
        converter: Arc::new(FixedRateConverter::default()),
        time_zone: config.time_zone,
        admin_email: config.admin_email.clone(),
        from_email: config.from_email.clone(),
    };

    // Build the application router
    let app = Router::new()
        .route("/api/health", get(health))
        // Tenant portal
        .route("/api/portal/dashboard", get(portal_dashboard::get_dashboard))
        .route("/api/portal/rent", get(portal_rent::get_rent_status))
        .route("/api/portal/bills", get(portal_bills::get_bills))
        .route("/api/portal/bills/{bill_id}/download", get(portal_bills::download_bill))
        .route("/api/portal/meters", get(portal_meters::get_meters))
        .route("/api/portal/meters/readings", post(portal_meters::submit_reading))
        // Back office
        .route("/api/admin/tenants", post(admin_tenants::provision_tenant).get(admin_tenants::list_tenants))
        .route("/api/admin/tenants/{tenant_id}", get(admin_tenants::get_tenant).put(admin_tenants::update_tenant))
        .route("/api/admin/tenants/{tenant_id}/deactivate", post(admin_tenants::deactivate_tenant))
        .route("/api/admin/tenants/{tenant_id}/agreement", post(admin_tenants::upsert_agreement).get(admin_tenants::get_agreement))
        .route("/api/admin/payments", post(admin_payments::create_payment).get(admin_payments::list_payments))
        .route("/api/admin/payments/{payment_id}/status", put(admin_payments::update_payment_status))
        .route("/api/admin/bills", post(admin_bills::create_bill).get(admin_bills::list_bills))
        .route("/api/admin/bills/{bill_id}/status", put(admin_bills::update_bill_status))
        .route("/api/admin/bills/{bill_id}/attachment", put(admin_bills::upload_bill_attachment))
        .route("/api/admin/utility-types", post(admin_catalog::create_utility_type).get(admin_catalog::list_utility_types))
        .route("/api/admin/utility-types/{id}", put(admin_catalog::update_utility_type))
        .route("/api/admin/meter-types", post(admin_catalog::create_meter_type).get(admin_catalog::list_meter_types))
        .route("/api/admin/meter-types/{id}", put(admin_catalog::update_meter_type))
        .route("/api/admin/readings", get(admin_readings::list_readings))
        .route("/api/admin/readings/{reading_id}/process", post(admin_readings::process_reading))
        .route("/api/admin/settings", get(admin_settings::list_settings))
        .route("/api/admin/settings/{key}", put(admin_settings::upsert_setting))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        );

    // Bind to the configured address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Rentals service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    // Start the server
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

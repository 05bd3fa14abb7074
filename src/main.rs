use cravings_backend_rs::{
    app::{self, App},
    modules::auth::service::admin,
    types::{Config, Context, ToContext},
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    app::init_tracing();

    let config = Config::default();
    let admin_config = config.admin.clone();
    let ctx: Arc<Context> = Arc::new(config.to_context().await);

    match admin_config {
        Some(admin_config) => {
            if let Err(err) = admin::ensure(&ctx.db_conn.pool, admin_config).await {
                tracing::error!("Failed to create the administrator account: {:?}", err);
            }
        }
        None => tracing::warn!("ADMIN_EMAIL or ADMIN_PASSWORD not set, skipping administrator setup"),
    }

    if let Err(err) = App::new(ctx).serve().await {
        tracing::error!("Server stopped: {}", err);
    }
}

use crate::{
    modules,
    modules::auth::middleware::authenticate,
    types::{AppContext, AppEnvironment, Context},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use std::{io, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors, trace};
use tracing_subscriber::prelude::*;

/// Uploads are capped well above the per-file limit so a full gallery fits.
const BODY_LIMIT: usize = 1024 * 1024 * 50;

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Production only answers cross-origin requests from the public app URL.
fn allowed_origin(app: &AppContext) -> cors::AllowOrigin {
    match app.environment {
        AppEnvironment::Development => cors::AllowOrigin::any(),
        AppEnvironment::Production => match HeaderValue::from_str(&app.url) {
            Ok(origin) => cors::AllowOrigin::exact(origin),
            Err(err) => {
                tracing::warn!("URL {} is not a valid origin: {:?}", app.url, err);
                cors::AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    }
}

pub fn router(ctx: Arc<Context>) -> Router {
    modules::get_router()
        .layer(middleware::from_fn_with_state(ctx.clone(), authenticate))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(trace::TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_methods([
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_origin(allowed_origin(&ctx.app)),
        )
        .with_state(ctx)
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let router = router(ctx.clone());
        Self { ctx, router }
    }

    pub async fn serve(self) -> io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!(
            "App is running on {} ({:?}), public URL {}",
            address,
            self.ctx.app.environment,
            self.ctx.app.url
        );

        axum::serve(listener, self.router).await
    }
}

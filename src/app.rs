/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → 依存生成 (subscription cache, metrics emitter, gate) → Router 組み立て
 * - Middleware の適用
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{self, subscription_state::SubscriptionStateValidator};
use crate::services::metrics::{MetricsEmitter, PrometheusEmitter, install_recorder};
use crate::services::subscriptions::InMemorySubscriptionCache;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG を優先。未設定なら default
    // Ex:
    // RUST_LOG=info,rp_frontend=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr は起動方法によっては見えないので tracing にも流す
        tracing::error!(?info, "panic");

        // development では即落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting RP frontend in {:?} mode on {} (region {})",
        config.app_env,
        config.addr,
        config.region
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let metrics_handle = install_recorder().context("failed to install prometheus recorder")?;

    let cache = InMemorySubscriptionCache::with_subscriptions(config.subscriptions.iter().cloned());
    let emitter = PrometheusEmitter::new();

    tracing::info!(
        subscriptions = cache.count(),
        metrics_backend = emitter.backend_name(),
        "subscription state gate ready"
    );

    let validator =
        SubscriptionStateValidator::new(Arc::new(cache), Arc::new(emitter), config.region.clone());

    Ok(AppState::new(validator, metrics_handle))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(&state).with_state(state);
    middleware::http::apply(router, config)
}

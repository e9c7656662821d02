//! Lead Capture Library
//!
//! This crate provides the core functionality for the lead-capture web form:
//! a form view, a submit endpoint, and SQL-backed lead persistence with
//! duplicate-email protection.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod notice;
pub mod services;
pub mod session;
pub mod views;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub leads: services::leads::LeadService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let leads = services::leads::LeadService::new(db.clone());
        Self { db, config, leads }
    }
}

/// Build the full application router: form view, submit endpoint, health.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::leads::lead_routes())
        .merge(handlers::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Rubrik Prometheus Exporter
//!
//! A Prometheus metrics exporter for Rubrik backup appliances.
//!
//! # Overview
//!
//! This exporter logs in to the Rubrik internal REST API, polls the statistics
//! endpoints for storage, ingest and archival figures, and exposes them in
//! Prometheus format for scraping.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     HTTPS/JSON       ┌──────────────┐
//! │   Rubrik    │ ◄─────────────────►  │   Exporter   │
//! │  Appliance  │   Bearer session     │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Client │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`rubrik`] - Session handling, stats accessors and API type definitions
//! - [`collectors`] - Map API records onto Prometheus metrics
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server and collection loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use rubrik_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rubrik;
pub mod server;

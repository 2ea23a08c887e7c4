//! API Module
//!
//! HTTP handlers and routing for the verification service.
//!
//! # Endpoints
//! - `POST /verify` - Check a secret against a hash
//! - `DELETE /cache/*hash` - Drop the cached outcome for a hash
//! - `GET /stats` - Get verification statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

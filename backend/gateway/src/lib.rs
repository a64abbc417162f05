//! Hairscope HTTP UI server.
//!
//! Serves the upload/camera page, the analyze endpoint, and a health probe.

pub mod analyze;
pub mod control_ui;
pub mod health_api;
pub mod server;

pub use control_ui::UiPage;
pub use server::{build_router, start_server, GatewayState};

//! Chat platform endpoints.

pub mod lingr;

pub use lingr::lingr_routes;

//! Tower middleware shared by all routes.

pub mod request_id;

pub use request_id::{request_id_layer, RequestIdExt};

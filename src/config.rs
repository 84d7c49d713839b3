//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The product string sent as the `User-Agent` header of every request.
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new(format!("Corkboard/{}", env!("CARGO_PKG_VERSION")))));

// Middleware modules
pub mod logging;

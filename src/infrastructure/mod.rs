mod executor_rest;
mod lister_preflight;
mod paginator_rest;
mod transport_reqwest;

pub use executor_rest::*;
pub use lister_preflight::*;
pub use paginator_rest::*;
pub use transport_reqwest::*;

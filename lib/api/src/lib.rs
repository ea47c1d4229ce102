pub mod rest;

pub use rest::{configure_catalog, configure_reports, RestApi};

//! Service layer orchestrating the store protocols.
//!
//! - [`ShortenerService`] - slug allocation (dedup, claim, bounded
//!   collision retry) and resolution
//! - [`AdmissionCounter`] - exact sliding-window request quota per client

mod admission_counter;
mod shortener_service;

pub use admission_counter::AdmissionCounter;
pub use shortener_service::ShortenerService;

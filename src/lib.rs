//! Forest monitor — draw a region, fetch its NDVI history from Earth Engine,
//! chart vegetation index against forest loss.
//!
//! A failed or unusable fetch never errors out to the page: the run degrades
//! to a fixed demo timeline and raises a notice instead.

pub mod config;
pub mod earthengine;
pub mod error;
pub mod geo;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod timeline;

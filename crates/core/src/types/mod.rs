//! Core types for the catalog front-end.
//!
//! These mirror the JSON shapes of the remote catalog API.

pub mod price;
pub mod product;

pub use price::{PriceError, parse_price};
pub use product::{ApiMessage, Attribute, AttributeFilter, Product, ProductId};

//! Client for the Observatory of Economic Complexity (OEC) API.
//!
//! API documentation: <https://atlas.media.mit.edu/api/>
//!
//! Data attributes and field names:
//! <https://github.com/alexandersimoes/oec/wiki/Attributes>
//!
//! Results come back as loosely-structured records; [`export`] turns any batch
//! of them into a CSV with a sorted, complete header.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod oec;
pub mod schema;
pub mod visual;

pub use config::Config;
pub use engine::{build_call, Client};
pub use error::{OecError, Result};
pub use export::{data_to_csv, data_to_csv_atomic, resolve_header, save_csv, write_csv, ExportOptions};
pub use schema::{trade_params, Header, Record, TradeParams};
pub use visual::{embed_visual, url_visual, Language, VisualOptions};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod nav;
pub mod page;
pub mod pages;
pub mod routes;
pub mod session;
pub mod ui;

pub use api::{HttpLmsApi, LmsApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use page::PageContext;
pub use routes::Route;
pub use session::{SessionContext, SqliteSessionStore};

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        clippy::use_debug
    )
)]

pub mod app;
pub mod config;
pub mod cors;
pub mod http_logging;
pub mod logging;
pub mod pagination;
pub mod post;
pub mod server;
pub mod storage;
pub mod tag;
pub mod validation;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use pagination::{Page, PageRequest, Sort};
pub use post::{Post, PostError, PostPayload, PostService};
pub use server::{router, AppState};
pub use tag::{Tag, TagError, TagInput};

pub use quibble_core::app::App;

pub use quibble_types::error::{Error, QbResult};
pub use quibble_types::media_adapter::MediaAdapter;
pub use quibble_types::meta_adapter::MetaAdapter;
pub use quibble_types::types::{AuthCtx, ProfileInfo, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4

pub use crate::error::{Error, QbResult};
pub use crate::types::{AuthCtx, ProfileInfo, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4

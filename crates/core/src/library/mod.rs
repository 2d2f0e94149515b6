//! Catalog data model.
//!
//! The catalog is a flat list of video entries under a single category,
//! mirroring the wire shape of the remote index. The single-category
//! constraint is a hard invariant of the whole system and is asserted, not
//! handled.

mod types;

pub use types::{ResolvedVideo, VideoCatalog, VideoDetail, VideoEntry};

/// The only category the catalog carries.
pub const CATEGORY: &str = "youtube";

//! Base database trait for template sources.
//!
//! Other crates extend [`Db`] with their own queries; the concrete database
//! lives in `t4-workspace`.

/// Base Salsa database trait shared by every template query.
#[salsa::db]
pub trait Db: salsa::Database {}

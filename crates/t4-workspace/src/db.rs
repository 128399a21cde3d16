//! Concrete Salsa database.
//!
//! [`Database`] implements every database trait in the workspace so that the
//! tracked template queries can run against it. It is owned by a
//! [`Workspace`](crate::Workspace) and only ever used from one thread.

/// Concrete Salsa database for template analysis.
#[salsa::db]
#[derive(Clone)]
pub struct Database {
    storage: salsa::Storage<Self>,
}

impl Database {
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: salsa::Storage::new(None),
        }
    }

    /// A database reporting every Salsa event to `callback`.
    ///
    /// Used to observe which queries execute and which are served from memo.
    #[must_use]
    pub fn with_event_callback(callback: impl Fn(salsa::Event) + Send + Sync + 'static) -> Self {
        Self {
            storage: salsa::Storage::new(Some(Box::new(callback))),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

#[salsa::db]
impl salsa::Database for Database {}

#[salsa::db]
impl t4_source::Db for Database {}

#[salsa::db]
impl t4_templates::Db for Database {}

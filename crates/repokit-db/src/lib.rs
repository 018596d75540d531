//! # repokit-db
//!
//! Repository support over libSQL.
//!
//! Application repositories embed a [`RepositorySupport`] built from a
//! persistence handle and use it to start queries, updates and deletes scoped
//! to that handle:
//!
//! ```no_run
//! # async fn demo() -> Result<(), repokit_db::DatabaseError> {
//! use repokit_core::{Entity, EntityPath, Path};
//! use repokit_db::{LibSqlSession, RepositorySupportBuilder};
//!
//! struct Task;
//! impl Entity for Task {
//!     const NAME: &'static str = "Task";
//!     const TABLE: &'static str = "tasks";
//! }
//!
//! let session = LibSqlSession::open_local(":memory:").await?;
//! let support = RepositorySupportBuilder::new().handle(session).build()?;
//!
//! let task = EntityPath::<Task>::new();
//! let status: Path<String> = task.column("status");
//! let open = support.from([&task]).filter(status.eq("open")).count().await?;
//! # let _ = open;
//! # Ok(())
//! # }
//! ```
//!
//! Statements are rendered for the `SQLite` dialect and executed through the
//! [`PersistenceHandle`] trait, so the libSQL session can be replaced by any
//! other implementation.

pub mod delete;
pub mod error;
pub mod handle;
pub mod helpers;
pub mod query;
pub mod record;
mod render;
pub mod session;
pub mod support;
mod test_support;
pub mod update;

pub use delete::DeleteClause;
pub use error::DatabaseError;
pub use handle::{PersistenceHandle, Statement};
pub use query::SelectQuery;
pub use record::{FromRecord, FromValue, Record};
pub use session::LibSqlSession;
pub use support::{RepositorySupport, RepositorySupportBuilder};
pub use update::UpdateClause;

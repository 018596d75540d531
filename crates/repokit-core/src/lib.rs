//! # repokit-core
//!
//! Library-agnostic query model shared by the repokit crates.
//!
//! This crate provides the typed building blocks repositories use to describe
//! queries without string-based field names:
//! - The `Entity` trait mapping a Rust type to a table
//! - Root and column descriptors (`EntityPath`, `Path`)
//! - Dynamic path builders and their factory
//! - Predicates and ordering
//! - The `Value` type bound into statements
//!
//! Nothing here talks to a database. Rendering and execution live in `repokit-db`.

pub mod builder;
pub mod entity;
pub mod errors;
pub mod path;
pub mod predicate;
pub mod value;

pub use builder::{PathBuilder, PathBuilderFactory};
pub use entity::{AnyEntity, Entity};
pub use errors::CoreError;
pub use path::{ColumnRef, EntityPath, Path, Projection, RootPath};
pub use predicate::{CompareOp, Direction, OrderSpecifier, Predicate};
pub use value::Value;

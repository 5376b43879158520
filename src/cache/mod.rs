//! Style cache instances.
//!
//! This module provides:
//!
//! - [`CacheEntity`]: A reference-counted map from key path to cached artifact
//! - [`CacheValue`]: One entry, pairing a reference count with its artifact
//! - [`create_cache`]: Creates a new instance, sweeping the document when one is supplied
//! - [`path_key`]: Joins a key path into a single cache key

mod entity;
mod instance;

pub use entity::{path_key, CacheEntity, CacheValue, PATH_SEPARATOR};
pub use instance::{create_cache, generate_instance_id};

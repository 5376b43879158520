//! Cache instance creation.

use std::sync::Arc;

use rand::Rng;

use super::entity::CacheEntity;
use crate::hydrate::{hydrate_styles, StyleElementDirectory};

const INSTANCE_ID_RADIX: u32 = 12;
const INSTANCE_ID_LEN: usize = 11;

/// Generates a random base-12 instance id.
pub fn generate_instance_id() -> String {
    let mut rng = rand::rng();
    (0..INSTANCE_ID_LEN)
        .filter_map(|_| {
            let digit = rng.random_range(0..INSTANCE_ID_RADIX);
            std::char::from_digit(digit, INSTANCE_ID_RADIX)
        })
        .collect()
}

/// Creates a new cache instance.
///
/// When a document is supplied, server-rendered style elements are claimed by
/// the new instance and deduplicated (see [`hydrate_styles`]). Without one, or
/// when the directory is not document-backed, no element is touched.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cssinjs_context::create_cache;
///
/// let a = create_cache(None);
/// let b = create_cache(None);
/// assert!(!Arc::ptr_eq(&a, &b));
/// ```
pub fn create_cache(directory: Option<&mut dyn StyleElementDirectory>) -> Arc<CacheEntity> {
    let instance_id = generate_instance_id();

    match directory {
        Some(directory) => {
            let report = hydrate_styles(directory, &instance_id);
            log::debug!(
                "created style cache {} (claimed {}, moved {}, removed {})",
                instance_id,
                report.claimed,
                report.moved,
                report.removed
            );
        }
        None => log::debug!("created style cache {} without a document", instance_id),
    }

    Arc::new(CacheEntity::new(instance_id))
}

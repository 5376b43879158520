//! The one-time hydration sweep run when a cache instance is created.

use std::collections::HashSet;

use super::directory::{Scope, StyleElementDirectory};
use crate::ATTR_MARK;

/// Counts of what a sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Body styles that had no owner and were tagged with the new instance.
    pub claimed: usize,
    /// Styles owned by the new instance that were moved into `<head>`.
    pub moved: usize,
    /// Duplicates owned by the new instance that were removed.
    pub removed: usize,
}

/// Claims, relocates and deduplicates server-rendered style elements.
///
/// 1. Every `<style>` in `<body>` carrying [`ATTR_MARK`] without an owner is
///    tagged with `instance_id`. Elements owned by another instance are left
///    alone.
/// 2. Elements owned by `instance_id` are moved in front of what was the first
///    child of `<head>` when the sweep began, keeping their relative order.
/// 3. Scanning the whole document in order, the first element seen for each
///    hash is kept; later ones are removed only if owned by `instance_id`.
///
/// Does nothing when the directory is not document-backed.
pub fn hydrate_styles(
    directory: &mut dyn StyleElementDirectory,
    instance_id: &str,
) -> HydrationReport {
    let mut report = HydrationReport::default();
    if !directory.is_document_backed() {
        return report;
    }

    let body_styles = directory.find_by_attribute(Scope::Body, ATTR_MARK);
    let anchor = directory.first_head_child();

    for style in body_styles {
        let owner = match directory.read_instance_tag(style) {
            Some(owner) if !owner.is_empty() => owner,
            _ => {
                directory.tag_with_instance(style, instance_id);
                report.claimed += 1;
                instance_id.to_string()
            }
        };

        if owner == instance_id {
            log::trace!("moving style {:?} into head for {}", style, instance_id);
            directory.move_before_in_head(style, anchor);
            report.moved += 1;
        }
    }

    let mut seen = HashSet::new();
    for style in directory.find_by_attribute(Scope::Document, ATTR_MARK) {
        let Some(hash) = directory.attribute(style, ATTR_MARK) else {
            continue;
        };
        if seen.contains(&hash) {
            if directory.read_instance_tag(style).as_deref() == Some(instance_id) {
                log::trace!("removing duplicate style {:?} with hash {}", style, hash);
                directory.remove(style);
                report.removed += 1;
            }
        } else {
            seen.insert(hash);
        }
    }

    log::debug!(
        "hydration for {}: claimed {}, moved {}, removed {}",
        instance_id,
        report.claimed,
        report.moved,
        report.removed
    );
    report
}

//! Shape-wrapper injection.
//!
//! Paths must live directly under a shape. When a path is parented anywhere
//! else, a shape is synthesized between the path and its old parent. Children
//! of the path are then split by type tag: paints move to the new shape,
//! everything else (vertices in particular) stays with the path.
//!
//! | child        | new parent |
//! |--------------|------------|
//! | fill, stroke | wrapper    |
//! | anything else| path       |

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::model::{Document, LocalId, PropertyBag};
use crate::registry::{self, types, TypeRole};

/// Where a child of a wrapped path ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperRule {
    /// Re-parented under the synthesized shape.
    FollowWrapper,
    /// Keeps pointing at the path.
    StayWithOriginal,
}

static WRAPPER_RULES: &[(u16, WrapperRule)] = &[
    (types::FILL, WrapperRule::FollowWrapper),
    (types::STROKE, WrapperRule::FollowWrapper),
];

/// Returns the rule for a child of a wrapped path.
pub fn wrapper_rule(child_tag: u16) -> WrapperRule {
    WRAPPER_RULES
        .iter()
        .find(|(tag, _)| *tag == child_tag)
        .map(|(_, rule)| *rule)
        .unwrap_or(WrapperRule::StayWithOriginal)
}

/// Returns true if an object of `tag` under a parent of `parent_tag` needs
/// a shape inserted between them.
pub fn needs_wrapper(tag: u16, parent_tag: Option<u16>) -> bool {
    let is_path = registry::type_def(tag).is_some_and(|def| def.role == TypeRole::Path);
    is_path && parent_tag != Some(types::SHAPE)
}

/// Inserts shape wrappers where required.
///
/// Wrappers take fresh ids starting at `next_id` and are placed directly in
/// front of the path they wrap. Returns the rewritten document and the
/// number of wrappers inserted.
pub fn inject_wrappers(document: Document, next_id: &mut LocalId) -> (Document, usize) {
    // path id -> wrapper id
    let mut wrapped: FxHashMap<LocalId, LocalId> = FxHashMap::default();
    for bag in document.objects() {
        if !bag.is_linked() || wrapped.contains_key(&bag.local_id) {
            continue;
        }
        let parent_tag = bag
            .parent_id
            .and_then(|parent| document.get(parent))
            .map(|parent| parent.type_tag);
        if needs_wrapper(bag.type_tag, parent_tag) {
            wrapped.insert(bag.local_id, *next_id);
            *next_id += 1;
        }
    }
    if wrapped.is_empty() {
        return (document, 0);
    }

    let mut bags = Vec::with_capacity(document.len() + wrapped.len());
    for mut bag in document.into_objects() {
        if let Some(&wrapper_id) = wrapped.get(&bag.local_id) {
            let mut wrapper = PropertyBag::new(types::SHAPE, wrapper_id);
            wrapper.parent_id = bag.parent_id;
            debug!(
                path = bag.local_id,
                wrapper = wrapper_id,
                "inserted shape wrapper"
            );
            bags.push(wrapper);
            bag.parent_id = Some(wrapper_id);
        } else if wrapper_rule(bag.type_tag) == WrapperRule::FollowWrapper {
            if let Some(&wrapper_id) = bag.parent_id.and_then(|parent| wrapped.get(&parent)) {
                bag.parent_id = Some(wrapper_id);
            }
        }
        bags.push(bag);
    }

    let inserted = wrapped.len();
    (Document::from_bags(bags), inserted)
}

//! Identifier spaces and the resolver that translates between them.
//!
//! Three id spaces meet in this crate:
//! - local ids: assigned by the builder (or re-derived on extraction),
//!   unique within one document;
//! - stream ids: written to the wire, restarting at 0 for each root segment;
//! - runtime ids: assigned by an importer, opaque lookup keys.
//!
//! Every translation goes through [`IdentifierResolver`] and returns `None`
//! when no mapping exists; callers decide what a miss means.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

/// Build-time / re-derived object id.
pub type LocalId = u32;

/// Object id as written to the stream, local to one root segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u32);

/// Object id assigned by an importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeId(pub u32);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for RuntimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Translates ids between the local, stream and runtime spaces.
#[derive(Debug, Clone, Default)]
pub struct IdentifierResolver {
    segment_members: FxHashSet<LocalId>,
    local_to_stream: FxHashMap<LocalId, StreamId>,
    next_stream: u32,
    runtime_to_local: FxHashMap<RuntimeId, LocalId>,
}

impl IdentifierResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh stream-id space containing `members`.
    ///
    /// Only members can be given stream ids until the next call.
    pub fn begin_segment(&mut self, members: impl IntoIterator<Item = LocalId>) {
        self.segment_members.clear();
        self.segment_members.extend(members);
        self.local_to_stream.clear();
        self.next_stream = 0;
    }

    /// Returns true if `id` belongs to the current segment.
    pub fn is_member(&self, id: LocalId) -> bool {
        self.segment_members.contains(&id)
    }

    /// Looks up the stream id already assigned to a local id.
    pub fn build_id_to_stream_id(&self, id: LocalId) -> Option<StreamId> {
        self.local_to_stream.get(&id).copied()
    }

    /// Returns the stream id of `id`, assigning the next free one on first
    /// reference. Stable and idempotent; `None` for non-members.
    pub fn assign_stream_id(&mut self, id: LocalId) -> Option<StreamId> {
        if let Some(&stream) = self.local_to_stream.get(&id) {
            return Some(stream);
        }
        if !self.segment_members.contains(&id) {
            return None;
        }
        let stream = StreamId(self.next_stream);
        self.next_stream += 1;
        self.local_to_stream.insert(id, stream);
        Some(stream)
    }

    /// Returns the number of stream ids assigned in the current segment.
    pub fn assigned_count(&self) -> usize {
        self.local_to_stream.len()
    }

    /// Records the local id re-derived for a runtime id.
    pub fn register_runtime_id(&mut self, runtime: RuntimeId, local: LocalId) {
        self.runtime_to_local.insert(runtime, local);
    }

    /// Translates a runtime id to its re-derived local id.
    pub fn runtime_id_to_local_id(&self, runtime: RuntimeId) -> Option<LocalId> {
        self.runtime_to_local.get(&runtime).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reference_wins() {
        let mut resolver = IdentifierResolver::new();
        resolver.begin_segment([10, 11, 12]);

        assert_eq!(resolver.assign_stream_id(10), Some(StreamId(0)));
        // Forward reference to 12 before 11 is written.
        assert_eq!(resolver.assign_stream_id(12), Some(StreamId(1)));
        assert_eq!(resolver.assign_stream_id(11), Some(StreamId(2)));
        // Idempotent.
        assert_eq!(resolver.assign_stream_id(12), Some(StreamId(1)));
        assert_eq!(resolver.build_id_to_stream_id(11), Some(StreamId(2)));
        assert_eq!(resolver.assigned_count(), 3);
    }

    #[test]
    fn test_non_members_are_never_assigned() {
        let mut resolver = IdentifierResolver::new();
        resolver.begin_segment([1]);
        assert_eq!(resolver.assign_stream_id(99), None);
        assert_eq!(resolver.build_id_to_stream_id(99), None);
        assert_eq!(resolver.assigned_count(), 0);
    }

    #[test]
    fn test_segments_restart_at_zero() {
        let mut resolver = IdentifierResolver::new();
        resolver.begin_segment([0, 1]);
        resolver.assign_stream_id(0);
        resolver.assign_stream_id(1);

        resolver.begin_segment([5, 6]);
        assert_eq!(resolver.build_id_to_stream_id(1), None);
        assert_eq!(resolver.assign_stream_id(6), Some(StreamId(0)));
    }

    #[test]
    fn test_runtime_translation() {
        let mut resolver = IdentifierResolver::new();
        resolver.register_runtime_id(RuntimeId(40), 3);
        assert_eq!(resolver.runtime_id_to_local_id(RuntimeId(40)), Some(3));
        assert_eq!(resolver.runtime_id_to_local_id(RuntimeId(41)), None);
    }
}

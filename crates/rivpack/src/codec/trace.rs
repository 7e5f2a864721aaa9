//! Chunk tracing for the encoder.
//!
//! When enabled, every chunk written (preamble, header keys, header bitmap,
//! one chunk per root segment) is recorded with its offsets and, where the
//! size is known up front, checked against the expected size. Tracing only
//! observes offsets; it never writes to the output.

use std::fmt;

use tracing::{debug, warn};

/// One traced chunk of the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkStat {
    pub name: String,
    pub start: usize,
    pub end: usize,
    /// Size predicted before writing, when the chunk has a fixed layout.
    pub expected: Option<usize>,
    /// Required size multiple, checked when set.
    pub alignment: Option<usize>,
}

impl ChunkStat {
    /// Returns the chunk size in bytes.
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the chunk matches its expected size and alignment.
    pub fn is_consistent(&self) -> bool {
        self.expected.is_none_or(|expected| expected == self.size())
            && self.alignment.is_none_or(|align| self.size() % align == 0)
    }
}

impl fmt::Display for ChunkStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16} [{:>8}..{:>8}) {:>8} B", self.name, self.start, self.end, self.size())?;
        if let Some(expected) = self.expected {
            write!(f, " (expected {})", expected)?;
        }
        Ok(())
    }
}

/// Records chunk boundaries while encoding.
///
/// A disabled tracer costs one boolean check per call.
#[derive(Debug, Clone, Default)]
pub struct ChunkTracer {
    enabled: bool,
    chunks: Vec<ChunkStat>,
}

impl ChunkTracer {
    /// Creates a tracer.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            chunks: Vec::new(),
        }
    }

    /// Returns true if chunks are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records a chunk spanning `start..end`.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        start: usize,
        end: usize,
        expected: Option<usize>,
        alignment: Option<usize>,
    ) {
        if !self.enabled {
            return;
        }
        let chunk = ChunkStat {
            name: name.into(),
            start,
            end,
            expected,
            alignment,
        };
        if chunk.is_consistent() {
            debug!(chunk = %chunk, "encoded chunk");
        } else {
            warn!(chunk = %chunk, "chunk size or alignment mismatch");
        }
        self.chunks.push(chunk);
    }

    /// Logs the per-chunk share of `total` and returns the recorded chunks.
    pub fn finish(self, total: usize) -> Vec<ChunkStat> {
        if self.enabled && total > 0 {
            for chunk in &self.chunks {
                let share = 100.0 * chunk.size() as f64 / total as f64;
                debug!(name = %chunk.name, bytes = chunk.size(), share = format!("{share:.1}%"), "chunk share");
            }
        }
        self.chunks
    }
}

/// Formats chunks as a table with each chunk's share of `total`.
pub fn format_breakdown(chunks: &[ChunkStat], total: usize) -> String {
    let mut out = String::new();
    for chunk in chunks {
        let share = if total == 0 {
            0.0
        } else {
            100.0 * chunk.size() as f64 / total as f64
        };
        let flag = if chunk.is_consistent() { "" } else { "  MISMATCH" };
        out.push_str(&format!("{} {:>5.1}%{}\n", chunk, share, flag));
    }
    out
}

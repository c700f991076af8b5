//! Thread-safe hierarchical frame graph.
//!
//! A [`FrameGraph`] maintains a tree of named coordinate frames, each with a
//! local pose relative to its parent, and answers queries of the form "pose
//! of frame A expressed in frame B's coordinates". Frames are addressed by
//! `/`-separated textual paths ([`FramePath`]); repeated queries go through
//! reusable [`RelativePose`] handles that stay correct across local-pose
//! mutations and fail cleanly when a referenced frame is deleted.
//!
//! Concurrency: one graph-wide reader/writer lock. Readers share, writers
//! exclude, and each query runs under a single lock acquisition so it sees
//! one consistent snapshot of the tree.

mod arena;
mod error;
mod graph;
mod path;
mod relative;

pub use arena::FrameId;
pub use error::FrameError;
pub use graph::FrameGraph;
pub use path::{is_valid_name, FramePath};
pub use relative::RelativePose;

//! Explicit reactivity: control values, and the graph of what reads them.
//!
//! ```text
//!  widget → InputEvent → InputState::apply → changed InputId
//!                                               │
//!                                               ▼
//!                       DependencyGraph::affected_by → nodes, upstream first
//! ```

pub mod graph;
pub mod input;

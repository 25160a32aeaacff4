//! The ADF document model and its generic traversal.
//!
//! Both directions of the transcoder work on [`nodes::Node`]: the encoders
//! receive it through [`walker::translate`], the text decoder produces it.

pub mod nodes;
pub mod walker;

pub use nodes::{Attrs, Mark, MarkKind, Node, NodeKind, PanelType};
pub use walker::{translate, translate_json, Builder};

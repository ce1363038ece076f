//! Renderer-agnostic thumbnail scene and the layout composer that builds it.

pub(crate) mod compose;
pub(crate) mod model;

pub use compose::{ComposerOpts, DEFAULT_LABEL, Decorations, IconRowTail, LayoutComposer};
pub use model::{Paint, Scene, SceneNode, TextBlock, VAlign};

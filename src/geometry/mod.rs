pub mod layout;
pub mod scene;

pub use scene::{build_scene, scene_for, DrawOp, SceneGraph, TextRole};

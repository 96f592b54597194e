pub mod common;
pub mod ecs;
pub mod layout_engine;
pub mod model;
pub mod sys;

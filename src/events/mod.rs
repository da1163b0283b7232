pub mod collision;
pub mod scene;

pub mod add;
pub mod disable;
pub mod enable;
pub mod list;
pub mod remove;
pub mod resource_files;
pub mod resources;
pub mod sync;

pub mod analyze;
pub mod ring;
pub mod systems;

pub mod goal;
pub mod profile;

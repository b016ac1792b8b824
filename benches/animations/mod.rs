pub mod flowing_sand;
pub mod gallery;

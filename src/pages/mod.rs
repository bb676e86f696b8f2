pub mod contact;
pub mod effects;
pub mod gallery;
pub mod navigation;

pub mod analysis;
pub mod loading;
pub mod notice;
pub mod selection;

pub mod card;
pub mod container;
pub mod escape;

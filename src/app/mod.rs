pub mod engagement;
pub mod error;
pub mod locks;
pub mod posts;
pub mod share;

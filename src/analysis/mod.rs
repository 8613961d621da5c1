pub mod growth;
pub mod normalize;
pub mod project;
pub mod window;

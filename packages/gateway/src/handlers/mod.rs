pub mod assets;
pub mod thumbnail;
pub mod video;

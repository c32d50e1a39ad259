pub mod assets;
pub mod emoji;
pub mod markdown;
pub mod renderer;
pub mod request;
pub mod sanitizer;
pub mod template;
pub mod theme;

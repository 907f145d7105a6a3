pub mod observer;
pub mod picker;
pub mod projector;

pub use observer::{Observer, Viewport};
pub use picker::pick;
pub use projector::project;

pub mod instance;
pub mod ribbon;

pub use instance::{BodyBuffer, BodyInstance};
pub use ribbon::{RibbonMesh, RibbonSpan, RibbonStyle, RibbonVertex};

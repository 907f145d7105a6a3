pub mod body;
pub mod builder;
pub mod catalog;
pub mod kepler;
pub mod orbit;
pub mod time;

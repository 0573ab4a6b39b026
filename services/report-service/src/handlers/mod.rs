pub mod analysis;
pub mod export;
pub mod health;

pub use analysis::*;
pub use export::*;
pub use health::*;

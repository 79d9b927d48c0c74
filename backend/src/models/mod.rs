pub mod item;
pub mod macros;
pub mod movement;
pub mod series;
pub mod time;

pub use item::*;
pub use movement::*;
pub use series::*;
pub use time::*;

pub mod breakout;
pub mod price;

pub use breakout::*;
pub use price::*;

pub mod angle_arithmetics;
pub mod clock;
pub mod smoother;

pub use clock::{Clock, MonotonicClock};
pub use smoother::Smoother;

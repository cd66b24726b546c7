mod doctor;
mod magnitude;
mod query;
mod speciality;

pub use doctor::*;
pub use magnitude::*;
pub use query::*;
pub use speciality::*;

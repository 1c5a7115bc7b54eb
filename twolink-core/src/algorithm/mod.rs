pub use self::fk::ForwardKinematics;
pub use self::ik::{InverseKinematics, Reach};

mod fk;
mod ik;

mod error;
mod player;

pub use self::error::Error;
pub use self::player::{channel, InputEvent, InputReceiver, InputSender, Player};

pub type Result<T = ()> = std::result::Result<T, error::Error>;

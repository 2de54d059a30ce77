pub mod arena_key;
pub mod player;
pub mod player_id;

pub use arena_key::ArenaKey;
pub use player::Player;
pub use player_id::PlayerId;

pub mod state;
pub mod messages;
pub mod update;
pub mod view;
pub mod subscription;

pub use state::App;
pub use messages::Message;

pub mod ai;
pub mod auth;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod friend;
pub mod health;
pub mod messages;
pub mod permission;
pub mod upload;
pub mod version;

pub use ai::*;
pub use auth::*;
pub use diagnostics::*;
pub use document::*;
pub use error::*;
pub use friend::*;
pub use health::*;
pub use messages::*;
pub use permission::*;
pub use upload::*;
pub use version::*;

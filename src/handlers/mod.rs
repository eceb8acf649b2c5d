pub mod ai_chat;
pub mod auth;
pub mod diagnostics;
pub mod doc_create;
pub mod doc_get;
pub mod doc_permission;
pub mod doc_update;
pub mod friends;
pub mod health;
pub mod speech;
pub mod upload;

pub use ai_chat::*;
pub use auth::*;
pub use diagnostics::*;
pub use doc_create::*;
pub use doc_get::*;
pub use doc_permission::*;
pub use doc_update::*;
pub use friends::*;
pub use health::*;
pub use speech::*;
pub use upload::*;

mod error;
mod notification;
mod session;

pub use error::SessionError;
pub use notification::{Notification, NotificationKind};
pub use session::{PresentationState, Session, SessionStatus};

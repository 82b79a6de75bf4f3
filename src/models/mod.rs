pub mod foreground;
pub mod gesture;
pub mod region;
pub mod session;

pub use foreground::ForegroundState;
pub use gesture::{GestureKind, GestureSpec};
pub use region::{ClickableRegion, Rect};
pub use session::{Session, SessionOutcome, SessionState};

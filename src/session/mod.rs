pub mod controller;
pub mod evaluate;
pub mod question;
pub mod state;
pub mod timer;

pub use controller::{DrillSession, SessionView};
pub use evaluate::{AnswerError, Verdict};
pub use question::{DrillMode, Question};
pub use state::{Feedback, FeedbackKind, SessionState};

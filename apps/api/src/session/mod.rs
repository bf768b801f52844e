// Swipe sessions: the per-card state machine, the registry of live sessions,
// and the background task that runs each draft request.

pub mod handlers;
pub mod machine;
pub mod registry;

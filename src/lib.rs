pub mod agents;
pub mod audit;
pub mod config;
pub mod drafts;
pub mod extraction;
pub mod forms;
pub mod interview;
pub mod orchestrator;
pub mod planning;
pub mod profile;
pub mod prompts;
pub mod recommend;
pub mod safety;
pub mod services;
pub mod session;
pub mod tools;

// Re-export commonly used types for convenience.
pub use orchestrator::{ChatResponse, TurnOrchestrator};
pub use profile::{MoveProfile, ProfilePatch};
pub use session::{SessionData, SessionStore};

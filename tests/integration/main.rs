use movedesk::config::Settings;
use movedesk::orchestrator::TurnOrchestrator;
use std::env;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// MOVEDESK_HOME is process-global, so harness holders run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

pub struct IntakeHarness {
    workspace: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl IntakeHarness {
    pub fn new() -> Self {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let workspace = TempDir::new().expect("failed to create temp workspace");
        env::set_var("MOVEDESK_HOME", workspace.path());
        Self {
            workspace,
            _guard: guard,
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            mock_mode: true,
            ..Settings::default()
        }
    }

    pub fn orchestrator(&self) -> TurnOrchestrator {
        TurnOrchestrator::new(self.settings()).expect("failed to initialize orchestrator")
    }
}

mod drafts_lifecycle;
mod extraction;
mod form_fill;
mod interview_flow;
mod orchestrator_flow;
mod tools_allowlist;

use crate::core::RunSummary;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(RunSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running tkm commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

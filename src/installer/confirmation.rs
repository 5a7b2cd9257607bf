use clap::ValueEnum;

use super::GuessedName;

/// What the user decided when asked to confirm a simple install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Accept { name: String },
    Cancel,
    RequestManual { name: String },
}

/// Asks whoever drives the install to confirm it and choose the mod name
pub trait Confirmation {
    fn confirm(&mut self, suggested: &GuessedName) -> ConfirmationResponse;
}

impl<F> Confirmation for F
where
    F: FnMut(&GuessedName) -> ConfirmationResponse,
{
    fn confirm(&mut self, suggested: &GuessedName) -> ConfirmationResponse {
        self(suggested)
    }
}

/// Accepts every install under the suggested name
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentConfirmation;

impl Confirmation for SilentConfirmation {
    fn confirm(&mut self, suggested: &GuessedName) -> ConfirmationResponse {
        ConfirmationResponse::Accept {
            name: suggested.value().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Decision {
    #[default]
    Accept,
    Cancel,
    Manual,
}

/// Answers with a decision and optional name chosen ahead of time
#[derive(Debug, Clone, Default)]
pub struct PresetConfirmation {
    decision: Decision,
    name: Option<String>,
}

impl PresetConfirmation {
    pub fn new(decision: Decision, name: Option<String>) -> Self {
        Self { decision, name }
    }
}

impl Confirmation for PresetConfirmation {
    fn confirm(&mut self, suggested: &GuessedName) -> ConfirmationResponse {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| suggested.value().to_string());
        match self.decision {
            Decision::Accept => ConfirmationResponse::Accept { name },
            Decision::Cancel => ConfirmationResponse::Cancel,
            Decision::Manual => ConfirmationResponse::RequestManual { name },
        }
    }
}

use tracing::debug;

use crate::{domain::Field, validation};

use super::{actions::FormCommand, state::FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The command referenced a missing field, or would have duplicated an id.
    Ignored,
}

pub fn apply_command(state: &mut FormState, command: FormCommand) -> CommandOutcome {
    let outcome = match command {
        FormCommand::AddField { id, field_type } => {
            if state.contains(id.as_str()) {
                CommandOutcome::Ignored
            } else {
                state.push(Field::new(id, field_type));
                CommandOutcome::Applied
            }
        }
        FormCommand::RemoveField { id } => match state.remove(id.as_str()) {
            Some(_) => CommandOutcome::Applied,
            None => CommandOutcome::Ignored,
        },
        FormCommand::UpdateField { id, update } => {
            let Some(field) = state.get_mut(id.as_str()) else {
                return CommandOutcome::Ignored;
            };
            if let Some(label) = update.label {
                field.label = label;
            }
            if let Some(value) = update.value {
                field.value = value;
            }
            // error tracks value and type, whichever part changed
            field.error = validation::error_message(field.field_type, &field.value);
            CommandOutcome::Applied
        }
        FormCommand::LoadState(loaded) => {
            *state = loaded;
            CommandOutcome::Applied
        }
        FormCommand::ResetForm => {
            state.clear();
            CommandOutcome::Applied
        }
    };
    debug!(?outcome, fields = state.len(), "form command applied");
    outcome
}

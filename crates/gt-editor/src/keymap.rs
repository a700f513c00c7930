//! Key mapping for the command prompt.
//!
//! Maps a `KeyboardEvent.key` identifier to a prompt action. Only keys that
//! can appear in a command are accepted: ASCII digits, space, and the
//! characters of enabled operators. Anything else is ignored.

use crate::command::OperatorSet;

/// Actions a keydown can trigger while the session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Add a character to the prompt.
    Append(char),
    /// Drop the prompt's last character.
    Backspace,
    /// Parse and run the prompt as a command.
    Submit,
    /// Leave for the paused/settings state.
    Escape,
}

pub struct KeyMap;

impl KeyMap {
    /// Resolve a key to an action. Returns `None` if the key has no binding.
    pub fn resolve(key: &str, operators: OperatorSet) -> Option<KeyAction> {
        match key {
            "Escape" => Some(KeyAction::Escape),
            "Backspace" => Some(KeyAction::Backspace),
            "Enter" => Some(KeyAction::Submit),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    // Named keys ("Shift", "ArrowLeft", …)
                    return None;
                }
                let accepted =
                    c.is_ascii_digit() || c == ' ' || operators.operator_for(c).is_some();
                accepted.then_some(KeyAction::Append(c))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Operator;

    #[test]
    fn resolve_named_keys() {
        assert_eq!(
            KeyMap::resolve("Enter", OperatorSet::ALL),
            Some(KeyAction::Submit)
        );
        assert_eq!(
            KeyMap::resolve("Backspace", OperatorSet::ALL),
            Some(KeyAction::Backspace)
        );
        assert_eq!(
            KeyMap::resolve("Escape", OperatorSet::ALL),
            Some(KeyAction::Escape)
        );
    }

    #[test]
    fn resolve_command_characters() {
        for key in ["0", "7", " ", "-", "c", "d"] {
            assert_eq!(
                KeyMap::resolve(key, OperatorSet::ALL),
                key.chars().next().map(KeyAction::Append),
                "{key:?}"
            );
        }
    }

    #[test]
    fn resolve_ignores_other_keys() {
        assert_eq!(KeyMap::resolve("q", OperatorSet::ALL), None);
        assert_eq!(KeyMap::resolve("Shift", OperatorSet::ALL), None);
        assert_eq!(KeyMap::resolve("ArrowUp", OperatorSet::ALL), None);
        assert_eq!(KeyMap::resolve("", OperatorSet::ALL), None);
    }

    #[test]
    fn resolve_respects_operator_set() {
        let connect_only = OperatorSet::only(&[Operator::Connect]);
        assert_eq!(KeyMap::resolve("d", connect_only), None);
        assert_eq!(
            KeyMap::resolve("-", connect_only),
            Some(KeyAction::Append('-'))
        );
    }
}

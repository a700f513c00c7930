pub mod command;
pub mod dispatch;
pub mod input;
pub mod keymap;
pub mod prompt;
pub mod session;

pub use command::{Action, Command, Operator, OperatorSet, Outcome, execute, parse_command, run};
pub use dispatch::{DeleteModifier, PointerDispatcher, PointerOutcome};
pub use input::{DeviceRect, HeldKeys, InputEvent, Modifiers, PointerButton, map_to_logical};
pub use keymap::{KeyAction, KeyMap};
pub use prompt::{Prompt, PromptState};
pub use session::{GraphSession, RenderTrigger, SessionConfig, SessionInfo};

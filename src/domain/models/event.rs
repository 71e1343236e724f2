use tui_textarea::Input;

use super::AgentReply;
use super::HistoryEntry;
use super::TransportError;

pub enum Event {
    AgentNotice(String),
    AgentError(String),
    SessionRestored(String, Vec<HistoryEntry>),
    TurnFailed(TransportError),
    TurnResolved(AgentReply),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLP(),
    KeyboardCTRLT(),
    KeyboardCTRLY(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}

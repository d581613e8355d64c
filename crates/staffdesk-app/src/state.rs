// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, ChatVisibility, FormKind, TabKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: TabKind,
    pub chat: ChatVisibility,
    pub chat_focused: bool,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: TabKind::Casework,
            chat: ChatVisibility::Expanded,
            chat_focused: false,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SetActiveTab(TabKind),
    EnterEditMode,
    EnterSearch,
    ExitToNav,
    OpenForm(FormKind),
    ToggleChat,
    FocusChat,
    BlurChat,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(TabKind),
    ChatVisibilityChanged(ChatVisibility),
    ChatFocusChanged(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SetActiveTab(tab) => {
                if self.active_tab == tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::EnterEditMode => {
                self.mode = AppMode::Edit;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode), self.set_status("nav")]
            }
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                let mut events = vec![AppEvent::ModeChanged(self.mode)];
                events.extend(self.blur_chat());
                events
            }
            AppCommand::ToggleChat => {
                self.chat = self.chat.toggled();
                let mut events = vec![AppEvent::ChatVisibilityChanged(self.chat)];
                if self.chat == ChatVisibility::Minimized {
                    events.extend(self.blur_chat());
                    events.push(self.set_status("chat minimized"));
                } else {
                    events.push(self.set_status("chat restored"));
                }
                events
            }
            AppCommand::FocusChat => {
                let mut events = Vec::new();
                if self.chat == ChatVisibility::Minimized {
                    self.chat = ChatVisibility::Expanded;
                    events.push(AppEvent::ChatVisibilityChanged(self.chat));
                }
                if !self.chat_focused {
                    self.chat_focused = true;
                    events.push(AppEvent::ChatFocusChanged(true));
                }
                events
            }
            AppCommand::BlurChat => self.blur_chat().into_iter().collect(),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn blur_chat(&mut self) -> Option<AppEvent> {
        if !self.chat_focused {
            return None;
        }
        self.chat_focused = false;
        Some(AppEvent::ChatFocusChanged(false))
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, ChatVisibility, FormKind, TabKind};

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            active_tab: TabKind::Donations,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, TabKind::Casework);
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::Casework)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, TabKind::Donations);
    }

    #[test]
    fn set_active_tab_is_quiet_when_unchanged() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::SetActiveTab(TabKind::Casework)).is_empty());
        assert_eq!(
            state.dispatch(AppCommand::SetActiveTab(TabKind::Budget)),
            vec![AppEvent::TabChanged(TabKind::Budget)]
        );
    }

    #[test]
    fn toggling_chat_twice_restores_layout() {
        let mut state = AppState::default();

        let minimized = state.dispatch(AppCommand::ToggleChat);
        assert_eq!(state.chat, ChatVisibility::Minimized);
        assert_eq!(
            minimized,
            vec![
                AppEvent::ChatVisibilityChanged(ChatVisibility::Minimized),
                AppEvent::StatusUpdated("chat minimized".to_owned()),
            ],
        );

        state.dispatch(AppCommand::ToggleChat);
        assert_eq!(state.chat, ChatVisibility::Expanded);
        assert_eq!(state.chat, AppState::default().chat);
    }

    #[test]
    fn minimizing_drops_chat_focus() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::FocusChat);
        assert!(state.chat_focused);

        let events = state.dispatch(AppCommand::ToggleChat);
        assert!(!state.chat_focused);
        assert!(events.contains(&AppEvent::ChatFocusChanged(false)));
    }

    #[test]
    fn focusing_a_minimized_chat_expands_it() {
        let mut state = AppState {
            chat: ChatVisibility::Minimized,
            ..AppState::default()
        };
        let events = state.dispatch(AppCommand::FocusChat);
        assert_eq!(
            events,
            vec![
                AppEvent::ChatVisibilityChanged(ChatVisibility::Expanded),
                AppEvent::ChatFocusChanged(true),
            ]
        );
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::EnterEditMode);
        assert_eq!(state.mode, AppMode::Edit);

        state.dispatch(AppCommand::OpenForm(FormKind::Case));
        assert_eq!(state.mode, AppMode::Form(FormKind::Case));

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);

        state.dispatch(AppCommand::EnterSearch);
        assert_eq!(state.mode, AppMode::Search);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("case 9 created".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("case 9 created"));
        assert_eq!(
            state.dispatch(AppCommand::ClearStatus),
            vec![AppEvent::StatusCleared]
        );
        assert!(state.status_line.is_none());
    }
}

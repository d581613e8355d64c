// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const CHAT_GREETING: &str = "How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Agent,
}

impl ChatSender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Agent => "agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

/// A reply that has been scheduled but not delivered yet. The request id is
/// the cancellation token: a timer firing with any other id is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub request_id: u64,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    pending: Option<PendingReply>,
    next_request_id: u64,
}

pub fn canned_reply(prompt: &str) -> String {
    format!("I've processed your request: \"{prompt}\"")
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends the user message as typed and returns the reply to schedule.
    /// Blank input is ignored. A reply still pending from an earlier
    /// submission is dropped; only the newest prompt gets answered.
    pub fn submit(&mut self, prompt: &str) -> Option<PendingReply> {
        if prompt.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            sender: ChatSender::User,
            text: prompt.to_owned(),
        });
        self.next_request_id += 1;
        let pending = PendingReply {
            request_id: self.next_request_id,
            prompt: prompt.to_owned(),
        };
        self.pending = Some(pending.clone());
        Some(pending)
    }

    pub fn cancel_pending(&mut self) -> Option<PendingReply> {
        self.pending.take()
    }

    /// Appends the agent reply if `request_id` is still the pending one.
    pub fn deliver(&mut self, request_id: u64, reply: String) -> bool {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => {
                self.pending = None;
                self.messages.push(ChatMessage {
                    sender: ChatSender::Agent,
                    text: reply,
                });
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatVisibility {
    Expanded,
    Minimized,
}

impl ChatVisibility {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Minimized,
            Self::Minimized => Self::Expanded,
        }
    }
}

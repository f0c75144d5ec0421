#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One entry of the conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only, chronologically ordered message history.
///
/// `revision` increases on every committed mutation (append or reset) so
/// observers can tell two logs of equal length apart. `epoch` increases on
/// reset only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
    revision: u64,
    epoch: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> u64 {
        self.messages.push(message);
        self.bump()
    }

    pub fn reset(&mut self) -> u64 {
        self.messages.clear();
        self.epoch += 1;
        self.bump()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

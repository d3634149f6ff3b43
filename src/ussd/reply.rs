//! Wire encoding of dialogue replies

use std::fmt;

/// Whether the gateway should keep the session open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Another round trip is expected
    Continue,
    /// The dialogue is over
    End,
}

impl ReplyKind {
    pub fn token(self) -> &'static str {
        match self {
            ReplyKind::Continue => "CON",
            ReplyKind::End => "END",
        }
    }
}

/// One reply to one dialogue step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub message: String,
}

impl Reply {
    pub fn cont(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Continue,
            message: message.into(),
        }
    }

    pub fn end(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::End,
            message: message.into(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == ReplyKind::End
    }

    /// `CON <message>` or `END <message>`, no other framing or escaping
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.token(), self.message)
    }
}

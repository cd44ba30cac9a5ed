//! Telegram-shaped identifier newtypes.
//!
//! Each id is a transparent wrapper around the integer Telegram uses on the
//! wire, so `{"chatId": 123}` deserializes directly. Absence is always
//! expressed with `Option<_>`, never with a zero value.

use {
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

use crate::error::Error;

macro_rules! telegram_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .map(Self)
                    .map_err(|_| Error::invalid_id($kind, s))
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

telegram_id!(
    /// A Telegram user.
    UserId(i64),
    "user"
);

telegram_id!(
    /// A private chat, group, supergroup or channel. Negative for groups.
    ChatId(i64),
    "chat"
);

telegram_id!(
    /// A message, unique only within its chat.
    MessageId(i32),
    "message"
);

telegram_id!(
    /// A forum topic within a chat. Only comparable within the same chat.
    ThreadId(i32),
    "thread"
);

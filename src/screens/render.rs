use std::fmt;

use crate::domain::record::{OwnerContact, Pet, RecordKind};

/// One record as shown in a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub details: Vec<String>,
}

/// What a list screen puts on the display for its current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    /// Indeterminate progress indicator, nothing else.
    Progress,
    /// The fetch failure text, shown as the only content.
    ErrorText(String),
    /// A fixed informational message (empty list, not signed in).
    Message(String),
    Cards(Vec<Card>),
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "  {}", self.subtitle)?;
        for line in &self.details {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Progress => write!(f, "Loading..."),
            ListView::ErrorText(message) | ListView::Message(message) => write!(f, "{}", message),
            ListView::Cards(cards) => {
                for (index, card) in cards.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", card)?;
                }
                Ok(())
            }
        }
    }
}

pub trait ToCard {
    fn to_card(&self) -> Card;
}

impl ToCard for Pet {
    fn to_card(&self) -> Card {
        Card {
            title: self.name.clone(),
            subtitle: format!("{} • {}", self.pet_type, self.breed),
            details: vec![format!("Age: {} years", self.age)],
        }
    }
}

impl ToCard for OwnerContact {
    fn to_card(&self) -> Card {
        Card {
            title: self.name.clone(),
            subtitle: format!("Phone: {}", self.phone),
            details: vec![
                format!("Email: {}", self.email),
                format!("Address: {}", self.address),
            ],
        }
    }
}

/// Fixed copy of the list screen for one record kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenText {
    pub title: &'static str,
    pub empty: &'static str,
    pub load_failed: &'static str,
    pub sign_in_required: &'static str,
}

pub fn screen_text(kind: RecordKind) -> ScreenText {
    match kind {
        RecordKind::Pets => ScreenText {
            title: "Your Pawfect Pets 🐾",
            empty: "No pets found.\nAdd some later!",
            load_failed: "Failed to load pets",
            sign_in_required: "Please sign in to see your pets.",
        },
        RecordKind::Owners => ScreenText {
            title: "Owner Contacts",
            empty: "No contacts found.",
            load_failed: "Failed to load contacts",
            sign_in_required: "Please sign in to see your contacts.",
        },
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::ids::*;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($storage:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $storage),+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($storage => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    pub enum CaseStatus {
        Open => ("open", "Open"),
        InProgress => ("in_progress", "In Progress"),
        Closed => ("closed", "Closed"),
    }
}

choice_enum! {
    pub enum Priority {
        High => ("high", "High"),
        Medium => ("medium", "Medium"),
        Low => ("low", "Low"),
    }
}

choice_enum! {
    pub enum BillStatus {
        Introduced => ("introduced", "Introduced"),
        InCommittee => ("in_committee", "In Committee"),
        PassedHouse => ("passed_house", "Passed House"),
        PassedSenate => ("passed_senate", "Passed Senate"),
        Enacted => ("enacted", "Enacted"),
        Failed => ("failed", "Failed"),
    }
}

choice_enum! {
    pub enum EventKind {
        Meeting => ("meeting", "Meeting"),
        Hearing => ("hearing", "Hearing"),
        TownHall => ("town_hall", "Town Hall"),
        FloorVote => ("floor_vote", "Floor Vote"),
        Travel => ("travel", "Travel"),
        Other => ("other", "Other"),
    }
}

choice_enum! {
    pub enum ConstituentCategory {
        Individual => ("individual", "Individual"),
        Business => ("business", "Business"),
        Organization => ("organization", "Organization"),
        Official => ("official", "Official"),
    }
}

choice_enum! {
    /// Press releases, newsletters and social posts share one shape.
    pub enum CommsChannel {
        PressRelease => ("press_release", "Press Release"),
        Newsletter => ("newsletter", "Newsletter"),
        SocialPost => ("social_post", "Social Post"),
    }
}

choice_enum! {
    pub enum CommsStatus {
        Draft => ("draft", "Draft"),
        Scheduled => ("scheduled", "Scheduled"),
        Published => ("published", "Published"),
    }
}

choice_enum! {
    pub enum Currency {
        Usdc => ("usdc", "USDC"),
        Usdt => ("usdt", "USDT"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TabKind {
    Casework,
    Legislation,
    Schedule,
    Constituents,
    Budget,
    Communications,
    Donations,
}

impl TabKind {
    pub const ALL: [Self; 7] = [
        Self::Casework,
        Self::Legislation,
        Self::Schedule,
        Self::Constituents,
        Self::Budget,
        Self::Communications,
        Self::Donations,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Casework => "casework",
            Self::Legislation => "legislation",
            Self::Schedule => "schedule",
            Self::Constituents => "constituents",
            Self::Budget => "budget",
            Self::Communications => "comms",
            Self::Donations => "donations",
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Self::Casework => "Constituent Casework",
            Self::Legislation => "Legislation Tracker",
            Self::Schedule => "Schedule",
            Self::Constituents => "Constituent Directory",
            Self::Budget => "Budget Management",
            Self::Communications => "Communications",
            Self::Donations => "Cryptocurrency Donations",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tab| tab.label() == value || tab.heading().to_ascii_lowercase() == value)
    }

    pub const fn has_records(self) -> bool {
        !matches!(self, Self::Donations)
    }

    pub const fn form_kind(self) -> FormKind {
        match self {
            Self::Casework => FormKind::Case,
            Self::Legislation => FormKind::Bill,
            Self::Schedule => FormKind::Event,
            Self::Constituents => FormKind::Constituent,
            Self::Budget => FormKind::Expense,
            Self::Communications => FormKind::CommsItem,
            Self::Donations => FormKind::Donation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    Case,
    Bill,
    Event,
    Constituent,
    Expense,
    CommsItem,
    Donation,
}

impl FormKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Case => "New Constituent Case",
            Self::Bill => "Track Bill",
            Self::Event => "New Event",
            Self::Constituent => "New Constituent",
            Self::Expense => "New Expense",
            Self::CommsItem => "New Communication",
            Self::Donation => "Make a Donation",
        }
    }

    /// Matches the `NOUN` of the record the dialog produces.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Bill => "bill",
            Self::Event => "event",
            Self::Constituent => "constituent",
            Self::Expense => "expense",
            Self::CommsItem => "communication",
            Self::Donation => "donation",
        }
    }

    pub const fn tab(self) -> TabKind {
        match self {
            Self::Case => TabKind::Casework,
            Self::Bill => TabKind::Legislation,
            Self::Event => TabKind::Schedule,
            Self::Constituent => TabKind::Constituents,
            Self::Expense => TabKind::Budget,
            Self::CommsItem => TabKind::Communications,
            Self::Donation => TabKind::Donations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Edit,
    Search,
    Form(FormKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub constituent: String,
    pub issue: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub opened: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    pub constituent: String,
    pub issue: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub opened: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub number: String,
    pub title: String,
    pub sponsor: String,
    pub status: BillStatus,
    pub priority: Priority,
    pub last_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillInput {
    pub number: String,
    pub title: String,
    pub sponsor: String,
    pub status: BillStatus,
    pub priority: Priority,
    pub last_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub kind: EventKind,
    pub date: Date,
    pub time: Time,
    pub location: String,
    pub description: String,
    pub attendees: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub kind: EventKind,
    pub date: Date,
    pub time: Time,
    pub location: String,
    pub description: String,
    pub attendees: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    pub id: ConstituentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub district: String,
    pub category: ConstituentCategory,
    pub last_contact: Date,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituentInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub district: String,
    pub category: ConstituentCategory,
    pub last_contact: Date,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: Date,
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub date: Date,
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommsItem {
    pub id: CommsItemId,
    pub channel: CommsChannel,
    pub title: String,
    pub date: Date,
    pub status: CommsStatus,
    pub reach: u64,
    pub engagements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommsItemInput {
    pub channel: CommsChannel,
    pub title: String,
    pub date: Date,
    pub status: CommsStatus,
    pub reach: u64,
    pub engagements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationPledge {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl DonationPledge {
    /// Amount as typed by a person: whole units drop the cents.
    pub fn amount_text(&self) -> String {
        let whole = self.amount_cents / 100;
        let cents = self.amount_cents % 100;
        if cents == 0 {
            whole.to_string()
        } else {
            format!("{whole}.{cents:02}")
        }
    }

    pub fn thank_you(&self) -> String {
        format!(
            "Thank you for your donation! Please send {} {} to the wallet address below.",
            self.amount_text(),
            self.currency.label()
        )
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use staffdesk_app::{
    BUDGET_CATEGORIES, CaseInput, CaseStatus, CommsChannel, CommsItemInput, CommsStatus,
    ConstituentCategory, ConstituentInput, ExpenseInput, Priority,
};
use std::path::PathBuf;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const STREET_NAMES: [&str; 12] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Juniper", "Sunset", "Ridge",
    "Valley", "Lakeview",
];

const ISSUES: [&str; 10] = [
    "VA Benefits",
    "Medicare Claims",
    "Immigration",
    "Social Security",
    "Tax Issues",
    "Passport Renewal",
    "FEMA Assistance",
    "Student Loans",
    "IRS Refund Delay",
    "Housing Assistance",
];

const INTERESTS: [&str; 10] = [
    "Healthcare",
    "Veterans",
    "Education",
    "Infrastructure",
    "Environment",
    "Small Business",
    "Agriculture",
    "Public Safety",
    "Immigration",
    "Housing",
];

const EXPENSE_ITEMS: [&str; 8] = [
    "Office supplies",
    "Airfare",
    "Postage",
    "Venue rental",
    "Printing",
    "Software license",
    "Mileage",
    "Catering for town hall",
];

const HEADLINE_WORDS: [&str; 16] = [
    "district",
    "update",
    "veterans",
    "broadband",
    "funding",
    "announces",
    "town",
    "hall",
    "grant",
    "infrastructure",
    "statement",
    "vote",
    "community",
    "relief",
    "schools",
    "water",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Reproducible office records for volume tests. The same seed always
/// yields the same sequence.
#[derive(Debug, Clone)]
pub struct OfficeFaker {
    rng: DeterministicRng,
}

impl OfficeFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn case(&mut self) -> CaseInput {
        CaseInput {
            constituent: self.person_name(),
            issue: self.pick(&ISSUES).to_owned(),
            status: *self.pick_choice(CaseStatus::ALL),
            priority: *self.pick_choice(Priority::ALL),
            opened: self.date_in_year(2023),
        }
    }

    pub fn constituent(&mut self) -> ConstituentInput {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let mut interests = Vec::new();
        for _ in 0..=self.rng.int_n(3) {
            let topic = self.pick(&INTERESTS).to_owned();
            if !interests.contains(&topic) {
                interests.push(topic);
            }
        }
        ConstituentInput {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@example.com",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            phone: format!("555-{:04}", self.rng.int_n(10_000)),
            address: format!(
                "{} {} St",
                100 + self.rng.int_n(9_900),
                self.pick(&STREET_NAMES)
            ),
            district: format!("District {}", 1 + self.rng.int_n(5)),
            category: *self.pick_choice(ConstituentCategory::ALL),
            last_contact: self.date_in_year(2023),
            interests,
        }
    }

    pub fn expense(&mut self) -> ExpenseInput {
        let funded = BUDGET_CATEGORIES
            .iter()
            .filter(|category| category.allocated_cents > 0)
            .collect::<Vec<_>>();
        let category = funded[self.rng.int_n(funded.len())];
        ExpenseInput {
            date: self.date_in_year(2023),
            category: category.name.to_owned(),
            description: self.pick(&EXPENSE_ITEMS).to_owned(),
            amount_cents: 500 + (self.rng.next_u64() % 250_000) as i64,
        }
    }

    pub fn comms_item(&mut self) -> CommsItemInput {
        let status = *self.pick_choice(CommsStatus::ALL);
        let (reach, engagements) = if status == CommsStatus::Published {
            let reach = 1_000 + self.rng.next_u64() % 30_000;
            (reach, self.rng.next_u64() % (reach / 2))
        } else {
            (0, 0)
        };
        CommsItemInput {
            channel: *self.pick_choice(CommsChannel::ALL),
            title: self.headline(),
            date: self.date_in_year(2023),
            status,
            reach,
            engagements,
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = Date::from_calendar_date(year, Month::January, 1).expect("valid year start");
        let offset = self.rng.int_n(365) as i64;
        start + Duration::days(offset)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn pick_choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.int_n(items.len())]
    }

    fn headline(&mut self) -> String {
        let count = 3 + self.rng.int_n(4);
        let mut words = Vec::with_capacity(count);
        for _ in 0..count {
            words.push(self.pick(&HEADLINE_WORDS).to_owned());
        }
        let mut headline = words.join(" ");
        if let Some(first) = headline.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        headline
    }
}

/// A scratch directory plus a config path inside it that does not exist yet.
pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn fixture_date() -> Date {
    Date::from_calendar_date(2024, Month::May, 1).expect("valid fixture date")
}

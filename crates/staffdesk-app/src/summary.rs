// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixed aggregates shown beside each tab's table. None of these numbers are
//! derived from the record stores.

use crate::TabKind;
use crate::validation::format_compact_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series {
    pub title: &'static str,
    pub unit: &'static str,
    pub points: &'static [(&'static str, u64)],
}

impl Series {
    pub fn total(&self) -> u64 {
        self.points.iter().map(|(_, value)| value).sum()
    }

    /// Each point's share of the total, in percent. All zeros when the
    /// series is empty or sums to zero.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        self.points
            .iter()
            .map(|(_, value)| calculate_percentage(*value as i64, total as i64))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCategory {
    pub name: &'static str,
    pub allocated_cents: i64,
    pub spent_cents: i64,
}

impl BudgetCategory {
    pub fn percentage(&self) -> f64 {
        calculate_percentage(self.spent_cents, self.allocated_cents)
    }

    /// Gauge fill in `0.0..=1.0`; overspent categories render full.
    pub fn ratio(&self) -> f64 {
        (self.percentage() / 100.0).clamp(0.0, 1.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.allocated_cents > 0 && self.spent_cents > self.allocated_cents
    }

    pub fn gauge_label(&self) -> String {
        format!(
            "{} of {} ({:.1}%)",
            format_compact_cents(self.spent_cents),
            format_compact_cents(self.allocated_cents),
            self.percentage()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabSummary {
    pub title: &'static str,
    pub figures: &'static [Figure],
    pub series: Option<Series>,
    pub gauges: &'static [BudgetCategory],
}

/// `spent / allocated * 100`, or zero when nothing was allocated.
pub fn calculate_percentage(spent: i64, allocated: i64) -> f64 {
    if allocated == 0 {
        return 0.0;
    }
    spent as f64 / allocated as f64 * 100.0
}

pub const BUDGET_CATEGORIES: &[BudgetCategory] = &[
    BudgetCategory {
        name: "Staff Salaries",
        allocated_cents: 80_000_000,
        spent_cents: 50_000_000,
    },
    BudgetCategory {
        name: "Office Operations",
        allocated_cents: 15_000_000,
        spent_cents: 9_800_000,
    },
    BudgetCategory {
        name: "Travel",
        allocated_cents: 6_000_000,
        spent_cents: 4_150_000,
    },
    BudgetCategory {
        name: "Communications",
        allocated_cents: 4_500_000,
        spent_cents: 5_230_000,
    },
    BudgetCategory {
        name: "Constituent Services",
        allocated_cents: 3_000_000,
        spent_cents: 1_275_000,
    },
    BudgetCategory {
        name: "Contingency",
        allocated_cents: 0,
        spent_cents: 0,
    },
];

/// Case-insensitive lookup; returns the canonical entry.
pub fn budget_category(name: &str) -> Option<&'static BudgetCategory> {
    let name = name.trim();
    BUDGET_CATEGORIES
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(name))
}

pub const ISSUE_TYPES: Series = Series {
    title: "Cases by issue type",
    unit: "cases",
    points: &[
        ("VA Benefits", 25),
        ("Medicare/Medicaid", 20),
        ("Immigration", 15),
        ("Social Security", 12),
        ("Tax Issues", 10),
        ("Passport/Visa", 8),
        ("Other", 10),
    ],
};

pub const DONATION_HISTORY: Series = Series {
    title: "Monthly donations",
    unit: "USD",
    points: &[
        ("Jan", 12_000),
        ("Feb", 18_000),
        ("Mar", 15_000),
        ("Apr", 25_000),
        ("May", 22_000),
        ("Jun", 30_000),
    ],
};

const CASEWORK: TabSummary = TabSummary {
    title: "Casework Statistics",
    figures: &[
        Figure {
            label: "Open cases",
            value: "24",
        },
        Figure {
            label: "Cases this month",
            value: "42",
        },
        Figure {
            label: "Average resolution time",
            value: "7.5 days",
        },
    ],
    series: Some(ISSUE_TYPES),
    gauges: &[],
};

const LEGISLATION: TabSummary = TabSummary {
    title: "Legislative Activity",
    figures: &[
        Figure {
            label: "Bills tracked",
            value: "18",
        },
        Figure {
            label: "Sponsored",
            value: "6",
        },
        Figure {
            label: "Votes this session",
            value: "212",
        },
    ],
    series: Some(Series {
        title: "Bills by stage",
        unit: "bills",
        points: &[
            ("Intro", 7),
            ("Cmte", 5),
            ("House", 3),
            ("Senate", 2),
            ("Law", 1),
        ],
    }),
    gauges: &[],
};

const SCHEDULE: TabSummary = TabSummary {
    title: "This Week",
    figures: &[
        Figure {
            label: "Events this week",
            value: "14",
        },
        Figure {
            label: "Hearings",
            value: "3",
        },
        Figure {
            label: "Town halls this quarter",
            value: "4",
        },
    ],
    series: Some(Series {
        title: "Events per day",
        unit: "events",
        points: &[
            ("Mon", 3),
            ("Tue", 4),
            ("Wed", 2),
            ("Thu", 4),
            ("Fri", 1),
        ],
    }),
    gauges: &[],
};

const CONSTITUENTS: TabSummary = TabSummary {
    title: "Constituent Outreach",
    figures: &[
        Figure {
            label: "Contacts on file",
            value: "12,480",
        },
        Figure {
            label: "New this month",
            value: "326",
        },
        Figure {
            label: "Newsletter subscribers",
            value: "8,915",
        },
    ],
    series: Some(Series {
        title: "Contacts by channel",
        unit: "contacts",
        points: &[
            ("Email", 540),
            ("Phone", 310),
            ("Letter", 120),
            ("Visit", 85),
            ("Event", 140),
        ],
    }),
    gauges: &[],
};

const BUDGET: TabSummary = TabSummary {
    title: "Budget Overview",
    figures: &[
        Figure {
            label: "Fiscal year allocation",
            value: "$1.085M",
        },
        Figure {
            label: "Spent to date",
            value: "$704.6k",
        },
        Figure {
            label: "Months remaining",
            value: "5",
        },
    ],
    series: Some(Series {
        title: "Monthly spending ($k)",
        unit: "$k",
        points: &[
            ("Jan", 98),
            ("Feb", 102),
            ("Mar", 117),
            ("Apr", 121),
            ("May", 129),
            ("Jun", 137),
        ],
    }),
    gauges: BUDGET_CATEGORIES,
};

const COMMUNICATIONS: TabSummary = TabSummary {
    title: "Communications Reach",
    figures: &[
        Figure {
            label: "Press releases this month",
            value: "6",
        },
        Figure {
            label: "Newsletter open rate",
            value: "41%",
        },
        Figure {
            label: "Social followers",
            value: "23.4k",
        },
    ],
    series: Some(Series {
        title: "Engagements by channel",
        unit: "engagements",
        points: &[("Press", 4_200), ("Newsletter", 3_650), ("Social", 9_800)],
    }),
    gauges: &[],
};

const DONATIONS: TabSummary = TabSummary {
    title: "Donation History",
    figures: &[
        Figure {
            label: "Raised this year",
            value: "$122,000",
        },
        Figure {
            label: "Accepted",
            value: "USDC, USDT",
        },
    ],
    series: Some(DONATION_HISTORY),
    gauges: &[],
};

pub const fn summary_for(tab: TabKind) -> TabSummary {
    match tab {
        TabKind::Casework => CASEWORK,
        TabKind::Legislation => LEGISLATION,
        TabKind::Schedule => SCHEDULE,
        TabKind::Constituents => CONSTITUENTS,
        TabKind::Budget => BUDGET,
        TabKind::Communications => COMMUNICATIONS,
        TabKind::Donations => DONATIONS,
    }
}

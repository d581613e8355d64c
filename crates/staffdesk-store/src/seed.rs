// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use staffdesk_app::{
    Bill, BillId, BillStatus, Case, CaseId, CaseStatus, CommsChannel, CommsItem, CommsItemId,
    CommsStatus, Constituent, ConstituentCategory, ConstituentId, Event, EventId, EventKind,
    Expense, ExpenseId, Priority,
};
use time::macros::{date, time};

pub const DEFAULT_WALLET_ADDRESS: &str = "0x1234567890abcdef1234567890abcdef12345678";

pub(crate) fn cases() -> Vec<Case> {
    let rows = [
        ("John Smith", "VA Benefits", CaseStatus::Open, Priority::High, date!(2023 - 04 - 15)),
        (
            "Jane Doe",
            "Medicare Claims",
            CaseStatus::InProgress,
            Priority::Medium,
            date!(2023 - 04 - 10),
        ),
        (
            "Robert Johnson",
            "Social Security",
            CaseStatus::Closed,
            Priority::Low,
            date!(2023 - 03 - 22),
        ),
        ("Maria Garcia", "Immigration", CaseStatus::Open, Priority::High, date!(2023 - 04 - 12)),
        (
            "David Lee",
            "Tax Issues",
            CaseStatus::InProgress,
            Priority::Medium,
            date!(2023 - 04 - 01),
        ),
        (
            "Sarah Wilson",
            "FEMA Assistance",
            CaseStatus::Closed,
            Priority::Low,
            date!(2023 - 03 - 15),
        ),
        (
            "Michael Brown",
            "Passport Renewal",
            CaseStatus::Open,
            Priority::Medium,
            date!(2023 - 04 - 08),
        ),
        (
            "Lisa Taylor",
            "Student Loans",
            CaseStatus::InProgress,
            Priority::High,
            date!(2023 - 04 - 05),
        ),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((constituent, issue, status, priority, opened), id)| Case {
            id: CaseId::new(id),
            constituent: constituent.to_owned(),
            issue: issue.to_owned(),
            status,
            priority,
            opened,
        })
        .collect()
}

pub(crate) fn bills() -> Vec<Bill> {
    let rows = [
        (
            "H.R. 2817",
            "Veterans Health Access Act",
            "Rep. Alvarez",
            BillStatus::InCommittee,
            Priority::High,
            "Referred to Veterans' Affairs",
        ),
        (
            "H.R. 1043",
            "Rural Broadband Expansion Act",
            "Rep. Okafor",
            BillStatus::PassedHouse,
            Priority::High,
            "Received in the Senate",
        ),
        (
            "S. 512",
            "Clean Water Infrastructure Act",
            "Sen. Whitfield",
            BillStatus::Introduced,
            Priority::Medium,
            "Read twice",
        ),
        (
            "H.R. 3390",
            "Small Business Tax Relief Act",
            "Rep. Chen",
            BillStatus::InCommittee,
            Priority::Medium,
            "Hearing held by Ways and Means",
        ),
        (
            "H.R. 77",
            "Student Loan Transparency Act",
            "Rep. Alvarez",
            BillStatus::Enacted,
            Priority::Low,
            "Signed into law",
        ),
        (
            "S. 1408",
            "Disaster Relief Modernization Act",
            "Sen. Park",
            BillStatus::PassedSenate,
            Priority::High,
            "Held at the desk",
        ),
        (
            "H.R. 4521",
            "Postal Service Reform Act",
            "Rep. Duarte",
            BillStatus::Failed,
            Priority::Low,
            "Failed on the floor 198-231",
        ),
    ];
    rows.into_iter()
        .zip(1..)
        .map(
            |((number, title, sponsor, status, priority, last_action), id)| Bill {
                id: BillId::new(id),
                number: number.to_owned(),
                title: title.to_owned(),
                sponsor: sponsor.to_owned(),
                status,
                priority,
                last_action: last_action.to_owned(),
            },
        )
        .collect()
}

pub(crate) fn events() -> Vec<Event> {
    let attendees = |names: &[&str]| -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    };
    vec![
        Event {
            id: EventId::new(1),
            title: "Veterans Town Hall".to_owned(),
            kind: EventKind::TownHall,
            date: date!(2023 - 04 - 20),
            time: time!(18:30),
            location: "Riverside Community Center".to_owned(),
            description: "Open forum on VA wait times".to_owned(),
            attendees: attendees(&["District Director", "VA Liaison"]),
            priority: Priority::High,
        },
        Event {
            id: EventId::new(2),
            title: "Energy Subcommittee Hearing".to_owned(),
            kind: EventKind::Hearing,
            date: date!(2023 - 04 - 18),
            time: time!(10:00),
            location: "Rayburn 2123".to_owned(),
            description: "Grid reliability testimony".to_owned(),
            attendees: attendees(&["Legislative Director"]),
            priority: Priority::High,
        },
        Event {
            id: EventId::new(3),
            title: "Chamber of Commerce Breakfast".to_owned(),
            kind: EventKind::Meeting,
            date: date!(2023 - 04 - 21),
            time: time!(07:45),
            location: "Downtown Marriott".to_owned(),
            description: String::new(),
            attendees: attendees(&["Scheduler", "Business Outreach Lead"]),
            priority: Priority::Medium,
        },
        Event {
            id: EventId::new(4),
            title: "Vote on H.R. 1043".to_owned(),
            kind: EventKind::FloorVote,
            date: date!(2023 - 04 - 19),
            time: time!(14:00),
            location: "House Floor".to_owned(),
            description: "Final passage".to_owned(),
            attendees: Vec::new(),
            priority: Priority::High,
        },
        Event {
            id: EventId::new(5),
            title: "District Work Period Travel".to_owned(),
            kind: EventKind::Travel,
            date: date!(2023 - 04 - 22),
            time: time!(16:15),
            location: "DCA to district".to_owned(),
            description: String::new(),
            attendees: attendees(&["Chief of Staff"]),
            priority: Priority::Low,
        },
        Event {
            id: EventId::new(6),
            title: "School Board Listening Session".to_owned(),
            kind: EventKind::Meeting,
            date: date!(2023 - 04 - 24),
            time: time!(17:00),
            location: "Lincoln High Library".to_owned(),
            description: "Title I funding questions".to_owned(),
            attendees: attendees(&["Education LA"]),
            priority: Priority::Medium,
        },
    ]
}

pub(crate) fn constituents() -> Vec<Constituent> {
    let interests = |topics: &[&str]| -> Vec<String> {
        topics.iter().map(|topic| (*topic).to_owned()).collect()
    };
    vec![
        Constituent {
            id: ConstituentId::new(1),
            name: "Eleanor Brooks".to_owned(),
            email: "ebrooks@example.org".to_owned(),
            phone: "555-0142".to_owned(),
            address: "14 Maple Ave".to_owned(),
            district: "District 3".to_owned(),
            category: ConstituentCategory::Individual,
            last_contact: date!(2023 - 04 - 11),
            interests: interests(&["Healthcare", "Veterans"]),
        },
        Constituent {
            id: ConstituentId::new(2),
            name: "Harbor Freight Cooperative".to_owned(),
            email: "office@harborcoop.example.com".to_owned(),
            phone: "555-0199".to_owned(),
            address: "2 Wharf Rd".to_owned(),
            district: "District 1".to_owned(),
            category: ConstituentCategory::Business,
            last_contact: date!(2023 - 03 - 29),
            interests: interests(&["Trade", "Infrastructure"]),
        },
        Constituent {
            id: ConstituentId::new(3),
            name: "Marcus Webb".to_owned(),
            email: "mwebb@example.net".to_owned(),
            phone: "555-0117".to_owned(),
            address: "880 Oak St Apt 4".to_owned(),
            district: "District 3".to_owned(),
            category: ConstituentCategory::Individual,
            last_contact: date!(2023 - 04 - 02),
            interests: interests(&["Education"]),
        },
        Constituent {
            id: ConstituentId::new(4),
            name: "Friends of the River".to_owned(),
            email: "contact@friendsoftheriver.example.org".to_owned(),
            phone: "555-0160".to_owned(),
            address: "PO Box 31".to_owned(),
            district: "District 2".to_owned(),
            category: ConstituentCategory::Organization,
            last_contact: date!(2023 - 04 - 14),
            interests: interests(&["Environment", "Clean Water"]),
        },
        Constituent {
            id: ConstituentId::new(5),
            name: "Mayor Angela Chen".to_owned(),
            email: "mayor@cityhall.example.gov".to_owned(),
            phone: "555-0101".to_owned(),
            address: "1 City Hall Plaza".to_owned(),
            district: "District 1".to_owned(),
            category: ConstituentCategory::Official,
            last_contact: date!(2023 - 04 - 16),
            interests: interests(&["Infrastructure", "Public Safety"]),
        },
        Constituent {
            id: ConstituentId::new(6),
            name: "Priya Natarajan".to_owned(),
            email: "priya.n@example.com".to_owned(),
            phone: String::new(),
            address: "57 Birch Ln".to_owned(),
            district: "District 2".to_owned(),
            category: ConstituentCategory::Individual,
            last_contact: date!(2023 - 02 - 27),
            interests: interests(&["Immigration", "Small Business"]),
        },
    ]
}

pub(crate) fn expenses() -> Vec<Expense> {
    let rows = [
        (date!(2023 - 04 - 03), "Office Operations", "Printer toner and paper", 48_275),
        (date!(2023 - 04 - 05), "Travel", "District round trip airfare", 61_240),
        (date!(2023 - 04 - 07), "Communications", "Newsletter postage", 185_000),
        (date!(2023 - 04 - 10), "Constituent Services", "Town hall venue rental", 75_000),
        (date!(2023 - 04 - 12), "Staff Salaries", "Intern stipends", 320_000),
        (date!(2023 - 04 - 14), "Travel", "Mileage reimbursement", 8_915),
        (date!(2023 - 04 - 17), "Office Operations", "Phone system maintenance", 22_500),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((date, category, description, amount_cents), id)| Expense {
            id: ExpenseId::new(id),
            date,
            category: category.to_owned(),
            description: description.to_owned(),
            amount_cents,
        })
        .collect()
}

pub(crate) fn comms() -> Vec<CommsItem> {
    let rows = [
        (
            CommsChannel::PressRelease,
            "Broadband Act Passes House",
            date!(2023 - 04 - 13),
            CommsStatus::Published,
            15_000,
            2_500,
        ),
        (
            CommsChannel::Newsletter,
            "April District Update",
            date!(2023 - 04 - 01),
            CommsStatus::Published,
            8_915,
            3_650,
        ),
        (
            CommsChannel::SocialPost,
            "Town hall reminder",
            date!(2023 - 04 - 18),
            CommsStatus::Scheduled,
            0,
            0,
        ),
        (
            CommsChannel::PressRelease,
            "Statement on Veterans Health Access Act",
            date!(2023 - 04 - 19),
            CommsStatus::Draft,
            0,
            0,
        ),
        (
            CommsChannel::SocialPost,
            "Casework success story",
            date!(2023 - 04 - 09),
            CommsStatus::Published,
            23_400,
            4_120,
        ),
        (
            CommsChannel::Newsletter,
            "May District Update",
            date!(2023 - 05 - 01),
            CommsStatus::Draft,
            0,
            0,
        ),
    ];
    rows.into_iter()
        .zip(1..)
        .map(
            |((channel, title, date, status, reach, engagements), id)| CommsItem {
                id: CommsItemId::new(id),
                channel,
                title: title.to_owned(),
                date,
                status,
                reach,
                engagements,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use staffdesk_app::{Record, budget_category};

    #[test]
    fn seeded_ids_are_sequential_and_unique() {
        let ids = super::cases()
            .iter()
            .map(|case| case.row_id())
            .collect::<Vec<_>>();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_expenses_use_budget_categories() {
        for expense in super::expenses() {
            assert!(
                budget_category(&expense.category).is_some(),
                "unknown category {}",
                expense.category
            );
        }
    }

    #[test]
    fn every_tab_has_seed_rows() {
        assert_eq!(super::cases().len(), 8);
        assert!(super::bills().len() >= 6);
        assert!(super::events().len() >= 6);
        assert!(super::constituents().len() >= 6);
        assert!(super::expenses().len() >= 6);
        assert!(super::comms().len() >= 6);
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt::Debug;

use crate::{
    Bill, BillId, BillInput, Case, CaseId, CaseInput, CommsItem, CommsItemId, CommsItemInput,
    Constituent, ConstituentId, ConstituentInput, Event, EventId, EventInput, Expense, ExpenseId,
    ExpenseInput, TabKind, ValidationError, ValidationResult, budget_category,
};

/// A row owned by one record store. The store assigns ids; everything else
/// about a record travels through its `Input`.
pub trait Record: Clone + Debug + PartialEq {
    type Input: Clone + Debug + PartialEq;

    const TAB: TabKind;
    /// Lowercase singular noun used in status and error text.
    const NOUN: &'static str;

    fn row_id(&self) -> i64;
    fn assemble(id: i64, input: Self::Input) -> Self;
    fn to_input(&self) -> Self::Input;

    /// Invariants a store enforces on every create and update.
    fn check_input(_input: &Self::Input) -> ValidationResult<()> {
        Ok(())
    }

    /// Fields the tab search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Record for Case {
    type Input = CaseInput;

    const TAB: TabKind = TabKind::Casework;
    const NOUN: &'static str = "case";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: CaseInput) -> Self {
        Self {
            id: CaseId::new(id),
            constituent: input.constituent,
            issue: input.issue,
            status: input.status,
            priority: input.priority,
            opened: input.opened,
        }
    }

    fn to_input(&self) -> CaseInput {
        CaseInput {
            constituent: self.constituent.clone(),
            issue: self.issue.clone(),
            status: self.status,
            priority: self.priority,
            opened: self.opened,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.constituent.as_str(), self.issue.as_str(), self.status.label()]
    }
}

impl Record for Bill {
    type Input = BillInput;

    const TAB: TabKind = TabKind::Legislation;
    const NOUN: &'static str = "bill";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: BillInput) -> Self {
        Self {
            id: BillId::new(id),
            number: input.number,
            title: input.title,
            sponsor: input.sponsor,
            status: input.status,
            priority: input.priority,
            last_action: input.last_action,
        }
    }

    fn to_input(&self) -> BillInput {
        BillInput {
            number: self.number.clone(),
            title: self.title.clone(),
            sponsor: self.sponsor.clone(),
            status: self.status,
            priority: self.priority,
            last_action: self.last_action.clone(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.title.as_str(), self.sponsor.as_str()]
    }
}

impl Record for Event {
    type Input = EventInput;

    const TAB: TabKind = TabKind::Schedule;
    const NOUN: &'static str = "event";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: EventInput) -> Self {
        Self {
            id: EventId::new(id),
            title: input.title,
            kind: input.kind,
            date: input.date,
            time: input.time,
            location: input.location,
            description: input.description,
            attendees: input.attendees,
            priority: input.priority,
        }
    }

    fn to_input(&self) -> EventInput {
        EventInput {
            title: self.title.clone(),
            kind: self.kind,
            date: self.date,
            time: self.time,
            location: self.location.clone(),
            description: self.description.clone(),
            attendees: self.attendees.clone(),
            priority: self.priority,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.kind.label(), self.location.as_str()]
    }
}

impl Record for Constituent {
    type Input = ConstituentInput;

    const TAB: TabKind = TabKind::Constituents;
    const NOUN: &'static str = "constituent";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: ConstituentInput) -> Self {
        Self {
            id: ConstituentId::new(id),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            district: input.district,
            category: input.category,
            last_contact: input.last_contact,
            interests: input.interests,
        }
    }

    fn to_input(&self) -> ConstituentInput {
        ConstituentInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            district: self.district.clone(),
            category: self.category,
            last_contact: self.last_contact,
            interests: self.interests.clone(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.district.as_str()]
    }
}

impl Record for Expense {
    type Input = ExpenseInput;

    const TAB: TabKind = TabKind::Budget;
    const NOUN: &'static str = "expense";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: ExpenseInput) -> Self {
        Self {
            id: ExpenseId::new(id),
            date: input.date,
            category: input.category,
            description: input.description,
            amount_cents: input.amount_cents,
        }
    }

    fn to_input(&self) -> ExpenseInput {
        ExpenseInput {
            date: self.date,
            category: self.category.clone(),
            description: self.description.clone(),
            amount_cents: self.amount_cents,
        }
    }

    fn check_input(input: &ExpenseInput) -> ValidationResult<()> {
        if budget_category(&input.category).is_none() {
            return Err(ValidationError::UnknownCategory {
                field: "category",
                value: input.category.clone(),
            });
        }
        Ok(())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.category.as_str()]
    }
}

impl Record for CommsItem {
    type Input = CommsItemInput;

    const TAB: TabKind = TabKind::Communications;
    const NOUN: &'static str = "communication";

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn assemble(id: i64, input: CommsItemInput) -> Self {
        Self {
            id: CommsItemId::new(id),
            channel: input.channel,
            title: input.title,
            date: input.date,
            status: input.status,
            reach: input.reach,
            engagements: input.engagements,
        }
    }

    fn to_input(&self) -> CommsItemInput {
        CommsItemInput {
            channel: self.channel,
            title: self.title.clone(),
            date: self.date,
            status: self.status,
            reach: self.reach,
            engagements: self.engagements,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.channel.label(), self.status.label()]
    }
}

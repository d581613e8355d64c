// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;

use crate::validation::{
    ValidationError, ValidationResult, format_cents_plain, format_date, format_list, format_time,
    parse_list, parse_optional_count, parse_positive_cents, parse_required_cents,
    parse_required_date, parse_required_time, require_text,
};
use crate::{
    Bill, BillInput, BillStatus, Case, CaseInput, CaseStatus, CommsChannel, CommsItem,
    CommsItemInput, CommsStatus, Constituent, ConstituentCategory, ConstituentInput, Currency,
    DonationPledge, Event, EventInput, EventKind, Expense, ExpenseInput, FormKind, Priority,
    budget_category,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Time,
    Amount,
    Count,
    List,
    Choice,
}

impl FieldKind {
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Text => "",
            Self::Date => "YYYY-MM-DD",
            Self::Time => "HH:MM",
            Self::Amount => "0.00",
            Self::Count => "0",
            Self::List => "comma separated",
            Self::Choice => "space to cycle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used by `ValidationError::field`.
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

const fn field(
    name: &'static str,
    label: &'static str,
    required: bool,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required,
        kind,
    }
}

const CASE_FIELDS: &[FieldSpec] = &[
    field("constituent", "Constituent Name", true, FieldKind::Text),
    field("issue", "Issue", true, FieldKind::Text),
    field("status", "Status", true, FieldKind::Choice),
    field("priority", "Priority", true, FieldKind::Choice),
    field("date", "Date", true, FieldKind::Date),
];

const BILL_FIELDS: &[FieldSpec] = &[
    field("number", "Bill Number", true, FieldKind::Text),
    field("title", "Title", true, FieldKind::Text),
    field("sponsor", "Sponsor", true, FieldKind::Text),
    field("status", "Status", true, FieldKind::Choice),
    field("priority", "Priority", true, FieldKind::Choice),
    field("last_action", "Last Action", false, FieldKind::Text),
];

const EVENT_FIELDS: &[FieldSpec] = &[
    field("title", "Title", true, FieldKind::Text),
    field("kind", "Type", true, FieldKind::Choice),
    field("date", "Date", true, FieldKind::Date),
    field("time", "Time", true, FieldKind::Time),
    field("location", "Location", false, FieldKind::Text),
    field("description", "Description", false, FieldKind::Text),
    field("attendees", "Attendees", false, FieldKind::List),
    field("priority", "Priority", true, FieldKind::Choice),
];

const CONSTITUENT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", true, FieldKind::Text),
    field("email", "Email", true, FieldKind::Text),
    field("phone", "Phone", false, FieldKind::Text),
    field("address", "Address", false, FieldKind::Text),
    field("district", "District", false, FieldKind::Text),
    field("category", "Category", true, FieldKind::Choice),
    field("last_contact", "Last Contact", true, FieldKind::Date),
    field("interests", "Interests", false, FieldKind::List),
];

const EXPENSE_FIELDS: &[FieldSpec] = &[
    field("date", "Date", true, FieldKind::Date),
    field("category", "Category", true, FieldKind::Text),
    field("description", "Description", true, FieldKind::Text),
    field("amount", "Amount", true, FieldKind::Amount),
];

const COMMS_FIELDS: &[FieldSpec] = &[
    field("channel", "Channel", true, FieldKind::Choice),
    field("title", "Title", true, FieldKind::Text),
    field("date", "Date", true, FieldKind::Date),
    field("status", "Status", true, FieldKind::Choice),
    field("reach", "Reach", false, FieldKind::Count),
    field("engagements", "Engagements", false, FieldKind::Count),
];

const DONATION_FIELDS: &[FieldSpec] = &[
    field("amount", "Amount", true, FieldKind::Amount),
    field("currency", "Cryptocurrency", true, FieldKind::Choice),
];

pub const fn fields_for(kind: FormKind) -> &'static [FieldSpec] {
    match kind {
        FormKind::Case => CASE_FIELDS,
        FormKind::Bill => BILL_FIELDS,
        FormKind::Event => EVENT_FIELDS,
        FormKind::Constituent => CONSTITUENT_FIELDS,
        FormKind::Expense => EXPENSE_FIELDS,
        FormKind::CommsItem => COMMS_FIELDS,
        FormKind::Donation => DONATION_FIELDS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDraft {
    pub constituent: String,
    pub issue: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    pub number: String,
    pub title: String,
    pub sponsor: String,
    pub status: BillStatus,
    pub priority: Priority,
    pub last_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub kind: EventKind,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub attendees: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub district: String,
    pub category: ConstituentCategory,
    pub last_contact: String,
    pub interests: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommsItemDraft {
    pub channel: CommsChannel,
    pub title: String,
    pub date: String,
    pub status: CommsStatus,
    pub reach: String,
    pub engagements: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDraft {
    pub amount: String,
    pub currency: Currency,
}

/// Where a submitted dialog lands: a new row, or an existing row by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Update(i64),
}

/// The editable state behind a create or edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Case(CaseDraft),
    Bill(BillDraft),
    Event(EventDraft),
    Constituent(ConstituentDraft),
    Expense(ExpenseDraft),
    CommsItem(CommsItemDraft),
    Donation(DonationDraft),
}

/// A draft that passed validation, ready for a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedForm {
    Case(CaseInput),
    Bill(BillInput),
    Event(EventInput),
    Constituent(ConstituentInput),
    Expense(ExpenseInput),
    CommsItem(CommsItemInput),
    Donation(DonationPledge),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Case(_) => FormKind::Case,
            Self::Bill(_) => FormKind::Bill,
            Self::Event(_) => FormKind::Event,
            Self::Constituent(_) => FormKind::Constituent,
            Self::Expense(_) => FormKind::Expense,
            Self::CommsItem(_) => FormKind::CommsItem,
            Self::Donation(_) => FormKind::Donation,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.kind())
    }

    /// Defaults for a fresh dialog. Date fields start at `today`.
    pub fn blank_for(kind: FormKind, today: Date) -> Self {
        let today = format_date(today);
        match kind {
            FormKind::Case => Self::Case(CaseDraft {
                constituent: String::new(),
                issue: String::new(),
                status: CaseStatus::Open,
                priority: Priority::Medium,
                date: today,
            }),
            FormKind::Bill => Self::Bill(BillDraft {
                number: String::new(),
                title: String::new(),
                sponsor: String::new(),
                status: BillStatus::Introduced,
                priority: Priority::Medium,
                last_action: String::new(),
            }),
            FormKind::Event => Self::Event(EventDraft {
                title: String::new(),
                kind: EventKind::Meeting,
                date: today,
                time: "09:00".to_owned(),
                location: String::new(),
                description: String::new(),
                attendees: String::new(),
                priority: Priority::Medium,
            }),
            FormKind::Constituent => Self::Constituent(ConstituentDraft {
                name: String::new(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
                district: String::new(),
                category: ConstituentCategory::Individual,
                last_contact: today,
                interests: String::new(),
            }),
            FormKind::Expense => Self::Expense(ExpenseDraft {
                date: today,
                category: String::new(),
                description: String::new(),
                amount: String::new(),
            }),
            FormKind::CommsItem => Self::CommsItem(CommsItemDraft {
                channel: CommsChannel::PressRelease,
                title: String::new(),
                date: today,
                status: CommsStatus::Draft,
                reach: String::new(),
                engagements: String::new(),
            }),
            FormKind::Donation => Self::Donation(DonationDraft {
                amount: String::new(),
                currency: Currency::Usdc,
            }),
        }
    }

    /// Text shown for a field, choices rendered by label.
    pub fn value(&self, name: &str) -> Option<String> {
        if let Some(label) = self.choice_label(name) {
            return Some(label.to_owned());
        }
        self.text_ref(name).map(str::to_owned)
    }

    pub fn push_char(&mut self, name: &str, ch: char) -> bool {
        match self.text_mut(name) {
            Some(text) => {
                text.push(ch);
                true
            }
            None => false,
        }
    }

    pub fn pop_char(&mut self, name: &str) -> bool {
        self.text_mut(name)
            .map(|text| text.pop().is_some())
            .unwrap_or(false)
    }

    pub fn set_text(&mut self, name: &str, value: &str) -> bool {
        match self.text_mut(name) {
            Some(text) => {
                *text = value.to_owned();
                true
            }
            None => false,
        }
    }

    /// Moves a choice field to its next (or previous) option, wrapping.
    pub fn cycle_choice(&mut self, name: &str, forward: bool) -> bool {
        match (self, name) {
            (Self::Case(draft), "status") => cycle(&mut draft.status, CaseStatus::ALL, forward),
            (Self::Case(draft), "priority") => cycle(&mut draft.priority, Priority::ALL, forward),
            (Self::Bill(draft), "status") => cycle(&mut draft.status, BillStatus::ALL, forward),
            (Self::Bill(draft), "priority") => cycle(&mut draft.priority, Priority::ALL, forward),
            (Self::Event(draft), "kind") => cycle(&mut draft.kind, EventKind::ALL, forward),
            (Self::Event(draft), "priority") => cycle(&mut draft.priority, Priority::ALL, forward),
            (Self::Constituent(draft), "category") => {
                cycle(&mut draft.category, ConstituentCategory::ALL, forward)
            }
            (Self::CommsItem(draft), "channel") => {
                cycle(&mut draft.channel, CommsChannel::ALL, forward)
            }
            (Self::CommsItem(draft), "status") => {
                cycle(&mut draft.status, CommsStatus::ALL, forward)
            }
            (Self::Donation(draft), "currency") => {
                cycle(&mut draft.currency, Currency::ALL, forward)
            }
            _ => false,
        }
    }

    /// Labels of required fields that are still blank. Submit stays
    /// disabled while this is non-empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|spec| spec.required && spec.kind != FieldKind::Choice)
            .filter(|spec| {
                self.text_ref(spec.name)
                    .is_none_or(|text| text.trim().is_empty())
            })
            .map(|spec| spec.label)
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.missing_required().is_empty()
    }

    pub fn validate(&self) -> ValidationResult<ValidatedForm> {
        Ok(match self {
            Self::Case(draft) => ValidatedForm::Case(draft.validate()?),
            Self::Bill(draft) => ValidatedForm::Bill(draft.validate()?),
            Self::Event(draft) => ValidatedForm::Event(draft.validate()?),
            Self::Constituent(draft) => ValidatedForm::Constituent(draft.validate()?),
            Self::Expense(draft) => ValidatedForm::Expense(draft.validate()?),
            Self::CommsItem(draft) => ValidatedForm::CommsItem(draft.validate()?),
            Self::Donation(draft) => ValidatedForm::Donation(draft.validate()?),
        })
    }

    fn choice_label(&self, name: &str) -> Option<&'static str> {
        match (self, name) {
            (Self::Case(draft), "status") => Some(draft.status.label()),
            (Self::Case(draft), "priority") => Some(draft.priority.label()),
            (Self::Bill(draft), "status") => Some(draft.status.label()),
            (Self::Bill(draft), "priority") => Some(draft.priority.label()),
            (Self::Event(draft), "kind") => Some(draft.kind.label()),
            (Self::Event(draft), "priority") => Some(draft.priority.label()),
            (Self::Constituent(draft), "category") => Some(draft.category.label()),
            (Self::CommsItem(draft), "channel") => Some(draft.channel.label()),
            (Self::CommsItem(draft), "status") => Some(draft.status.label()),
            (Self::Donation(draft), "currency") => Some(draft.currency.label()),
            _ => None,
        }
    }

    fn text_ref(&self, name: &str) -> Option<&str> {
        let text = match (self, name) {
            (Self::Case(draft), "constituent") => &draft.constituent,
            (Self::Case(draft), "issue") => &draft.issue,
            (Self::Case(draft), "date") => &draft.date,
            (Self::Bill(draft), "number") => &draft.number,
            (Self::Bill(draft), "title") => &draft.title,
            (Self::Bill(draft), "sponsor") => &draft.sponsor,
            (Self::Bill(draft), "last_action") => &draft.last_action,
            (Self::Event(draft), "title") => &draft.title,
            (Self::Event(draft), "date") => &draft.date,
            (Self::Event(draft), "time") => &draft.time,
            (Self::Event(draft), "location") => &draft.location,
            (Self::Event(draft), "description") => &draft.description,
            (Self::Event(draft), "attendees") => &draft.attendees,
            (Self::Constituent(draft), "name") => &draft.name,
            (Self::Constituent(draft), "email") => &draft.email,
            (Self::Constituent(draft), "phone") => &draft.phone,
            (Self::Constituent(draft), "address") => &draft.address,
            (Self::Constituent(draft), "district") => &draft.district,
            (Self::Constituent(draft), "last_contact") => &draft.last_contact,
            (Self::Constituent(draft), "interests") => &draft.interests,
            (Self::Expense(draft), "date") => &draft.date,
            (Self::Expense(draft), "category") => &draft.category,
            (Self::Expense(draft), "description") => &draft.description,
            (Self::Expense(draft), "amount") => &draft.amount,
            (Self::CommsItem(draft), "title") => &draft.title,
            (Self::CommsItem(draft), "date") => &draft.date,
            (Self::CommsItem(draft), "reach") => &draft.reach,
            (Self::CommsItem(draft), "engagements") => &draft.engagements,
            (Self::Donation(draft), "amount") => &draft.amount,
            _ => return None,
        };
        Some(text.as_str())
    }

    fn text_mut(&mut self, name: &str) -> Option<&mut String> {
        let text = match (self, name) {
            (Self::Case(draft), "constituent") => &mut draft.constituent,
            (Self::Case(draft), "issue") => &mut draft.issue,
            (Self::Case(draft), "date") => &mut draft.date,
            (Self::Bill(draft), "number") => &mut draft.number,
            (Self::Bill(draft), "title") => &mut draft.title,
            (Self::Bill(draft), "sponsor") => &mut draft.sponsor,
            (Self::Bill(draft), "last_action") => &mut draft.last_action,
            (Self::Event(draft), "title") => &mut draft.title,
            (Self::Event(draft), "date") => &mut draft.date,
            (Self::Event(draft), "time") => &mut draft.time,
            (Self::Event(draft), "location") => &mut draft.location,
            (Self::Event(draft), "description") => &mut draft.description,
            (Self::Event(draft), "attendees") => &mut draft.attendees,
            (Self::Constituent(draft), "name") => &mut draft.name,
            (Self::Constituent(draft), "email") => &mut draft.email,
            (Self::Constituent(draft), "phone") => &mut draft.phone,
            (Self::Constituent(draft), "address") => &mut draft.address,
            (Self::Constituent(draft), "district") => &mut draft.district,
            (Self::Constituent(draft), "last_contact") => &mut draft.last_contact,
            (Self::Constituent(draft), "interests") => &mut draft.interests,
            (Self::Expense(draft), "date") => &mut draft.date,
            (Self::Expense(draft), "category") => &mut draft.category,
            (Self::Expense(draft), "description") => &mut draft.description,
            (Self::Expense(draft), "amount") => &mut draft.amount,
            (Self::CommsItem(draft), "title") => &mut draft.title,
            (Self::CommsItem(draft), "date") => &mut draft.date,
            (Self::CommsItem(draft), "reach") => &mut draft.reach,
            (Self::CommsItem(draft), "engagements") => &mut draft.engagements,
            (Self::Donation(draft), "amount") => &mut draft.amount,
            _ => return None,
        };
        Some(text)
    }
}

fn cycle<T: Copy + PartialEq>(current: &mut T, options: &[T], forward: bool) -> bool {
    let Some(position) = options.iter().position(|option| option == current) else {
        return false;
    };
    let len = options.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    *current = options[next];
    true
}

impl CaseDraft {
    pub fn validate(&self) -> ValidationResult<CaseInput> {
        Ok(CaseInput {
            constituent: require_text("constituent", &self.constituent)?,
            issue: require_text("issue", &self.issue)?,
            status: self.status,
            priority: self.priority,
            opened: parse_required_date("date", &self.date)?,
        })
    }
}

impl BillDraft {
    pub fn validate(&self) -> ValidationResult<BillInput> {
        Ok(BillInput {
            number: require_text("number", &self.number)?,
            title: require_text("title", &self.title)?,
            sponsor: require_text("sponsor", &self.sponsor)?,
            status: self.status,
            priority: self.priority,
            last_action: self.last_action.trim().to_owned(),
        })
    }
}

impl EventDraft {
    pub fn validate(&self) -> ValidationResult<EventInput> {
        Ok(EventInput {
            title: require_text("title", &self.title)?,
            kind: self.kind,
            date: parse_required_date("date", &self.date)?,
            time: parse_required_time("time", &self.time)?,
            location: self.location.trim().to_owned(),
            description: self.description.trim().to_owned(),
            attendees: parse_list(&self.attendees),
            priority: self.priority,
        })
    }
}

impl ConstituentDraft {
    pub fn validate(&self) -> ValidationResult<ConstituentInput> {
        Ok(ConstituentInput {
            name: require_text("name", &self.name)?,
            email: require_text("email", &self.email)?,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            district: self.district.trim().to_owned(),
            category: self.category,
            last_contact: parse_required_date("last_contact", &self.last_contact)?,
            interests: parse_list(&self.interests),
        })
    }
}

impl ExpenseDraft {
    pub fn validate(&self) -> ValidationResult<ExpenseInput> {
        let date = parse_required_date("date", &self.date)?;
        let category = require_text("category", &self.category)?;
        let category = budget_category(&category)
            .ok_or(ValidationError::UnknownCategory {
                field: "category",
                value: category,
            })?
            .name
            .to_owned();
        Ok(ExpenseInput {
            date,
            category,
            description: require_text("description", &self.description)?,
            amount_cents: parse_required_cents("amount", &self.amount)?,
        })
    }
}

impl CommsItemDraft {
    pub fn validate(&self) -> ValidationResult<CommsItemInput> {
        Ok(CommsItemInput {
            channel: self.channel,
            title: require_text("title", &self.title)?,
            date: parse_required_date("date", &self.date)?,
            status: self.status,
            reach: parse_optional_count("reach", &self.reach)?,
            engagements: parse_optional_count("engagements", &self.engagements)?,
        })
    }
}

impl DonationDraft {
    pub fn validate(&self) -> ValidationResult<DonationPledge> {
        Ok(DonationPledge {
            amount_cents: parse_positive_cents("amount", &self.amount)?,
            currency: self.currency,
        })
    }
}

impl From<&Case> for FormPayload {
    fn from(case: &Case) -> Self {
        Self::Case(CaseDraft {
            constituent: case.constituent.clone(),
            issue: case.issue.clone(),
            status: case.status,
            priority: case.priority,
            date: format_date(case.opened),
        })
    }
}

impl From<&Bill> for FormPayload {
    fn from(bill: &Bill) -> Self {
        Self::Bill(BillDraft {
            number: bill.number.clone(),
            title: bill.title.clone(),
            sponsor: bill.sponsor.clone(),
            status: bill.status,
            priority: bill.priority,
            last_action: bill.last_action.clone(),
        })
    }
}

impl From<&Event> for FormPayload {
    fn from(event: &Event) -> Self {
        Self::Event(EventDraft {
            title: event.title.clone(),
            kind: event.kind,
            date: format_date(event.date),
            time: format_time(event.time),
            location: event.location.clone(),
            description: event.description.clone(),
            attendees: format_list(&event.attendees),
            priority: event.priority,
        })
    }
}

impl From<&Constituent> for FormPayload {
    fn from(constituent: &Constituent) -> Self {
        Self::Constituent(ConstituentDraft {
            name: constituent.name.clone(),
            email: constituent.email.clone(),
            phone: constituent.phone.clone(),
            address: constituent.address.clone(),
            district: constituent.district.clone(),
            category: constituent.category,
            last_contact: format_date(constituent.last_contact),
            interests: format_list(&constituent.interests),
        })
    }
}

impl From<&Expense> for FormPayload {
    fn from(expense: &Expense) -> Self {
        Self::Expense(ExpenseDraft {
            date: format_date(expense.date),
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: format_cents_plain(expense.amount_cents),
        })
    }
}

impl From<&CommsItem> for FormPayload {
    fn from(item: &CommsItem) -> Self {
        let count = |value: u64| {
            if value == 0 {
                String::new()
            } else {
                value.to_string()
            }
        };
        Self::CommsItem(CommsItemDraft {
            channel: item.channel,
            title: item.title.clone(),
            date: format_date(item.date),
            status: item.status,
            reach: count(item.reach),
            engagements: count(item.engagements),
        })
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use staffdesk_app::{FormPayload, FormTarget, Record, TabKind, ValidatedForm};
use staffdesk_store::{Office, RecordStore, Store, StoreError};
use staffdesk_tui::{AppRuntime, SubmitOutcome, TabSnapshot};
use std::time::Duration;

/// Where copied text goes.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard. Opened on first use and kept open, since some
/// platforms drop the contents when the handle goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("open system clipboard")?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_owned())
                .context("write to system clipboard")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub wallet_address: String,
    pub page_size: usize,
    pub reply_delay: Duration,
}

pub struct OfficeRuntime<C: Clipboard> {
    office: Office,
    options: RuntimeOptions,
    clipboard: C,
}

impl<C: Clipboard> OfficeRuntime<C> {
    pub fn new(office: Office, options: RuntimeOptions, clipboard: C) -> Self {
        Self {
            office,
            options,
            clipboard,
        }
    }
}

impl<C: Clipboard> AppRuntime for OfficeRuntime<C> {
    fn load_tab_snapshot(&mut self, tab: TabKind, query: &str) -> Result<Option<TabSnapshot>> {
        let snapshot = match tab {
            TabKind::Casework => TabSnapshot::Cases(self.office.cases.list(query)),
            TabKind::Legislation => TabSnapshot::Bills(self.office.bills.list(query)),
            TabKind::Schedule => TabSnapshot::Events(self.office.events.list(query)),
            TabKind::Constituents => {
                TabSnapshot::Constituents(self.office.constituents.list(query))
            }
            TabKind::Budget => TabSnapshot::Expenses(self.office.expenses.list(query)),
            TabKind::Communications => TabSnapshot::Comms(self.office.comms.list(query)),
            TabKind::Donations => return Ok(None),
        };
        tracing::debug!(
            tab = tab.label(),
            query,
            rows = snapshot.row_count(),
            "tab loaded"
        );
        Ok(Some(snapshot))
    }

    fn load_form_payload(&mut self, tab: TabKind, row_id: i64) -> Result<Option<FormPayload>> {
        let payload = match tab {
            TabKind::Casework => self.office.cases.get(row_id).as_ref().map(FormPayload::from),
            TabKind::Legislation => self.office.bills.get(row_id).as_ref().map(FormPayload::from),
            TabKind::Schedule => self.office.events.get(row_id).as_ref().map(FormPayload::from),
            TabKind::Constituents => self
                .office
                .constituents
                .get(row_id)
                .as_ref()
                .map(FormPayload::from),
            TabKind::Budget => self
                .office
                .expenses
                .get(row_id)
                .as_ref()
                .map(FormPayload::from),
            TabKind::Communications => self.office.comms.get(row_id).as_ref().map(FormPayload::from),
            TabKind::Donations => None,
        };
        Ok(payload)
    }

    fn submit_form(&mut self, target: FormTarget, form: ValidatedForm) -> Result<SubmitOutcome> {
        match form {
            ValidatedForm::Case(input) => save(&mut self.office.cases, target, input),
            ValidatedForm::Bill(input) => save(&mut self.office.bills, target, input),
            ValidatedForm::Event(input) => save(&mut self.office.events, target, input),
            ValidatedForm::Constituent(input) => {
                save(&mut self.office.constituents, target, input)
            }
            ValidatedForm::Expense(input) => save(&mut self.office.expenses, target, input),
            ValidatedForm::CommsItem(input) => save(&mut self.office.comms, target, input),
            ValidatedForm::Donation(pledge) => {
                tracing::info!(
                    amount_cents = pledge.amount_cents,
                    currency = pledge.currency.as_str(),
                    "donation pledged"
                );
                Ok(SubmitOutcome::Pledged(pledge))
            }
        }
    }

    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<()> {
        let result = match tab {
            TabKind::Casework => self.office.cases.delete(row_id).map(drop),
            TabKind::Legislation => self.office.bills.delete(row_id).map(drop),
            TabKind::Schedule => self.office.events.delete(row_id).map(drop),
            TabKind::Constituents => self.office.constituents.delete(row_id).map(drop),
            TabKind::Budget => self.office.expenses.delete(row_id).map(drop),
            TabKind::Communications => self.office.comms.delete(row_id).map(drop),
            TabKind::Donations => bail!("the donations tab has no rows to delete"),
        };
        result.map_err(store_error)
    }

    fn wallet_address(&self) -> String {
        self.options.wallet_address.clone()
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text)?;
        tracing::info!(chars = text.len(), "copied to clipboard");
        Ok(())
    }

    fn page_size(&self) -> usize {
        self.options.page_size
    }

    fn chat_reply_delay(&self) -> Duration {
        self.options.reply_delay
    }

    fn agent_reply(&mut self, prompt: &str) -> String {
        tracing::debug!(chars = prompt.len(), "chat reply scheduled");
        staffdesk_app::canned_reply(prompt)
    }
}

fn save<R: Record>(
    store: &mut RecordStore<R>,
    target: FormTarget,
    input: R::Input,
) -> Result<SubmitOutcome> {
    let (record, created) = match target {
        FormTarget::Create => (store.create(input).map_err(store_error)?, true),
        FormTarget::Update(id) => (store.update(id, input).map_err(store_error)?, false),
    };
    Ok(SubmitOutcome::Saved {
        noun: R::NOUN,
        id: record.row_id(),
        created,
    })
}

/// Field-level rejections travel as `ValidationError` so the dialog can
/// mark the offending field.
fn store_error(error: StoreError) -> anyhow::Error {
    match error {
        StoreError::Validation(invalid) => invalid.into(),
        other => other.into(),
    }
}

//! Exposure ledger: applies validated events to invoice and portfolio state.
//!
//! Events are applied strictly in arrival order. After every event, whatever
//! its effect, the running exposure is sampled into the series and the peak
//! of the event's month is raised if exceeded.

use crate::account::InvoiceAccount;
use crate::amount::Amount;
use crate::event::{Event, EventKind};
use crate::month::Month;
use log::debug;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Position in the exposure series where the bucketed month changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    /// Index of the first series entry of this run of `month`. It is 0-based
    /// on purpose so that it indexes `exposure_series` directly; it is not a
    /// 1-based event ordinal.
    pub index: usize,
    pub month: Month,
}

/// Portfolio-wide aggregates for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioState {
    /// Sum of everything invoiced and not yet released by a settling payment.
    pub current_exposure: Amount,

    /// Highest `current_exposure` sampled after an event of each month.
    pub monthly_peak: [Amount; 12],

    /// Net exposure change attributed to events of each month.
    pub monthly_end: [Amount; 12],

    /// Records rejected before reaching the ledger.
    pub skipped_count: usize,

    /// `current_exposure` after each applied event.
    pub exposure_series: Vec<Amount>,

    pub breakpoints: Vec<Breakpoint>,
}

impl PortfolioState {
    pub fn peak(&self, month: Month) -> Amount {
        self.monthly_peak[month.index()]
    }

    pub fn end(&self, month: Month) -> Amount {
        self.monthly_end[month.index()]
    }

    fn credit(&mut self, month: Month, amount: Amount) {
        self.current_exposure += amount;
        self.monthly_end[month.index()] += amount;
    }

    fn release(&mut self, month: Month, amount: Amount) {
        self.current_exposure -= amount;
        self.monthly_end[month.index()] -= amount;
    }

    fn sample(&mut self, month: Month) {
        if self.breakpoints.last().map(|b| b.month) != Some(month) {
            self.breakpoints.push(Breakpoint {
                index: self.exposure_series.len(),
                month,
            });
        }

        self.exposure_series.push(self.current_exposure);

        let peak = &mut self.monthly_peak[month.index()];
        if self.current_exposure > *peak {
            *peak = self.current_exposure;
        }
    }
}

/// What applying one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new invoice account was opened.
    Registered,

    /// The invoice id was already registered; the event was discarded.
    DuplicateRegistration,

    FeeAdded,

    /// Payment recorded; `released` is the amount taken off exposure when
    /// the payment left the account settled.
    PaymentRecorded { released: Option<Amount> },

    /// Fee or payment for an invoice that was never registered.
    UnknownInvoice,
}

/// The exposure ledger.
///
/// Owns every invoice account and the portfolio aggregates. There is no
/// shared or global state: each ledger is a self-contained replay.
#[derive(Debug, Default)]
pub struct ExposureLedger {
    /// Invoice accounts indexed by invoice id.
    accounts: HashMap<String, InvoiceAccount>,

    state: PortfolioState,
}

impl ExposureLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one validated event and samples the resulting exposure.
    pub fn apply(&mut self, event: &Event) -> ApplyOutcome {
        let outcome = match event.kind {
            EventKind::InvoiceRegistered => self.register_invoice(event),
            EventKind::LateFeeRegistered => self.register_late_fee(event),
            EventKind::PaymentRegistered => self.register_payment(event),
        };

        self.state.sample(event.month);
        outcome
    }

    /// Counts a record that failed validation.
    pub fn record_skip(&mut self) {
        self.state.skipped_count += 1;
    }

    pub fn state(&self) -> &PortfolioState {
        &self.state
    }

    pub fn into_state(self) -> PortfolioState {
        self.state
    }

    pub fn account(&self, invoice_id: &str) -> Option<&InvoiceAccount> {
        self.accounts.get(invoice_id)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn register_invoice(&mut self, event: &Event) -> ApplyOutcome {
        match self.accounts.entry(event.invoice_id.clone()) {
            Entry::Occupied(_) => {
                debug!(
                    "Invoice {} already registered, discarding registration of {}",
                    event.invoice_id, event.amount
                );
                ApplyOutcome::DuplicateRegistration
            }
            Entry::Vacant(slot) => {
                slot.insert(InvoiceAccount::register(&event.invoice_id, event.amount));
                self.state.credit(event.month, event.amount);
                debug!(
                    "Registered invoice {} for {} in {}",
                    event.invoice_id, event.amount, event.month
                );
                ApplyOutcome::Registered
            }
        }
    }

    fn register_late_fee(&mut self, event: &Event) -> ApplyOutcome {
        let Some(account) = self.accounts.get_mut(&event.invoice_id) else {
            debug!(
                "Late fee references unknown invoice {}, ignoring",
                event.invoice_id
            );
            return ApplyOutcome::UnknownInvoice;
        };

        account.add_fee(event.amount);
        self.state.credit(event.month, event.amount);
        debug!(
            "Added late fee {} to invoice {} in {}",
            event.amount, event.invoice_id, event.month
        );
        ApplyOutcome::FeeAdded
    }

    fn register_payment(&mut self, event: &Event) -> ApplyOutcome {
        let Some(account) = self.accounts.get_mut(&event.invoice_id) else {
            debug!(
                "Payment references unknown invoice {}, ignoring",
                event.invoice_id
            );
            return ApplyOutcome::UnknownInvoice;
        };

        let released = account.record_payment(event.amount);
        match released {
            Some(paid) => {
                self.state.release(event.month, paid);
                debug!(
                    "Invoice {} settled in {}, released {}",
                    event.invoice_id, event.month, paid
                );
            }
            None => debug!(
                "Recorded payment {} on invoice {}, outstanding {}",
                event.amount,
                event.invoice_id,
                account.outstanding()
            ),
        }

        ApplyOutcome::PaymentRecorded { released }
    }
}

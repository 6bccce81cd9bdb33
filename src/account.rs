//! Per-invoice account model.

use crate::amount::Amount;

/// Running totals for one registered invoice.
///
/// # Invariants
///
/// - Only created by an `InvoiceRegistered` event; the first registration
///   for an id wins and later ones never touch the account
/// - `invoiced_total` and `paid_total` only ever grow (for non-negative input)
///
/// # Settlement
///
/// An account is settled once `paid_total >= invoiced_total`. Every payment
/// that leaves the account settled reports the *whole* `paid_total` as the
/// amount to release from exposure, including payments arriving after the
/// account was already settled. The ledger subtracts that full figure each
/// time, so over-payments on a settled invoice are released repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceAccount {
    pub invoice_id: String,

    /// Registered amount plus all late fees.
    pub invoiced_total: Amount,

    /// Sum of all payments received.
    pub paid_total: Amount,
}

impl InvoiceAccount {
    /// Opens an account from its registration amount.
    pub fn register(invoice_id: impl Into<String>, amount: Amount) -> Self {
        InvoiceAccount {
            invoice_id: invoice_id.into(),
            invoiced_total: amount,
            paid_total: Amount::ZERO,
        }
    }

    /// Adds a late fee to the invoiced total.
    pub fn add_fee(&mut self, amount: Amount) {
        self.invoiced_total += amount;
    }

    /// Records a payment.
    ///
    /// Returns the amount to release from exposure: the full `paid_total`
    /// if the account is settled after this payment, otherwise `None`.
    pub fn record_payment(&mut self, amount: Amount) -> Option<Amount> {
        self.paid_total += amount;
        self.is_settled().then_some(self.paid_total)
    }

    /// Returns `true` once payments cover the invoiced total.
    pub fn is_settled(&self) -> bool {
        self.paid_total >= self.invoiced_total
    }

    /// Invoiced minus paid; negative when over-paid.
    pub fn outstanding(&self) -> Amount {
        self.invoiced_total - self.paid_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_register_opens_unpaid_account() {
        let account = InvoiceAccount::register("A", amt("100"));
        assert_eq!(account.invoice_id, "A");
        assert_eq!(account.invoiced_total, amt("100"));
        assert_eq!(account.paid_total, Amount::ZERO);
        assert!(!account.is_settled());
    }

    #[test]
    fn test_fee_raises_invoiced_total() {
        let mut account = InvoiceAccount::register("A", amt("100"));
        account.add_fee(amt("12.5"));
        assert_eq!(account.invoiced_total, amt("112.5"));
        assert_eq!(account.outstanding(), amt("112.5"));
    }

    #[test]
    fn test_partial_payment_releases_nothing() {
        let mut account = InvoiceAccount::register("A", amt("100"));
        assert_eq!(account.record_payment(amt("40")), None);
        assert_eq!(account.paid_total, amt("40"));
        assert_eq!(account.outstanding(), amt("60"));
    }

    #[test]
    fn test_settling_payment_releases_full_paid_total() {
        let mut account = InvoiceAccount::register("A", amt("100"));
        account.record_payment(amt("40"));
        assert_eq!(account.record_payment(amt("60")), Some(amt("100")));
        assert!(account.is_settled());
    }

    #[test]
    fn test_payment_after_settlement_releases_accumulated_total() {
        let mut account = InvoiceAccount::register("A", amt("100"));
        account.record_payment(amt("100"));
        assert_eq!(account.record_payment(amt("5")), Some(amt("105")));
        assert_eq!(account.outstanding(), amt("-5"));
    }

    #[test]
    fn test_zero_amount_invoice_is_settled_by_zero_payment() {
        let mut account = InvoiceAccount::register("A", Amount::ZERO);
        assert!(account.is_settled());
        assert_eq!(account.record_payment(Amount::ZERO), Some(Amount::ZERO));
    }
}

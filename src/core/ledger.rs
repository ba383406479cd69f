//! Account ledger operations
//!
//! Balance mutation for a single [`Account`]:
//! - Deposits credit the balance
//! - Withdrawals debit the balance when funds suffice
//! - Transfers move funds to another account
//!
//! Every successful operation appends exactly one [`LedgerEntry`] to the
//! account's own history and returns a copy of it so callers can record it
//! elsewhere (see [`crate::core::recorder`]). Failed operations leave the
//! account untouched. All arithmetic is checked.

use crate::types::{Account, EntryKind, LedgerEntry, LedgerError};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

/// Reject zero and negative amounts
fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Account {
    /// Deposit funds, stamped with the local clock
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not positive
    /// - `ArithmeticOverflow` if the balance cannot hold the result
    pub fn deposit(&mut self, amount: Decimal) -> Result<LedgerEntry, LedgerError> {
        self.deposit_at(amount, now())
    }

    /// Deposit funds with an explicit timestamp
    pub fn deposit_at(
        &mut self,
        amount: Decimal,
        timestamp: NaiveDateTime,
    ) -> Result<LedgerEntry, LedgerError> {
        ensure_positive(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.account_number))?;

        self.balance = new_balance;
        Ok(self.append(EntryKind::Deposit, amount, timestamp))
    }

    /// Withdraw funds, stamped with the local clock
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not positive
    /// - `InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<LedgerEntry, LedgerError> {
        self.withdraw_at(amount, now())
    }

    /// Withdraw funds with an explicit timestamp
    pub fn withdraw_at(
        &mut self,
        amount: Decimal,
        timestamp: NaiveDateTime,
    ) -> Result<LedgerEntry, LedgerError> {
        ensure_positive(amount)?;
        let new_balance = self.debited(amount)?;

        self.balance = new_balance;
        Ok(self.append(EntryKind::Withdraw, amount, timestamp))
    }

    /// Transfer funds to `target`, stamped with the local clock
    ///
    /// The target is credited through its own [`Account::deposit_at`], so it
    /// records a `Deposit` entry while this account records a `Transfer`.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not positive
    /// - `SameAccountTransfer` if both sides share an account number
    /// - `InsufficientFunds` if `amount` exceeds this account's balance
    /// - `ArithmeticOverflow` if the target cannot hold the credit
    pub fn transfer(
        &mut self,
        amount: Decimal,
        target: &mut Account,
    ) -> Result<LedgerEntry, LedgerError> {
        self.transfer_at(amount, target, now())
    }

    /// Transfer funds with an explicit timestamp
    pub fn transfer_at(
        &mut self,
        amount: Decimal,
        target: &mut Account,
        timestamp: NaiveDateTime,
    ) -> Result<LedgerEntry, LedgerError> {
        ensure_positive(amount)?;
        if target.account_number == self.account_number {
            return Err(LedgerError::same_account_transfer(&self.account_number));
        }

        // Debit is computed up front and the credit applied first: if the
        // credit fails nothing has changed on either side.
        let new_balance = self.debited(amount)?;
        target.deposit_at(amount, timestamp)?;

        self.balance = new_balance;
        Ok(self.append(EntryKind::Transfer, amount, timestamp))
    }

    /// Balance after removing `amount`, if funds suffice
    fn debited(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount > self.balance {
            return Err(LedgerError::insufficient_funds(
                &self.account_number,
                self.balance,
                amount,
            ));
        }

        self.balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::insufficient_funds(&self.account_number, self.balance, amount))
    }

    fn append(&mut self, kind: EntryKind, amount: Decimal, timestamp: NaiveDateTime) -> LedgerEntry {
        let entry = LedgerEntry::new(kind, amount, timestamp);
        self.history.push(entry.clone());
        entry
    }
}

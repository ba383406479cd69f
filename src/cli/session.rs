//! Interactive ATM session
//!
//! The session controller owns nothing: it borrows the account directory and
//! the store from the caller and drives the login / account creation /
//! transaction menu flow over a [`Console`].
//!
//! Every successful balance change is saved to the store immediately and
//! recorded in the session's [`TransactionRecorder`], which is exported after
//! each menu action and once more when the customer leaves.

use crate::cli::console::Console;
use crate::core::queue::{TellerQueue, YOUR_TURN};
use crate::core::{AccountDirectory, LedgerStore, TransactionRecorder};
use crate::io::csv_format::parse_decimal;
use crate::types::{is_valid_pin, AccountNumber, LedgerEntry, LedgerError};
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// PIN attempts allowed per login
pub const MAX_PIN_ATTEMPTS: usize = 3;

/// Runtime settings for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause after each queue position announcement
    pub queue_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            queue_delay: Duration::from_secs(3),
        }
    }
}

/// Result of one pass through the login prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Existing account, PIN verified
    Authenticated(AccountNumber),
    /// Unknown number, customer opened a new account
    Created(AccountNumber),
    /// Wrong PIN too many times
    LockedOut,
    /// Unknown number, customer declined to open an account
    Declined,
    /// Input ended
    Closed,
}

/// How the transaction menu was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// Customer chose Exit
    Finished,
    /// Input ended mid-session
    Closed,
}

/// Menu options, numbered as shown to the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Withdraw,
    Deposit,
    CheckBalance,
    Transfer,
    MiniStatement,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Withdraw),
            "2" => Some(MenuChoice::Deposit),
            "3" => Some(MenuChoice::CheckBalance),
            "4" => Some(MenuChoice::Transfer),
            "5" => Some(MenuChoice::MiniStatement),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\nTransaction Menu:\n\
                    1. Withdraw\n\
                    2. Deposit\n\
                    3. Check Balance\n\
                    4. Transfer\n\
                    5. Mini Statement\n\
                    6. Exit";

/// Parse a customer-entered amount
///
/// # Errors
///
/// - `InvalidAmount` if the input is not a number or not positive
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    parse_decimal(input)
        .filter(|amount| *amount > Decimal::ZERO)
        .ok_or_else(|| LedgerError::invalid_amount(input.trim()))
}

/// Drives logins and transaction menus against a borrowed directory
pub struct SessionController<'a, S, R, W, G>
where
    S: LedgerStore + ?Sized,
{
    directory: &'a mut AccountDirectory,
    store: &'a S,
    console: Console<R, W>,
    config: SessionConfig,
    rng: G,
}

impl<'a, S, R, W, G> SessionController<'a, S, R, W, G>
where
    S: LedgerStore + ?Sized,
    R: BufRead,
    W: Write,
    G: Rng,
{
    pub fn new(
        directory: &'a mut AccountDirectory,
        store: &'a S,
        console: Console<R, W>,
        config: SessionConfig,
        rng: G,
    ) -> Self {
        SessionController {
            directory,
            store,
            console,
            config,
            rng,
        }
    }

    /// Serve customers until the input ends
    ///
    /// # Errors
    ///
    /// Only console I/O failures end the loop with an error; ledger errors
    /// are reported to the customer and the session carries on.
    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            self.console.say("\nWelcome to the ATM System!")?;
            let account_number = match self.login()? {
                LoginOutcome::Authenticated(number) | LoginOutcome::Created(number) => number,
                LoginOutcome::LockedOut | LoginOutcome::Declined => continue,
                LoginOutcome::Closed => return Ok(()),
            };

            if self.transaction_menu(&account_number)? == MenuExit::Closed {
                return Ok(());
            }
        }
    }

    /// Ask for an account number and authenticate, or offer a new account
    pub fn login(&mut self) -> Result<LoginOutcome, LedgerError> {
        let Some(account_number) = self.console.prompt("Enter your account number: ")? else {
            return Ok(LoginOutcome::Closed);
        };

        if !self.directory.contains(&account_number) {
            let Some(answer) = self
                .console
                .prompt("Account not found! Would you like to create a new account? (yes/no): ")?
            else {
                return Ok(LoginOutcome::Closed);
            };

            if answer.eq_ignore_ascii_case("yes") {
                return self.create_account();
            }
            self.console.say("Exiting...")?;
            return Ok(LoginOutcome::Declined);
        }

        for attempt in 1..=MAX_PIN_ATTEMPTS {
            let Some(pin) = self.console.prompt("Enter your PIN: ")? else {
                return Ok(LoginOutcome::Closed);
            };

            if self.directory.authenticate(&account_number, &pin)? {
                self.console.say("PIN verified!")?;
                info!(account = %account_number, "login succeeded");
                return Ok(LoginOutcome::Authenticated(account_number));
            }

            self.console.say(format!(
                "Incorrect PIN! You have {} attempts left.",
                MAX_PIN_ATTEMPTS - attempt
            ))?;
        }

        warn!(account = %account_number, "login locked out after repeated PIN failures");
        self.console.say("Too many incorrect attempts. Exiting...")?;
        Ok(LoginOutcome::LockedOut)
    }

    /// Open a new account from console input
    fn create_account(&mut self) -> Result<LoginOutcome, LedgerError> {
        let Some(name) = self.console.prompt("Enter your name: ")? else {
            return Ok(LoginOutcome::Closed);
        };

        let pin = loop {
            let Some(pin) = self.console.prompt("Set a 4-digit PIN: ")? else {
                return Ok(LoginOutcome::Closed);
            };
            if is_valid_pin(&pin) {
                break pin;
            }
            self.console.say(LedgerError::InvalidPin)?;
        };

        let account_number = match self.directory.create_account(&name, &pin) {
            Ok(account) => account.account_number().to_string(),
            Err(e) => {
                error!(error = %e, "account creation failed");
                self.console.say(format!("Could not create account: {}", e))?;
                return Ok(LoginOutcome::Declined);
            }
        };
        self.save_directory()?;

        self.console.say(format!(
            "Account created successfully! Your account number is {}.",
            account_number
        ))?;
        Ok(LoginOutcome::Created(account_number))
    }

    /// Queue the customer, then serve the menu until Exit or end of input
    pub fn transaction_menu(&mut self, account_number: &str) -> Result<MenuExit, LedgerError> {
        let mut recorder = TransactionRecorder::new();
        self.announce_queue(account_number)?;

        loop {
            self.console.say(MENU)?;
            let Some(choice) = self.console.prompt("Choose an option: ")? else {
                self.finish(account_number, &recorder)?;
                return Ok(MenuExit::Closed);
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Withdraw) => {
                    if let Some(amount) = self.prompt_amount("Enter amount to withdraw: ")? {
                        let result = self.directory.withdraw(account_number, amount);
                        self.apply(result, "Withdrawal", account_number, &mut recorder)?;
                    }
                }
                Some(MenuChoice::Deposit) => {
                    if let Some(amount) = self.prompt_amount("Enter amount to deposit: ")? {
                        let result = self.directory.deposit(account_number, amount);
                        self.apply(result, "Deposit", account_number, &mut recorder)?;
                    }
                }
                Some(MenuChoice::CheckBalance) => {
                    let balance = self.balance_of(account_number)?;
                    self.console.say(format!("Current balance: {}", balance))?;
                }
                Some(MenuChoice::Transfer) => self.transfer(account_number, &mut recorder)?,
                Some(MenuChoice::MiniStatement) => self.mini_statement(account_number)?,
                Some(MenuChoice::Exit) => {
                    self.console.say("Exiting...")?;
                    self.finish(account_number, &recorder)?;
                    return Ok(MenuExit::Finished);
                }
                None => self.console.say("Invalid option. Please try again.")?,
            }

            self.export(account_number, &recorder);
        }
    }

    fn announce_queue(&mut self, account_number: &str) -> Result<(), LedgerError> {
        let accounts = self.directory.account_numbers();
        let mut queue = TellerQueue::for_user(account_number, &accounts, &mut self.rng);

        while let Some(announcement) = queue.advance() {
            self.console.say(announcement)?;
            if !self.config.queue_delay.is_zero() {
                thread::sleep(self.config.queue_delay);
            }
        }
        self.console.say(YOUR_TURN)?;
        Ok(())
    }

    /// Read an amount; `None` when it was rejected or input ended
    fn prompt_amount(&mut self, message: &str) -> Result<Option<Decimal>, LedgerError> {
        let Some(raw) = self.console.prompt(message)? else {
            return Ok(None);
        };

        match parse_amount(&raw) {
            Ok(amount) => Ok(Some(amount)),
            Err(e) => {
                self.console.say(e)?;
                Ok(None)
            }
        }
    }

    fn transfer(
        &mut self,
        account_number: &str,
        recorder: &mut TransactionRecorder,
    ) -> Result<(), LedgerError> {
        let Some(target) = self
            .console
            .prompt("Enter target account number for transfer: ")?
        else {
            return Ok(());
        };

        if target == account_number {
            self.console.say("You cannot transfer to the same account.")?;
            return Ok(());
        }
        if !self.directory.contains(&target) {
            self.console.say("Account not found!")?;
            return Ok(());
        }

        if let Some(amount) = self.prompt_amount("Enter amount to transfer: ")? {
            let result = self.directory.transfer(account_number, &target, amount);
            self.apply(result, "Transfer", account_number, recorder)?;
        }
        Ok(())
    }

    /// Report the outcome of a balance change and persist it on success
    fn apply(
        &mut self,
        result: Result<LedgerEntry, LedgerError>,
        label: &str,
        account_number: &str,
        recorder: &mut TransactionRecorder,
    ) -> Result<(), LedgerError> {
        match result {
            Ok(entry) => {
                recorder.record(entry);
                let balance = self.balance_of(account_number)?;
                self.console
                    .say(format!("{} successful! New balance: {}", label, balance))?;
                self.save_directory()?;
            }
            Err(LedgerError::InsufficientFunds { .. }) => {
                info!(account = account_number, operation = label, "rejected: insufficient funds");
                self.console.say("Insufficient balance!")?;
            }
            Err(e) => {
                info!(account = account_number, operation = label, error = %e, "rejected");
                self.console.say(e)?;
            }
        }
        Ok(())
    }

    fn mini_statement(&mut self, account_number: &str) -> Result<(), LedgerError> {
        let lines: Vec<String> = self
            .directory
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))?
            .history()
            .iter()
            .map(ToString::to_string)
            .collect();

        self.console.say("Transaction History:")?;
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn balance_of(&self, account_number: &str) -> Result<Decimal, LedgerError> {
        self.directory
            .get(account_number)
            .map(|account| account.balance())
            .ok_or_else(|| LedgerError::account_not_found(account_number))
    }

    /// Print the receipt and export the session one last time
    fn finish(
        &mut self,
        account_number: &str,
        recorder: &TransactionRecorder,
    ) -> Result<(), LedgerError> {
        self.console.say(recorder.render_receipt())?;
        self.export(account_number, recorder);
        info!(
            account = account_number,
            transactions = recorder.len(),
            "session ended"
        );
        Ok(())
    }

    fn export(&self, account_number: &str, recorder: &TransactionRecorder) {
        if let Err(e) = recorder.export_to_storage(self.store, account_number) {
            error!(account = account_number, error = %e, "failed to export session history");
        }
    }

    fn save_directory(&mut self) -> Result<(), LedgerError> {
        if let Err(e) = self.directory.save(self.store) {
            error!(error = %e, "failed to save accounts");
            self.console
                .say(format!("Warning: changes could not be saved ({})", e))?;
        }
        Ok(())
    }

    /// Give back the console, e.g. to inspect scripted output
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

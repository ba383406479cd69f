//! Simulated teller queue
//!
//! Before the transaction menu opens, the logged-in customer is placed at
//! the back of a queue of other customers drawn at random from the
//! directory, and the remaining positions are announced one by one.

use crate::types::AccountNumber;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Announcement printed once the customer reaches the counter
pub const YOUR_TURN: &str = "Your turn!";

/// FIFO queue of account numbers waiting for the teller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TellerQueue {
    items: VecDeque<AccountNumber>,
}

impl TellerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the queue for `user` from the known account numbers
    ///
    /// With `n` known accounts (`n > 1`) between `1` and `n - 1` accounts are
    /// drawn; the user is removed from the draw, the rest are shuffled and
    /// the user is appended last.
    pub fn for_user<R: Rng>(user: &str, accounts: &[AccountNumber], rng: &mut R) -> Self {
        let draw = if accounts.len() > 1 {
            rng.gen_range(1..accounts.len())
        } else {
            0
        };

        let mut ahead: Vec<AccountNumber> = accounts
            .choose_multiple(rng, draw)
            .filter(|number| number.as_str() != user)
            .cloned()
            .collect();
        ahead.shuffle(rng);

        let mut queue = Self::new();
        for number in ahead {
            queue.enqueue(number);
        }
        queue.enqueue(user.to_string());
        queue
    }

    pub fn enqueue(&mut self, account_number: AccountNumber) {
        self.items.push_back(account_number);
    }

    pub fn dequeue(&mut self) -> Option<AccountNumber> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Announce the current position of the last customer and serve the front
    ///
    /// Called repeatedly, a queue of length `L` announces positions `L` down
    /// to `2`. Returns `None` once only one customer is left; that customer
    /// is served next and gets [`YOUR_TURN`] instead.
    pub fn advance(&mut self) -> Option<String> {
        if self.items.len() < 2 {
            return None;
        }

        let announcement = format!("You are in queue position {}", self.items.len());
        self.dequeue();
        Some(announcement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn numbers(count: u64) -> Vec<AccountNumber> {
        (0..count).map(|i| (10_000_000 + i).to_string()).collect()
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = TellerQueue::new();
        queue.enqueue("a".to_string());
        queue.enqueue("b".to_string());

        assert_eq!(queue.dequeue().as_deref(), Some("a"));
        assert_eq!(queue.dequeue().as_deref(), Some("b"));
        assert!(queue.dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_account_queue_holds_only_user() {
        let mut rng = StdRng::seed_from_u64(7);
        let queue = TellerQueue::for_user("10000000", &numbers(1), &mut rng);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.clone().advance(), None);
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(20)]
    fn test_user_is_last_and_not_duplicated(#[case] count: u64) {
        let accounts = numbers(count);
        let user = accounts[0].clone();

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut queue = TellerQueue::for_user(&user, &accounts, &mut rng);
            assert!(queue.len() <= accounts.len());

            let items: Vec<AccountNumber> = std::iter::from_fn(|| queue.dequeue()).collect();
            assert_eq!(items.last(), Some(&user));
            assert_eq!(items.iter().filter(|n| **n == user).count(), 1);
        }
    }

    #[test]
    fn test_advance_counts_down_to_the_last_customer() {
        let mut queue = TellerQueue::new();
        for number in numbers(3) {
            queue.enqueue(number);
        }

        let announcements: Vec<String> = std::iter::from_fn(|| queue.advance()).collect();

        assert_eq!(
            announcements,
            vec![
                "You are in queue position 3".to_string(),
                "You are in queue position 2".to_string(),
            ]
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue().as_deref(), Some("10000002"));
    }
}

//! Currency ledger and unlockable rewards.
//!
//! The balance is a single non-negative integer per profile. Spends that
//! exceed it fail cleanly with no mutation; every movement is recorded for
//! audit with its source.

pub mod shop;

pub use shop::{ItemKind, ShopItem, find_item, shop_catalog};

use error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;
use theme::Theme;

/// One audited currency movement. Positive amounts are credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: i64,
    pub source: String,
    pub timestamp: SystemTime,
}

/// An owned character or cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub id: String,
    pub kind: ItemKind,
    pub theme: Option<Theme>,
    pub name: String,
    pub equipped: bool,
    pub acquired_at: SystemTime,
    pub price_paid: u64,
}

/// Currency balance plus the items bought with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ledger {
    balance: u64,
    transactions: Vec<Transaction>,
    owned: BTreeMap<String, OwnedItem>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn owned_items(&self) -> impl Iterator<Item = &OwnedItem> {
        self.owned.values()
    }

    pub fn owns(&self, item_id: &str) -> bool {
        // Zero-price catalog entries are owned from first run.
        self.owned.contains_key(item_id)
            || find_item(item_id).is_some_and(|item| item.price == 0)
    }

    /// Credit the balance. The source is recorded for audit and has no
    /// numeric effect. Negative credits are unrepresentable by type.
    pub fn add_currency(&mut self, amount: u64, source: &str, now: SystemTime) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.transactions.push(Transaction {
            amount: amount as i64,
            source: source.to_string(),
            timestamp: now,
        });
        self.balance
    }

    /// Debit the balance. Fails with [`EngineError::InsufficientFunds`] and
    /// no mutation when the amount exceeds the balance.
    pub fn spend_currency(
        &mut self,
        amount: u64,
        item_id: &str,
        now: SystemTime,
    ) -> Result<u64, EngineError> {
        if amount > self.balance {
            return Err(EngineError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        self.transactions.push(Transaction {
            amount: -(amount as i64),
            source: format!("spend:{item_id}"),
            timestamp: now,
        });
        Ok(self.balance)
    }

    /// Wrong-answer currency loss: deducts at most the available balance
    /// and nothing at all when the balance is already empty.
    pub fn apply_penalty(&mut self, amount: u64, now: SystemTime) -> u64 {
        if self.balance == 0 || amount == 0 {
            return 0;
        }
        let deducted = amount.min(self.balance);
        self.balance -= deducted;
        self.transactions.push(Transaction {
            amount: -(deducted as i64),
            source: "penalty:wrong_answer".to_string(),
            timestamp: now,
        });
        deducted
    }

    /// Full purchase flow: validates the item exists and is not yet owned,
    /// deducts its price and marks it owned.
    pub fn unlock_item(&mut self, item_id: &str, now: SystemTime) -> Result<&OwnedItem, EngineError> {
        let item = find_item(item_id)
            .ok_or_else(|| EngineError::NotFound(format!("shop item {item_id}")))?;
        if self.owns(item_id) {
            return Err(EngineError::Validation(format!(
                "item {item_id} already owned"
            )));
        }
        self.spend_currency(item.price, item_id, now)?;
        let owned = OwnedItem {
            id: item.id.to_string(),
            kind: item.kind,
            theme: item.theme,
            name: item.name.to_string(),
            equipped: false,
            acquired_at: now,
            price_paid: item.price,
        };
        Ok(self.owned.entry(item.id.to_string()).or_insert(owned))
    }

    /// Equip an owned item; fails on unknown or unowned ids. Zero-price
    /// catalog entries count as owned and materialize on first equip.
    pub fn equip_item(&mut self, item_id: &str, now: SystemTime) -> Result<(), EngineError> {
        if !self.owned.contains_key(item_id) {
            if let Some(item) = find_item(item_id).filter(|item| item.price == 0) {
                self.owned.insert(
                    item.id.to_string(),
                    OwnedItem {
                        id: item.id.to_string(),
                        kind: item.kind,
                        theme: item.theme,
                        name: item.name.to_string(),
                        equipped: false,
                        acquired_at: now,
                        price_paid: 0,
                    },
                );
            }
        }
        match self.owned.get_mut(item_id) {
            Some(item) => {
                item.equipped = true;
                Ok(())
            }
            None => Err(EngineError::NotFound(format!("owned item {item_id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    #[test]
    fn add_increases_balance_by_exactly_amount() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.add_currency(25, "achievement:cards_100", now()), 25);
        assert_eq!(ledger.add_currency(0, "level:mario_level_1", now()), 25);
        assert_eq!(ledger.balance(), 25);
        assert_eq!(ledger.transactions().len(), 2);
    }

    #[test]
    fn overspend_fails_and_leaves_balance_unchanged() {
        let mut ledger = Ledger::new();
        ledger.add_currency(10, "seed", now());

        let err = ledger.spend_currency(11, "char_luigi", now()).unwrap_err();
        match err {
            EngineError::InsufficientFunds { balance, requested } => {
                assert_eq!(balance, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(ledger.balance(), 10);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn penalty_never_drives_balance_negative() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.apply_penalty(5, now()), 0);

        ledger.add_currency(3, "seed", now());
        assert_eq!(ledger.apply_penalty(5, now()), 3);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn unlock_item_deducts_and_marks_owned() {
        let mut ledger = Ledger::new();
        ledger.add_currency(150, "seed", now());

        let item = ledger.unlock_item("char_luigi", now()).expect("unlock");
        assert_eq!(item.price_paid, 100);
        assert_eq!(ledger.balance(), 50);
        assert!(ledger.owns("char_luigi"));

        // Second purchase of the same item is rejected outright.
        assert!(ledger.unlock_item("char_luigi", now()).is_err());
        assert_eq!(ledger.balance(), 50);
    }

    #[test]
    fn default_characters_are_owned_without_purchase() {
        let ledger = Ledger::new();
        assert!(ledger.owns("char_mario"));
        assert!(ledger.owns("char_link"));
        assert!(!ledger.owns("char_luigi"));
    }

    #[test]
    fn starter_characters_equip_without_a_purchase() {
        let mut ledger = Ledger::new();
        ledger.equip_item("char_mario", now()).expect("equip");

        let item = ledger
            .owned_items()
            .find(|i| i.id == "char_mario")
            .expect("materialized");
        assert!(item.equipped);
        assert_eq!(item.price_paid, 0);

        // Paid items still require an actual purchase first.
        assert!(matches!(
            ledger.equip_item("char_luigi", now()),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_item_is_not_found() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.unlock_item("char_waluigi", now()),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn ledger_roundtrips_through_json() {
        let mut ledger = Ledger::new();
        ledger.add_currency(500, "seed", now());
        ledger.unlock_item("char_toad", now()).expect("unlock");

        let json = serde_json::to_string(&ledger).expect("serialize");
        let back: Ledger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(ledger, back);
    }
}

mod common;

use anyhow::Result;
use bankbook::application::{Ledger, LedgerConfig, LedgerError};
use bankbook::domain::Iban;
use common::amount;
use rust_decimal::Decimal;

#[test]
fn test_single_account_earns_interest() -> Result<()> {
    let mut ledger = Ledger::new();

    let customer = ledger.add_customer("x", "x");
    assert_eq!(customer.id(), 0);

    let iban = ledger.add_account_number(&customer, 7830770891, amount(500))?;
    assert_eq!(ledger.get_balance(&iban)?, amount(500));

    ledger.apply_interest()?;
    assert_eq!(ledger.get_balance(&iban)?, amount(525));

    Ok(())
}

#[test]
fn test_interest_applies_to_every_account() -> Result<()> {
    let mut ledger = Ledger::new();
    let customer = ledger.add_customer("x", "x");
    let a = ledger.add_account_number(&customer, 1, amount(1000))?;
    let b = ledger.add_account_number(&customer, 2, amount(200))?;

    ledger.apply_interest()?;

    assert_eq!(ledger.get_balance(&a)?, amount(1050));
    assert_eq!(ledger.get_balance(&b)?, amount(210));
    Ok(())
}

#[test]
fn test_interest_rate_comes_from_config() -> Result<()> {
    let config = LedgerConfig::default().with_interest_rate(Decimal::new(1, 1));
    let mut ledger = Ledger::with_config(config)?;
    assert_eq!(ledger.interest_rate(), Decimal::new(1, 1));

    let customer = ledger.add_customer("x", "x");
    let iban = ledger.add_account_number(&customer, 1, amount(300))?;
    assert_eq!(ledger.get_account(&iban)?.interest_rate(), Decimal::new(1, 1));

    ledger.apply_interest()?;
    assert_eq!(ledger.get_balance(&iban)?, amount(330));
    Ok(())
}

#[test]
fn test_default_interest_rate() {
    let ledger = Ledger::new();
    assert_eq!(ledger.interest_rate(), Decimal::new(5, 2));
}

#[test]
fn test_account_number_uses_configured_bank() -> Result<()> {
    let config = LedgerConfig {
        country_code: "BE".into(),
        check_digits: 68,
        bank_code: "BBRU".into(),
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::with_config(config)?;
    let customer = ledger.add_customer("x", "x");

    let iban = ledger.add_account_number(&customer, 539007547, amount(10))?;

    assert_eq!(iban, Iban::new("BE", 68, "BBRU", 539007547));
    assert_eq!(iban.to_string(), "BE68BBRU0539007547");
    Ok(())
}

#[test]
fn test_lowercase_bank_codes_still_round_trip() -> Result<()> {
    let config = LedgerConfig {
        country_code: "nl".into(),
        bank_code: "bank".into(),
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::with_config(config)?;
    let customer = ledger.add_customer("x", "x");
    let from = ledger.add_account_number(&customer, 1, amount(100))?;
    let to = ledger.add_account_number(&customer, 2, amount(0))?;

    let printed: Iban = from.to_string().parse()?;
    assert_eq!(printed, from);
    assert_eq!(ledger.get_balance(&printed)?, amount(100));

    let target: Iban = "NL00BANK0000000002".parse()?;
    ledger.transfer_money(&printed, &target, amount(40))?;
    assert_eq!(ledger.get_balance(&to)?, amount(40));
    Ok(())
}

#[test]
fn test_account_for_unregistered_customer_is_rejected() -> Result<()> {
    let mut other = Ledger::new();
    other.add_customer("a", "a");
    let stranger = other.add_customer("Mallory", "M");

    let mut ledger = Ledger::new();
    let local = ledger.add_customer("x", "x");
    let iban = Iban::new("NL", 0, "BANK", 9);

    assert!(matches!(
        ledger.add_account(&stranger, iban.clone(), amount(10)),
        Err(LedgerError::CustomerNotFound(_))
    ));
    assert_eq!(ledger.account_count(), 0);

    // Same id as a local customer, different record.
    let impostor = other.get_customer(0)?.clone();
    assert_eq!(impostor.id(), local.id());
    assert!(ledger.add_account(&impostor, iban.clone(), amount(10)).is_err());
    assert!(matches!(
        ledger.get_balance(&iban),
        Err(LedgerError::UnknownAccount(_))
    ));
    Ok(())
}

#[test]
fn test_equal_ibans_resolve_to_the_same_account() -> Result<()> {
    let mut ledger = Ledger::new();
    let customer = ledger.add_customer("x", "x");
    ledger.add_account(&customer, Iban::new("NL", 0, "BANK", 42), amount(77))?;

    let lookup = Iban::new("NL", 0, "BANK", 42);
    assert_eq!(ledger.get_balance(&lookup)?, amount(77));

    let via_number = ledger.add_account_number(&customer, 42, amount(99))?;
    assert_eq!(via_number, lookup);
    assert_eq!(ledger.account_count(), 1);
    assert_eq!(ledger.get_balance(&lookup)?, amount(99));
    Ok(())
}

#[test]
fn test_add_account_twice_replaces_the_first() -> Result<()> {
    let mut ledger = Ledger::new();
    let first = ledger.add_customer("First", "Owner");
    let second = ledger.add_customer("Second", "Owner");
    let iban = Iban::new("NL", 0, "BANK", 5595284773);

    ledger.add_account(&first, iban.clone(), amount(100))?;
    ledger.add_account(&second, iban.clone(), amount(900))?;

    assert_eq!(ledger.account_count(), 1);
    assert_eq!(ledger.get_balance(&iban)?, amount(900));
    assert_eq!(ledger.get_account(&iban)?.owner(), second.id());
    assert!(ledger.get_accounts_by_customer(&first).is_empty());
    Ok(())
}

#[test]
fn test_balance_of_unknown_account() {
    let ledger = Ledger::new();
    let missing = Iban::new("NL", 0, "BANK", 1);
    assert_eq!(
        ledger.get_balance(&missing),
        Err(LedgerError::UnknownAccount(missing.clone()))
    );
}

#[test]
fn test_get_customer_by_id() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add_customer("Ada", "Lovelace");
    let grace = ledger.add_customer("Grace", "Hopper");

    assert_eq!(ledger.get_customer(1)?, &grace);
    assert!(matches!(
        ledger.get_customer(7),
        Err(LedgerError::CustomerNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_get_customer_by_name_first_match_wins() -> Result<()> {
    let mut ledger = Ledger::new();
    let first = ledger.add_customer("x", "x");
    ledger.add_customer("x", "x");

    assert_eq!(ledger.get_customer_by_name("x", "x")?.id(), first.id());
    assert!(ledger.get_customer_by_name("X", "x").is_err());
    assert!(ledger.get_customer_by_name("x", "y").is_err());
    Ok(())
}

#[test]
fn test_accounts_by_customer() {
    let mut ledger = Ledger::new();
    let alice = ledger.add_customer("Alice", "A");
    let bob = ledger.add_customer("Bob", "B");
    let carol = ledger.add_customer("Carol", "C");

    let a2 = ledger.add_account_number(&alice, 20, amount(1)).unwrap();
    let b1 = ledger.add_account_number(&bob, 10, amount(1)).unwrap();
    let a1 = ledger.add_account_number(&alice, 5, amount(1)).unwrap();

    assert_eq!(ledger.get_accounts_by_customer(&alice), vec![a1, a2]);
    assert_eq!(ledger.get_accounts_by_customer(&bob), vec![b1]);
    assert!(ledger.get_accounts_by_customer(&carol).is_empty());
}

#[test]
fn test_textual_report() {
    let mut ledger = Ledger::new();
    let customer = ledger.add_customer("x", "x");
    ledger
        .add_account_number(&customer, 7830770891, amount(500))
        .unwrap();
    ledger
        .add_account_number(&customer, 5595284773, Decimal::new(33333, 2))
        .unwrap();

    let text = ledger.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "NL00BANK5595284773 owned by customer #0: balance 333.33 - Interest next year: 16.67",
            "NL00BANK7830770891 owned by customer #0: balance 500.00 - Interest next year: 25.00",
        ]
    );
}

#[test]
fn test_empty_ledger_renders_nothing() {
    assert_eq!(Ledger::new().to_string(), "");
}

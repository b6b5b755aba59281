use ledger::{Entry, Group, LedgerError, MoneyCents, Registry, RegistrySnapshot, settle};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn group_abc() -> Group {
    let mut group = Group::new(1);
    for name in ["A", "B", "C"] {
        group.add_account(name).unwrap();
    }
    group
}

fn cents(group: &Group, name: &str) -> i64 {
    group
        .accounts()
        .iter()
        .find(|account| account.name == name)
        .unwrap()
        .balance
        .cents()
}

fn total(group: &Group) -> i64 {
    group.accounts().iter().map(|a| a.balance.cents()).sum()
}

/// Full walkthrough: a shared expense, a transfer, then settle-up.
#[test]
fn expense_transfer_settle_roundtrip() {
    let mut group = group_abc();

    group
        .apply(Entry::shared_expense(
            MoneyCents::new(3000),
            "A",
            &names(&["A", "B", "C"]),
        ))
        .unwrap();
    assert_eq!(cents(&group, "A"), 2000);
    assert_eq!(cents(&group, "B"), -1000);
    assert_eq!(cents(&group, "C"), -1000);

    group
        .apply(Entry::direct_transfer(MoneyCents::new(1000), "B", "C"))
        .unwrap();
    assert_eq!(cents(&group, "B"), -2000);
    assert_eq!(cents(&group, "C"), 0);

    let plan = settle(&group.balances()).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].amount, MoneyCents::new(2000));
    assert_eq!(plan[0].source, "B");
    assert_eq!(plan[0].destination, "A");

    // Applying the plan through the ledger zeroes everything and records
    // the settlement transfers in the history.
    for transfer in &plan {
        group
            .apply(Entry::direct_transfer(
                transfer.amount,
                &transfer.source,
                &transfer.destination,
            ))
            .unwrap();
    }
    for account in group.accounts() {
        assert!(account.balance.is_zero());
    }
    assert_eq!(group.history().len(), 3);
}

#[test]
fn zero_sum_holds_across_arbitrary_sequences() {
    let mut group = group_abc();
    group.add_account("D").unwrap();

    let entries = vec![
        Entry::shared_expense(MoneyCents::new(1999), "A", &names(&["A", "B", "C", "D"])),
        Entry::direct_transfer(MoneyCents::new(750), "B", "A"),
        Entry::shared_expense(MoneyCents::new(100), "C", &names(&["A", "D"])),
        Entry::shared_expense(MoneyCents::new(333), "D", &names(&["D", "B"])),
        Entry::direct_transfer(MoneyCents::new(1), "C", "D"),
    ];

    for entry in entries {
        group.apply(entry).unwrap();
        assert_eq!(total(&group), 0);
    }

    let plan = settle(&group.balances()).unwrap();
    for transfer in plan {
        group
            .apply(Entry::direct_transfer(
                transfer.amount,
                &transfer.source,
                &transfer.destination,
            ))
            .unwrap();
    }
    for account in group.accounts() {
        assert!(account.balance.is_zero());
    }
}

#[test]
fn rejected_entries_do_not_mutate() {
    let mut group = group_abc();
    group
        .apply(Entry::shared_expense(
            MoneyCents::new(600),
            "A",
            &names(&["B", "C"]),
        ))
        .unwrap();
    let before = group.clone();

    let attempts = vec![
        Entry::shared_expense(MoneyCents::new(500), "nobody", &names(&["A"])),
        Entry::shared_expense(MoneyCents::new(500), "A", &names(&["nobody"])),
        Entry::shared_expense(MoneyCents::ZERO, "A", &names(&["B"])),
        Entry::shared_expense(MoneyCents::new(-500), "A", &names(&["B"])),
        Entry::shared_expense(MoneyCents::new(500), "A", &[]),
        Entry::direct_transfer(MoneyCents::new(500), "A", "A"),
        Entry::direct_transfer(MoneyCents::ZERO, "A", "B"),
        Entry::direct_transfer(MoneyCents::new(500), "A", "nobody"),
    ];

    for entry in attempts {
        assert!(group.apply(entry).is_err());
        assert_eq!(group, before);
    }
}

#[test]
fn duplicate_account_fails_without_mutation() {
    let mut group = group_abc();
    assert_eq!(
        group.add_account("A"),
        Err(LedgerError::DuplicateAccount("A".to_string()))
    );
    assert_eq!(group.accounts().len(), 3);
    assert_eq!(total(&group), 0);
}

#[test]
fn registry_snapshot_roundtrips_through_json() {
    let mut registry = Registry::new();

    let (group, existed) = registry.get_or_create(-1001);
    assert!(!existed);
    group.add_account("A").unwrap();
    group.add_account("B").unwrap();
    group
        .apply(Entry::shared_expense(
            MoneyCents::new(901),
            "A",
            &names(&["A", "B"]),
        ))
        .unwrap();

    let (other, _) = registry.get_or_create(55);
    other.add_account("solo").unwrap();

    let json = serde_json::to_string(&RegistrySnapshot::capture(&registry)).unwrap();
    let decoded: RegistrySnapshot = serde_json::from_str(&json).unwrap();
    let restored = decoded.restore().unwrap();

    assert_eq!(restored, registry);
    let group = restored.get(-1001).unwrap();
    assert_eq!(group.accounts()[0].name, "A");
    assert_eq!(group.history().len(), 1);
}

#[test]
fn recreate_is_a_visible_reset() {
    let mut registry = Registry::new();
    registry.get_or_create(9).0.add_account("A").unwrap();

    assert!(registry.recreate(9));
    let (group, existed) = registry.get_or_create(9);
    assert!(existed);
    assert!(group.is_empty());
    assert!(group.history().is_empty());
}

//! End-to-end resolution scenarios from the engine's testable-properties
//! suite: build an overrides document and a discovered snapshot in
//! memory, run the full `resolve::run` pipeline, and check the resolved
//! document shape.

use chrono::Utc;
use ownerd::model::{
    Address, AddressType, Classification, ContractOverrides, DelayRef, DiscoveredEntry,
    DiscoveredSnapshot, Field, FieldValue, FunctionOverride, OverridesDocument, OwnerDefinition,
};
use std::collections::BTreeMap;

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn function(
    name: &str,
    owners: &[&str],
    delay: Option<DelayRef>,
) -> FunctionOverride {
    FunctionOverride {
        function_name: name.to_string(),
        user_classification: Classification::Permissioned,
        checked: None,
        score: None,
        description: None,
        reason: None,
        owner_definitions: owners.iter().map(|p| OwnerDefinition::new(*p)).collect(),
        delay,
        timestamp: Utc::now(),
    }
}

fn overrides_with(contracts: Vec<(Address, Vec<FunctionOverride>)>) -> OverridesDocument {
    let mut map = BTreeMap::new();
    for (address, functions) in contracts {
        map.insert(address, ContractOverrides { functions });
    }
    OverridesDocument { version: "1.0".to_string(), last_modified: Utc::now(), contracts: map }
}

fn entry(address: &Address, ty: AddressType, fields: Vec<(&str, FieldValue)>) -> DiscoveredEntry {
    DiscoveredEntry {
        address: address.clone(),
        address_type: ty,
        name: None,
        fields: fields.into_iter().map(|(n, v)| Field { name: n.to_string(), value: v }).collect(),
        values: None,
    }
}

#[test]
fn scenario_1_trivial_admin() {
    let c = addr("eth:0xC");
    let e1 = addr("eth:0xE1");
    let overrides = overrides_with(vec![(c.clone(), vec![function("changeAdmin", &["$self.admin"], None)])]);
    let snapshot = DiscoveredSnapshot::new(
        vec![entry(&c, AddressType::Contract, vec![("admin", FieldValue::address(e1.clone(), Some(AddressType::Eoa)))])],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&c).unwrap().functions[0];

    assert_eq!(function.direct_owners.len(), 1);
    assert_eq!(function.direct_owners[0].address, "eth:0xE1");
    assert_eq!(function.ultimate_owners.len(), 1);
    let ultimate = &function.ultimate_owners[0];
    assert_eq!(ultimate.address, e1);
    assert_eq!(ultimate.address_type, AddressType::Eoa);
    assert!(ultimate.via.is_empty());
    assert_eq!(ultimate.cumulative_delay, 0);
    assert_eq!(ultimate.cumulative_delay_formatted, "0s");
}

#[test]
fn scenario_2_one_hop_through_timelock_with_delay() {
    let c = addr("eth:0xC");
    let t = addr("eth:0xT");
    let m = addr("eth:0xM");
    let overrides = overrides_with(vec![
        (c.clone(), vec![function("pause", &["$self.timelock"], None)]),
        (
            t.clone(),
            vec![function(
                "execute",
                &["$self.admin"],
                Some(DelayRef { contract_address: t.clone(), field_name: "minDelay".to_string() }),
            )],
        ),
    ]);
    let snapshot = DiscoveredSnapshot::new(
        vec![
            entry(&c, AddressType::Contract, vec![("timelock", FieldValue::address(t.clone(), Some(AddressType::Timelock)))]),
            entry(
                &t,
                AddressType::Timelock,
                vec![
                    ("minDelay", FieldValue::number("86400")),
                    ("admin", FieldValue::address(m.clone(), Some(AddressType::Multisig))),
                ],
            ),
        ],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&c).unwrap().functions[0];

    assert_eq!(function.direct_owners[0].address, "eth:0xT");
    assert_eq!(function.ultimate_owners.len(), 1);
    let ultimate = &function.ultimate_owners[0];
    assert_eq!(ultimate.address, m);
    assert_eq!(ultimate.address_type, AddressType::Multisig);
    assert_eq!(ultimate.via.len(), 1);
    assert_eq!(ultimate.via[0].address, t);
    assert_eq!(ultimate.via[0].address_type, AddressType::Timelock);
    assert_eq!(ultimate.via[0].delay, Some(86_400));
    assert_eq!(ultimate.via[0].delay_formatted.as_deref(), Some("1d"));
    assert_eq!(ultimate.delays, vec![86_400]);
    assert_eq!(ultimate.cumulative_delay, 86_400);
    assert_eq!(ultimate.cumulative_delay_formatted, "1d");
}

#[test]
fn scenario_3_cycle() {
    let a = addr("eth:0xA");
    let b = addr("eth:0xB");
    let overrides = overrides_with(vec![
        (a.clone(), vec![function("setOwner", &["$self.owner"], None)]),
        (b.clone(), vec![function("setOwner", &["$self.owner"], None)]),
    ]);
    let snapshot = DiscoveredSnapshot::new(
        vec![
            entry(&a, AddressType::Contract, vec![("owner", FieldValue::address(b.clone(), Some(AddressType::Contract)))]),
            entry(&b, AddressType::Contract, vec![("owner", FieldValue::address(a.clone(), Some(AddressType::Contract)))]),
        ],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&a).unwrap().functions[0];

    assert!(function.ultimate_owners.is_empty());
    assert_eq!(function.warnings.len(), 1);
    assert!(function.warnings[0].contains("eth:0xA") && function.warnings[0].contains("eth:0xB"));
}

#[test]
fn scenario_4_access_control_role() {
    let c = addr("eth:0xC");
    let e2 = addr("eth:0xE2");
    let e3 = addr("eth:0xE3");
    let overrides = overrides_with(vec![(
        c.clone(),
        vec![function("grantRole", &["$self.accessControl.PAUSER_ROLE.members"], None)],
    )]);

    let access_control = vec![(
        "PAUSER_ROLE".to_string(),
        FieldValue::object(vec![(
            "members".to_string(),
            FieldValue::array(vec![
                FieldValue::address(e2.clone(), Some(AddressType::Eoa)),
                FieldValue::address(e3.clone(), Some(AddressType::Eoa)),
            ]),
        )]),
    )];
    let snapshot = DiscoveredSnapshot::new(
        vec![entry(&c, AddressType::Contract, vec![("accessControl", FieldValue::object(access_control))])],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&c).unwrap().functions[0];

    assert_eq!(function.ultimate_owners.len(), 2);
    assert_eq!(function.ultimate_owners[0].address, e2);
    assert_eq!(function.ultimate_owners[1].address, e3);
    for ultimate in &function.ultimate_owners {
        assert!(ultimate.via.is_empty());
        assert_eq!(ultimate.cumulative_delay, 0);
    }
}

#[test]
fn scenario_5_structured_value_preservation() {
    let c = addr("eth:0xC");
    let e4 = addr("eth:0xE4");
    let overrides = overrides_with(vec![(
        c.clone(),
        vec![function("grantRole", &["$self.accessControl.DEFAULT_ADMIN_ROLE"], None)],
    )]);

    let role_object = vec![
        ("adminRole".to_string(), FieldValue::string("DEFAULT_ADMIN_ROLE")),
        (
            "members".to_string(),
            FieldValue::array(vec![FieldValue::address(e4.clone(), Some(AddressType::Eoa))]),
        ),
    ];
    let access_control = vec![("DEFAULT_ADMIN_ROLE".to_string(), FieldValue::object(role_object.clone()))];
    let snapshot = DiscoveredSnapshot::new(
        vec![entry(&c, AddressType::Contract, vec![("accessControl", FieldValue::object(access_control))])],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&c).unwrap().functions[0];

    assert_eq!(function.ultimate_owners.len(), 1);
    assert_eq!(function.ultimate_owners[0].address, e4);
    assert_eq!(function.direct_owners[0].structured, Some(FieldValue::object(role_object)));
}

#[test]
fn scenario_6_unresolved_path() {
    let c = addr("eth:0xC");
    let e5 = addr("eth:0xE5");
    let overrides = overrides_with(vec![(
        c.clone(),
        vec![function("changeAdmin", &["$self.nonexistent", "$self.admin"], None)],
    )]);
    let snapshot = DiscoveredSnapshot::new(
        vec![entry(&c, AddressType::Contract, vec![("admin", FieldValue::address(e5.clone(), Some(AddressType::Eoa)))])],
        "deadbeefcafebabe".to_string(),
    );

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let function = &doc.contracts.get(&c).unwrap().functions[0];

    assert_eq!(function.direct_owners.len(), 2);
    assert!(!function.direct_owners[0].is_resolved);
    assert!(function.direct_owners[1].is_resolved);
    assert_eq!(function.warnings.len(), 1);
    assert_eq!(function.ultimate_owners.len(), 1);
    assert_eq!(function.ultimate_owners[0].address, e5);
}

#[test]
fn non_permissioned_only_contract_is_omitted_from_resolved_document() {
    let c = addr("eth:0xC");
    let mut function_record = function("read", &["$self.reader"], None);
    function_record.user_classification = Classification::NonPermissioned;
    let overrides = overrides_with(vec![(c.clone(), vec![function_record])]);
    let snapshot = DiscoveredSnapshot::new(vec![], "deadbeefcafebabe".to_string());

    let doc = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    assert!(doc.contracts.is_empty());
}

#[test]
fn determinism_across_runs_with_identical_inputs() {
    let c = addr("eth:0xC");
    let e1 = addr("eth:0xE1");
    let overrides = overrides_with(vec![(c.clone(), vec![function("changeAdmin", &["$self.admin"], None)])]);
    let snapshot = DiscoveredSnapshot::new(
        vec![entry(&c, AddressType::Contract, vec![("admin", FieldValue::address(e1, Some(AddressType::Eoa)))])],
        "deadbeefcafebabe".to_string(),
    );

    let first = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);
    let second = ownerd::resolve::run(&overrides, &snapshot, &snapshot.content_hash);

    assert_eq!(
        serde_json::to_value(&first.contracts).unwrap(),
        serde_json::to_value(&second.contracts).unwrap()
    );
}

#![cfg(feature = "json")]

use anyhow::Result;
use ironpipe::testing::*;
use ironpipe::*;
use serde_json::{Value, json};

#[test]
fn group_json_records_by_field() -> Result<()> {
    let records = sample_employee_records();
    let by_dept: GroupBy<Value, FieldKey> = GroupBy::field("dept");
    let groups = by_dept.apply(records.clone())?;

    let ids: Vec<Vec<u64>> = groups
        .iter()
        .map(|(_, rows)| rows.iter().filter_map(|r| r["id"].as_u64()).collect())
        .collect();
    assert_eq!(ids, vec![vec![1, 3, 5], vec![2, 6], vec![4]]);
    assert_eq!(groups.iter().map(|(_, rows)| rows.len()).sum::<usize>(), records.len());

    let keys: Vec<String> = groups.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["eng", "ops", "sales"]);
    assert_eq!(groups.get(&FieldKey::from("eng")).map(<[Value]>::len), Some(3));
    Ok(())
}

#[test]
fn large_unsigned_ids_get_their_own_groups() -> Result<()> {
    let records = vec![
        json!({"id": u64::MAX}),
        json!({"id": u64::MAX - 1}),
        json!({"id": u64::MAX}),
    ];
    let by_id: GroupBy<Value, FieldKey> = GroupBy::field("id");
    let groups = by_id.apply(records)?;

    assert_eq!(groups.len(), 2);
    let keys: Vec<&FieldKey> = groups.keys().collect();
    assert_eq!(keys, vec![&FieldKey::UInt(u64::MAX), &FieldKey::UInt(u64::MAX - 1)]);
    assert_eq!(groups.get(&FieldKey::UInt(u64::MAX)).map(<[Value]>::len), Some(2));
    Ok(())
}

#[test]
fn integral_floats_group_with_integers() -> Result<()> {
    let records = vec![json!({"qty": 1}), json!({"qty": 1.0}), json!({"qty": 1.5})];
    let by_qty: GroupBy<Value, FieldKey> = GroupBy::field("qty");
    let groups = by_qty.apply(records)?;

    assert_eq!(groups.len(), 2);
    assert_eq!(groups.get(&FieldKey::Int(1)).map(<[Value]>::len), Some(2));
    Ok(())
}

#[test]
fn missing_field_fails_the_grouping() {
    let records = vec![json!({"dept": "eng"}), json!({"name": "nobody"})];
    let by_dept: GroupBy<Value, FieldKey> = GroupBy::field("dept");
    let err = by_dept.apply(records).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TransformError>(),
        Some(&TransformError::MissingField { field: "dept".into() })
    );
}

#[test]
fn sort_then_group_typed_records() -> Result<()> {
    let top_paid = Sort::by_key(|e: &SampleEmployee| e.salary).reversed()
        | GroupBy::new(|e: &SampleEmployee| e.dept.clone());
    let groups = top_paid.apply(sample_employees())?;
    assert_eq!(groups.len(), 3);

    let eng: Vec<&str> = groups
        .get(&"eng".to_string())
        .unwrap_or_default()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    // ties keep input order
    assert_eq!(eng, vec!["ana", "eli", "cy"]);
    Ok(())
}

#[test]
fn groups_serialize_in_first_seen_order() -> Result<()> {
    let groups = GroupBy::new(|e: &SampleEmployee| e.dept.clone()).apply(sample_employees())?;
    let value = serde_json::to_value(&groups)?;
    let names: Vec<&str> = value["ops"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["ben", "fay"]);
    assert_eq!(serde_json::to_string(&groups)?.find("\"eng\""), Some(1));
    Ok(())
}

#[test]
fn flatten_json_arrays() -> Result<()> {
    let input = vec![json!([1, [2, 3]]), json!(4), json!([])];
    let once = Flatten::new().apply(input.clone())?;
    assert_eq!(once, vec![json!(1), json!([2, 3]), json!(4)]);
    let all = Flatten::with_depth(5)?.apply(input)?;
    assert_eq!(all, vec![json!(1), json!(2), json!(3), json!(4)]);
    Ok(())
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chk_core::{format_duration, ErrorValue, FromValue, Kind, Map, Record, Seq, Value};
use chrono::{TimeDelta, TimeZone, Utc};

#[test]
fn kinds_render_like_type_names() {
    assert_eq!(Value::from(vec![1i64, 2]).kind().to_string(), "[]int");
    assert_eq!(Value::from(vec!["a", "b"]).kind().to_string(), "[]string");
    let mut map = BTreeMap::new();
    map.insert("k".to_string(), 1.5f64);
    assert_eq!(Value::from(map).kind().to_string(), "map[string]float64");
    assert_eq!(Value::from(Record::new("point")).kind().to_string(), "point");
    assert_eq!(Value::Nil.kind(), Kind::Nil);
}

#[test]
fn seq_of_infers_common_kind() {
    let homogeneous = Seq::of(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(homogeneous.elem, Kind::Int);
    let mixed = Seq::of(vec![Value::Int(1), Value::from("x")]);
    assert_eq!(mixed.elem, Kind::Any);
    assert_eq!(Seq::of(Vec::new()).elem, Kind::Any);
}

#[test]
fn display_matches_default_rendering() {
    assert_eq!(Value::Nil.to_string(), "<nil>");
    assert_eq!(Value::Float(1.0).to_string(), "1");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Float(1e21).to_string(), "1e+21");
    assert_eq!(Value::Float(1e-7).to_string(), "1e-07");
    assert_eq!(Value::from(vec![1i64, 2, 3]).to_string(), "[1 2 3]");
    let record = Record::new("point").field("x", 1i64).field("y", "up");
    assert_eq!(Value::from(record).to_string(), "{1 up}");
    let named = Record::new("id").with_display("id-7");
    assert_eq!(Value::from(named).to_string(), "id-7");
}

#[test]
fn map_display_orders_keys() {
    let map = Map::from_entries(
        Kind::Int,
        Kind::Str,
        vec![
            (Value::Int(10), Value::from("ten")),
            (Value::Int(9), Value::from("nine")),
        ],
    );
    assert_eq!(Value::from(map).to_string(), "map[9:nine 10:ten]");
}

#[test]
fn map_equality_ignores_insertion_order() {
    let a = Map::from_entries(
        Kind::Str,
        Kind::Int,
        vec![(Value::from("a"), Value::Int(1)), (Value::from("b"), Value::Int(2))],
    );
    let b = Map::from_entries(
        Kind::Str,
        Kind::Int,
        vec![(Value::from("b"), Value::Int(2)), (Value::from("a"), Value::Int(1))],
    );
    assert_eq!(a, b);
    let mut c = b.clone();
    c.insert(Value::from("a"), Value::Int(5));
    assert_eq!(c.len(), 2);
    assert_ne!(a, c);
}

#[test]
fn durations_render_compactly() {
    assert_eq!(format_duration(TimeDelta::zero()), "0s");
    assert_eq!(format_duration(TimeDelta::seconds(90)), "1m30s");
    assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "1.5s");
    assert_eq!(format_duration(TimeDelta::milliseconds(250)), "250ms");
    assert_eq!(format_duration(TimeDelta::microseconds(3)), "3µs");
    assert_eq!(format_duration(TimeDelta::hours(2) + TimeDelta::seconds(5)), "2h0m5s");
    assert_eq!(format_duration(-TimeDelta::seconds(1)), "-1s");
}

#[test]
fn instants_render_as_rfc3339() {
    let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(Value::from(t).to_string(), "2024-03-01T12:00:00Z");
}

#[test]
fn string_form_covers_strings_and_renderable_values() {
    assert_eq!(Value::from("abc").string_form().as_deref(), Some("abc"));
    assert_eq!(
        Value::from(Record::new("id").with_display("id-7"))
            .string_form()
            .as_deref(),
        Some("id-7")
    );
    assert_eq!(
        Value::from(TimeDelta::seconds(2)).string_form().as_deref(),
        Some("2s")
    );
    assert_eq!(Value::Int(3).string_form(), None);
    assert_eq!(Value::from(Record::new("raw")).string_form(), None);
}

#[test]
fn natural_ordering_is_per_kind() {
    assert_eq!(Value::Int(1).natural_cmp(&Value::Int(2)), Some(Ordering::Less));
    assert_eq!(
        Value::from("b").natural_cmp(&Value::from("a")),
        Some(Ordering::Greater)
    );
    assert_eq!(Value::Int(1).natural_cmp(&Value::Uint(1)), None);
    assert_eq!(Value::Float(f64::NAN).natural_cmp(&Value::Float(1.0)), None);
}

#[test]
fn from_value_respects_kinds() {
    assert_eq!(i64::from_value(&Value::Int(42)), Some(42));
    assert_eq!(i64::from_value(&Value::from("x")), None);
    assert_eq!(Option::<i64>::from_value(&Value::Nil), Some(None));
    assert_eq!(i64::from_value(&Value::Nil), None);
    assert_eq!(
        Vec::<String>::from_value(&Value::from(vec!["a", "b"])),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(Vec::<i64>::from_value(&Value::from(vec!["a"])), None);
    assert_eq!(
        Value::from_value(&Value::Nil),
        Some(Value::Nil),
        "Value parameters accept anything"
    );
}

#[test]
fn json_values_convert_to_typed_values() {
    let json = serde_json::json!({"xs": [1, 2, 3], "mixed": [1, "a"], "f": 1.5, "n": null});
    let value = Value::from(json);
    let Value::Map(map) = value else {
        panic!("expected a map");
    };
    assert_eq!(map.key, Kind::Str);
    assert_eq!(map.value, Kind::Any);
    assert_eq!(
        map.get(&Value::from("xs")).map(Value::kind),
        Some(Kind::seq_of(Kind::Int))
    );
    assert_eq!(
        map.get(&Value::from("mixed")).map(Value::kind),
        Some(Kind::seq_of(Kind::Any))
    );
    assert_eq!(map.get(&Value::from("f")), Some(&Value::Float(1.5)));
    assert_eq!(map.get(&Value::from("n")), Some(&Value::Nil));
}

#[test]
fn natural_cmp_orders_mixed_numbers() {
    assert_eq!(Value::Int(1).natural_cmp(&Value::Float(2.5)), Some(Ordering::Less));
    assert_eq!(Value::Float(2.5).natural_cmp(&Value::Uint(2)), Some(Ordering::Greater));
    assert_eq!(Value::Int(-1).natural_cmp(&Value::Uint(0)), Some(Ordering::Less));
    assert_eq!(Value::Uint(u64::MAX).natural_cmp(&Value::Int(i64::MAX)), Some(Ordering::Greater));
    assert_eq!(Value::Int(1).natural_cmp(&Value::from("1")), None);
}

#[test]
fn error_values_capture_standard_errors() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    let captured = ErrorValue::from_error(&io);
    assert_eq!(captured.message(), "config.toml missing");
    assert_eq!(Value::from(captured).kind(), Kind::Error);
}

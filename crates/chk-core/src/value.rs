//! Tagged value model handed to checkers.
//!
//! Hosts pass obtained and expected values as [`Value`]s. Every value knows
//! its [`Kind`], which is what checkers compare when they need the "same
//! type" (sequence element kinds, map key kinds, record names).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Type descriptor for a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// The nil value.
    Nil,
    /// Booleans.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// Floating point numbers.
    Float,
    /// Strings.
    Str,
    /// UTC instants.
    Time,
    /// Signed durations.
    Duration,
    /// Values exposing an error message.
    Error,
    /// Sequences with the given element kind.
    Seq(Box<Kind>),
    /// Mappings with the given key and value kinds.
    Map(Box<Kind>, Box<Kind>),
    /// Named structured values.
    Record(String),
    /// Matches any kind; the element kind of heterogeneous sequences.
    Any,
}

impl Kind {
    /// Sequence kind with the given element kind.
    pub fn seq_of(elem: Kind) -> Self {
        Kind::Seq(Box::new(elem))
    }

    /// Mapping kind with the given key and value kinds.
    pub fn map_of(key: Kind, value: Kind) -> Self {
        Kind::Map(Box::new(key), Box::new(value))
    }

    /// Returns whether a value of kind `other` fits a slot of this kind.
    pub fn admits(&self, other: &Kind) -> bool {
        matches!(self, Kind::Any) || self == other
    }

    /// Returns whether values of this kind have a natural ordering.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int
                | Kind::Uint
                | Kind::Float
                | Kind::Str
                | Kind::Time
                | Kind::Duration
        )
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Nil => f.write_str("nil"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int => f.write_str("int"),
            Kind::Uint => f.write_str("uint"),
            Kind::Float => f.write_str("float64"),
            Kind::Str => f.write_str("string"),
            Kind::Time => f.write_str("time"),
            Kind::Duration => f.write_str("duration"),
            Kind::Error => f.write_str("error"),
            Kind::Seq(elem) => write!(f, "[]{elem}"),
            Kind::Map(key, value) => write!(f, "map[{key}]{value}"),
            Kind::Record(name) => f.write_str(name),
            Kind::Any => f.write_str("any"),
        }
    }
}

/// A value exposing an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    /// Creates an error value with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Captures the rendered message of any standard error.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::new(err.to_string())
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sequence of values sharing an element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    /// Element kind; [`Kind::Any`] for heterogeneous sequences.
    pub elem: Kind,
    /// Items in order.
    pub items: Vec<Value>,
}

impl Seq {
    /// Builds a sequence with an explicit element kind.
    pub fn typed(elem: Kind, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            elem,
            items: items.into_iter().collect(),
        }
    }

    /// Builds a sequence whose element kind is the common kind of its items,
    /// or [`Kind::Any`] when the items disagree or there are none.
    pub fn of(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        let elem = common_kind(&items);
        Self { elem, items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the full kind of the sequence.
    pub fn kind(&self) -> Kind {
        Kind::seq_of(self.elem.clone())
    }
}

/// Mapping from keys to values. Keys are unique under value equality.
#[derive(Debug, Clone)]
pub struct Map {
    /// Key kind.
    pub key: Kind,
    /// Value kind.
    pub value: Kind,
    entries: Vec<(Value, Value)>,
}

impl Map {
    /// Creates an empty mapping with the given key and value kinds.
    pub fn new(key: Kind, value: Kind) -> Self {
        Self {
            key,
            value,
            entries: Vec::new(),
        }
    }

    /// Creates a mapping from key/value pairs; later duplicates win.
    pub fn from_entries(
        key: Kind,
        value: Kind,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Self {
        let mut map = Self::new(key, value);
        for (k, v) in entries {
            map.insert(k, v);
        }
        map
    }

    /// Inserts an entry, replacing the value of an equal key.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up the value stored for `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns the full kind of the mapping.
    pub fn kind(&self) -> Kind {
        Kind::map_of(self.key.clone(), self.value.clone())
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

/// Named structured value with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Type name, used as the record's [`Kind`].
    pub name: String,
    /// Field names and values in declaration order.
    pub fields: Vec<(String, Value)>,
    /// String rendering, when the record type provides one.
    pub display: Option<String>,
}

impl Record {
    /// Creates a record without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            display: None,
        }
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Gives the record a string rendering.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// Dynamically typed value supplied to a checker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value or null reference.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// UTC instant.
    Time(DateTime<Utc>),
    /// Signed duration.
    Duration(TimeDelta),
    /// Error carrying a message.
    Error(ErrorValue),
    /// Typed sequence.
    Seq(Seq),
    /// Typed mapping.
    Map(Map),
    /// Named structured value.
    Record(Record),
}

impl Value {
    /// Shorthand for an error value.
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(ErrorValue::new(message))
    }

    /// Returns the kind of the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Time(_) => Kind::Time,
            Value::Duration(_) => Kind::Duration,
            Value::Error(_) => Kind::Error,
            Value::Seq(seq) => seq.kind(),
            Value::Map(map) => map.kind(),
            Value::Record(record) => Kind::Record(record.name.clone()),
        }
    }

    /// Returns whether the value is nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the string form of the value: strings themselves, records
    /// with a rendering, instants and durations.
    pub fn string_form(&self) -> Option<String> {
        match self {
            Value::Str(text) => Some(text.clone()),
            Value::Record(Record {
                display: Some(display),
                ..
            }) => Some(display.clone()),
            Value::Time(_) | Value::Duration(_) => Some(self.to_string()),
            _ => None,
        }
    }

    /// Compares two values of the same ordered kind. Numbers compare
    /// across integer and floating point kinds.
    pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Uint(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Uint(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            (Value::Duration(a), Value::Duration(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn numeric_key(&self) -> Option<f64> {
        match self {
            Value::Bool(flag) => Some(f64::from(u8::from(*flag))),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            Value::Float(x) => Some(*x),
            Value::Time(t) => Some(t.timestamp_micros() as f64),
            Value::Duration(d) => Some(d.num_milliseconds() as f64),
            _ => None,
        }
    }
}

fn common_kind(items: &[Value]) -> Kind {
    let mut kinds = items.iter().map(Value::kind);
    match kinds.next() {
        Some(first) if kinds.all(|kind| kind == first) => first,
        _ => Kind::Any,
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let abs = value.abs();
    if abs == 0.0 || (1e-4..1e21).contains(&abs) {
        return format!("{value}");
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => scientific,
    }
}

fn fraction(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let decimals = format!("{rem:0>digits$}");
    format!("{whole}.{}", decimals.trim_end_matches('0'))
}

/// Renders a duration as `1h2m3.5s`, `250ms`, `3µs` or `0s`.
pub fn format_duration(duration: TimeDelta) -> String {
    let nanos = duration
        .num_nanoseconds()
        .map(i128::from)
        .unwrap_or_else(|| i128::from(duration.num_milliseconds()) * 1_000_000);
    let sign = if nanos < 0 { "-" } else { "" };
    let n = nanos.unsigned_abs();
    const MICRO: u128 = 1_000;
    const MILLI: u128 = 1_000_000;
    const SECOND: u128 = 1_000_000_000;
    const MINUTE: u128 = 60 * SECOND;
    const HOUR: u128 = 60 * MINUTE;
    let body = match n {
        0 => "0s".to_string(),
        n if n < MICRO => format!("{n}ns"),
        n if n < MILLI => format!("{}µs", fraction(n, MICRO, 3)),
        n if n < SECOND => format!("{}ms", fraction(n, MILLI, 6)),
        n => {
            let hours = n / HOUR;
            let minutes = (n % HOUR) / MINUTE;
            let seconds = fraction(n % MINUTE, SECOND, 9);
            if hours > 0 {
                format!("{hours}h{minutes}m{seconds}s")
            } else if minutes > 0 {
                format!("{minutes}m{seconds}s")
            } else {
                format!("{seconds}s")
            }
        }
    };
    format!("{sign}{body}")
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (idx, item) in items.enumerate() {
        if idx > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("<nil>"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(text) => f.write_str(text),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::Error(err) => f.write_str(err.message()),
            Value::Seq(seq) => {
                f.write_str("[")?;
                write_joined(f, seq.items.iter())?;
                f.write_str("]")
            }
            Value::Map(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by_cached_key(|(key, _)| {
                    let numeric = key.numeric_key();
                    (numeric.is_none(), numeric.map(SortFloat), key.to_string())
                });
                f.write_str("map[")?;
                for (idx, (key, value)) in entries.into_iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => match &record.display {
                Some(display) => f.write_str(display),
                None => {
                    f.write_str("{")?;
                    write_joined(f, record.fields.iter().map(|(_, value)| value))?;
                    f.write_str("}")
                }
            },
        }
    }
}

#[derive(PartialEq)]
struct SortFloat(f64);

impl Eq for SortFloat {}

impl PartialOrd for SortFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Rust types with a statically known [`Kind`].
pub trait Typed {
    /// The kind values of this type convert to.
    fn kind() -> Kind;
}

/// Rust types that can be extracted from a [`Value`] of matching kind.
pub trait FromValue: Typed + Sized {
    /// Converts the value, or returns `None` when its kind does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! scalar_conversions {
    ($($ty:ty => $kind:ident, $variant:ident;)*) => {
        $(
            impl Typed for $ty {
                fn kind() -> Kind {
                    Kind::$kind
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool, Bool;
    i64 => Int, Int;
    u64 => Uint, Uint;
    f64 => Float, Float;
    String => Str, Str;
    DateTime<Utc> => Time, Time;
    TimeDelta => Duration, Duration;
    ErrorValue => Error, Error;
}

impl Typed for &str {
    fn kind() -> Kind {
        Kind::Str
    }
}

impl Typed for i32 {
    fn kind() -> Kind {
        Kind::Int
    }
}

impl Typed for u32 {
    fn kind() -> Kind {
        Kind::Uint
    }
}

impl Typed for Value {
    fn kind() -> Kind {
        Kind::Any
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: Typed> Typed for Option<T> {
    fn kind() -> Kind {
        T::kind()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Nil => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn kind() -> Kind {
        Kind::seq_of(T::kind())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Seq(seq) if T::kind().admits(&seq.elem) => {
                seq.items.iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }
}

impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    fn kind() -> Kind {
        Kind::map_of(K::kind(), V::kind())
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Value::Duration(d)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl From<Seq> for Value {
    fn from(seq: Seq) -> Self {
        Value::Seq(seq)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value> + Typed> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(Seq::typed(T::kind(), items.into_iter().map(Into::into)))
    }
}

impl<K: Into<Value> + Typed, V: Into<Value> + Typed> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(Map::from_entries(
            K::kind(),
            V::kind(),
            map.into_iter().map(|(k, v)| (k.into(), v.into())),
        ))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => {
                if let Some(i) = number.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = number.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(text) => Value::Str(text),
            serde_json::Value::Array(items) => {
                Value::Seq(Seq::of(items.into_iter().map(Value::from)))
            }
            serde_json::Value::Object(object) => {
                let entries: Vec<(Value, Value)> = object
                    .into_iter()
                    .map(|(key, value)| (Value::Str(key), Value::from(value)))
                    .collect();
                let values: Vec<Value> = entries.iter().map(|(_, value)| value.clone()).collect();
                Value::Map(Map::from_entries(Kind::Str, common_kind(&values), entries))
            }
        }
    }
}

//! Value kinds, known values, and deferred handles accepted by configuration fields.
//!
//! Every field declares a [`ValueKind`]. Callers hand the builder an [`Input`], which is either a
//! [`Value`] that is known now or a [`Deferred`] handle that an external system resolves later.
//! Deferred handles declare the kind they will resolve to so they can be checked without being
//! inspected.

// crates.io
use serde::{Serializer, ser::SerializeMap, ser::SerializeSeq};
// self
use crate::{
	_prelude::*,
	config::ResolvedConfiguration,
	id::{DeferredId, SchemaId},
};

/// Error returned when a value kind label cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("Unrecognized value kind `{input}`.")]
pub struct ParseKindError {
	/// Label that failed to parse.
	pub input: String,
}

/// Kinds of scalar values a field or collection element may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
	/// UTF-8 string.
	String,
	/// Boolean flag.
	Bool,
	/// Signed 64-bit integer.
	Int,
}
impl ScalarKind {
	/// Returns a stable label suitable for messages and definitions.
	pub const fn as_str(self) -> &'static str {
		match self {
			ScalarKind::String => "string",
			ScalarKind::Bool => "bool",
			ScalarKind::Int => "int",
		}
	}
}
impl Display for ScalarKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ScalarKind {
	type Err = ParseKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"string" => Ok(ScalarKind::String),
			"bool" => Ok(ScalarKind::Bool),
			"int" => Ok(ScalarKind::Int),
			_ => Err(ParseKindError { input: s.to_owned() }),
		}
	}
}

/// Declared shape of a configuration field.
///
/// Labels round-trip through [`Display`] and [`FromStr`]: `string`, `list<int>`,
/// `map<string>`, `nested<aws-iam:index:Role>`, `nested_list<aws-iam:index:GroupPolicy>`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueKind {
	/// A single scalar.
	Scalar(ScalarKind),
	/// An ordered list of scalars of one kind.
	List(ScalarKind),
	/// A string-keyed mapping of scalars of one kind.
	Map(ScalarKind),
	/// A configuration resolved against the named schema.
	Nested(SchemaId),
	/// A list of configurations resolved against the named schema.
	NestedList(SchemaId),
}
impl ValueKind {
	/// Boolean scalar.
	pub const BOOL: Self = Self::Scalar(ScalarKind::Bool);
	/// Integer scalar.
	pub const INT: Self = Self::Scalar(ScalarKind::Int);
	/// String scalar.
	pub const STRING: Self = Self::Scalar(ScalarKind::String);
	/// List of strings.
	pub const STRING_LIST: Self = Self::List(ScalarKind::String);
	/// Mapping of string to string.
	pub const STRING_MAP: Self = Self::Map(ScalarKind::String);

	/// Returns the scalar kind when this is a plain scalar.
	pub fn scalar(&self) -> Option<ScalarKind> {
		match self {
			ValueKind::Scalar(kind) => Some(*kind),
			_ => None,
		}
	}
}
impl Debug for ValueKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ValueKind({self})")
	}
}
impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ValueKind::Scalar(kind) => f.write_str(kind.as_str()),
			ValueKind::List(kind) => write!(f, "list<{kind}>"),
			ValueKind::Map(kind) => write!(f, "map<{kind}>"),
			ValueKind::Nested(schema) => write!(f, "nested<{schema}>"),
			ValueKind::NestedList(schema) => write!(f, "nested_list<{schema}>"),
		}
	}
}
impl FromStr for ValueKind {
	type Err = ParseKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let fail = || ParseKindError { input: s.to_owned() };
		let Some((outer, rest)) = s.split_once('<') else {
			return s.parse().map(ValueKind::Scalar);
		};
		let inner = rest.strip_suffix('>').ok_or_else(fail)?;

		match outer {
			"list" => inner.parse().map(ValueKind::List).map_err(|_| fail()),
			"map" => inner.parse().map(ValueKind::Map).map_err(|_| fail()),
			"nested" => SchemaId::new(inner).map(ValueKind::Nested).map_err(|_| fail()),
			"nested_list" => SchemaId::new(inner).map(ValueKind::NestedList).map_err(|_| fail()),
			_ => Err(fail()),
		}
	}
}
impl TryFrom<String> for ValueKind {
	type Error = ParseKindError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<ValueKind> for String {
	fn from(value: ValueKind) -> Self {
		value.to_string()
	}
}

/// A known scalar value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
	/// UTF-8 string.
	String(String),
	/// Boolean flag.
	Bool(bool),
	/// Signed 64-bit integer.
	Int(i64),
}
impl Scalar {
	/// Kind of this scalar.
	pub fn kind(&self) -> ScalarKind {
		match self {
			Scalar::String(_) => ScalarKind::String,
			Scalar::Bool(_) => ScalarKind::Bool,
			Scalar::Int(_) => ScalarKind::Int,
		}
	}

	/// JSON form of this scalar.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Scalar::String(s) => serde_json::Value::from(s.as_str()),
			Scalar::Bool(b) => serde_json::Value::from(*b),
			Scalar::Int(i) => serde_json::Value::from(*i),
		}
	}

	fn from_json(kind: ScalarKind, json: &serde_json::Value) -> Option<Self> {
		match (kind, json) {
			(ScalarKind::String, serde_json::Value::String(s)) => Some(Scalar::String(s.clone())),
			(ScalarKind::Bool, serde_json::Value::Bool(b)) => Some(Scalar::Bool(*b)),
			(ScalarKind::Int, serde_json::Value::Number(n)) => n.as_i64().map(Scalar::Int),
			_ => None,
		}
	}
}
impl Serialize for Scalar {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Scalar::String(s) => serializer.serialize_str(s),
			Scalar::Bool(b) => serializer.serialize_bool(*b),
			Scalar::Int(i) => serializer.serialize_i64(*i),
		}
	}
}
impl From<&str> for Scalar {
	fn from(value: &str) -> Self {
		Scalar::String(value.to_owned())
	}
}
impl From<String> for Scalar {
	fn from(value: String) -> Self {
		Scalar::String(value)
	}
}
impl From<bool> for Scalar {
	fn from(value: bool) -> Self {
		Scalar::Bool(value)
	}
}
impl From<i64> for Scalar {
	fn from(value: i64) -> Self {
		Scalar::Int(value)
	}
}
impl From<i32> for Scalar {
	fn from(value: i32) -> Self {
		Scalar::Int(value.into())
	}
}

/// A value that is known at configuration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
	/// A single scalar.
	Scalar(Scalar),
	/// An ordered list of scalars.
	List(Vec<Scalar>),
	/// A string-keyed mapping of scalars.
	Map(BTreeMap<String, Scalar>),
	/// A configuration produced by a nested builder.
	Nested(ResolvedConfiguration),
	/// A list of configurations produced by nested builders.
	NestedList(Vec<ResolvedConfiguration>),
}
impl Value {
	/// Returns `true` if this value has the shape declared by `kind`.
	///
	/// Empty collections conform to any element kind.
	pub fn conforms_to(&self, kind: &ValueKind) -> bool {
		match (self, kind) {
			(Value::Scalar(scalar), ValueKind::Scalar(expected)) => scalar.kind() == *expected,
			(Value::List(items), ValueKind::List(expected)) =>
				items.iter().all(|item| item.kind() == *expected),
			(Value::Map(entries), ValueKind::Map(expected)) =>
				entries.values().all(|item| item.kind() == *expected),
			(Value::Nested(config), ValueKind::Nested(schema)) => config.schema_id() == schema,
			(Value::NestedList(configs), ValueKind::NestedList(schema)) =>
				configs.iter().all(|config| config.schema_id() == schema),
			_ => false,
		}
	}

	/// Describes the shape of this value for error messages.
	pub fn kind_label(&self) -> String {
		fn element<'a, I>(mut items: I) -> String
		where
			I: Iterator<Item = &'a Scalar>,
		{
			items.next().map(|item| item.kind().to_string()).unwrap_or_else(|| "_".into())
		}

		match self {
			Value::Scalar(scalar) => scalar.kind().to_string(),
			Value::List(items) => format!("list<{}>", element(items.iter())),
			Value::Map(entries) => format!("map<{}>", element(entries.values())),
			Value::Nested(config) => format!("nested<{}>", config.schema_id()),
			Value::NestedList(configs) => match configs.first() {
				Some(config) => format!("nested_list<{}>", config.schema_id()),
				None => "nested_list<_>".into(),
			},
		}
	}

	/// Returns the boolean payload, if this is a boolean scalar.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Scalar(Scalar::Bool(b)) => Some(*b),
			_ => None,
		}
	}

	/// Returns the integer payload, if this is an integer scalar.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Scalar(Scalar::Int(i)) => Some(*i),
			_ => None,
		}
	}

	/// Returns the string payload, if this is a string scalar.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Scalar(Scalar::String(s)) => Some(s),
			_ => None,
		}
	}

	/// Returns the nested configuration, if this is a nested value.
	pub fn as_nested(&self) -> Option<&ResolvedConfiguration> {
		match self {
			Value::Nested(config) => Some(config),
			_ => None,
		}
	}

	/// Converts a JSON literal into a value of the given kind.
	///
	/// Returns `None` when the literal does not match the kind. Nested kinds have no literal
	/// form.
	pub fn from_json(kind: &ValueKind, json: &serde_json::Value) -> Option<Self> {
		match kind {
			ValueKind::Scalar(k) => Scalar::from_json(*k, json).map(Value::Scalar),
			ValueKind::List(k) => json
				.as_array()?
				.iter()
				.map(|item| Scalar::from_json(*k, item))
				.collect::<Option<Vec<_>>>()
				.map(Value::List),
			ValueKind::Map(k) => json
				.as_object()?
				.iter()
				.map(|(key, item)| Scalar::from_json(*k, item).map(|s| (key.clone(), s)))
				.collect::<Option<BTreeMap<_, _>>>()
				.map(Value::Map),
			ValueKind::Nested(_) | ValueKind::NestedList(_) => None,
		}
	}

	/// JSON form of this value; nested configurations become objects.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Scalar(scalar) => scalar.to_json(),
			Value::List(items) => items.iter().map(Scalar::to_json).collect(),
			Value::Map(entries) =>
				entries.iter().map(|(key, item)| (key.clone(), item.to_json())).collect(),
			Value::Nested(config) => config.to_json(),
			Value::NestedList(configs) =>
				configs.iter().map(ResolvedConfiguration::to_json).collect(),
		}
	}

	pub(crate) fn collect_deferred<'a>(&'a self, out: &mut Vec<&'a Deferred>) {
		match self {
			Value::Nested(config) => config.collect_deferred(out),
			Value::NestedList(configs) =>
				configs.iter().for_each(|config| config.collect_deferred(out)),
			_ => {},
		}
	}
}
impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Value::Scalar(scalar) => scalar.serialize(serializer),
			Value::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;

				for item in items {
					seq.serialize_element(item)?;
				}

				seq.end()
			},
			Value::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;

				for (key, item) in entries {
					map.serialize_entry(key, item)?;
				}

				map.end()
			},
			Value::Nested(config) => config.serialize(serializer),
			Value::NestedList(configs) => {
				let mut seq = serializer.serialize_seq(Some(configs.len()))?;

				for config in configs {
					seq.serialize_element(config)?;
				}

				seq.end()
			},
		}
	}
}

/// Opaque handle to a value that an external system resolves later.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deferred {
	/// Identifier understood by the resolving system.
	#[serde(rename = "$deferred")]
	pub id: DeferredId,
	/// Kind the value promises to resolve to.
	pub kind: ValueKind,
}
impl Deferred {
	/// Creates a handle for `id` that resolves to a value of `kind`.
	pub fn new(id: DeferredId, kind: ValueKind) -> Self {
		Self { id, kind }
	}
}

/// Value supplied for a field: known now, or deferred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
	/// Value known at configuration time.
	Known(Value),
	/// Value resolved later by an external system.
	Deferred(Deferred),
}
impl Input {
	/// Returns `true` if this input has (or promises) the shape declared by `kind`.
	pub fn conforms_to(&self, kind: &ValueKind) -> bool {
		match self {
			Input::Known(value) => value.conforms_to(kind),
			Input::Deferred(deferred) => deferred.kind == *kind,
		}
	}

	/// Describes the shape of this input for error messages.
	pub fn kind_label(&self) -> String {
		match self {
			Input::Known(value) => value.kind_label(),
			Input::Deferred(deferred) => format!("deferred {}", deferred.kind),
		}
	}

	/// Returns the known value, if any.
	pub fn as_known(&self) -> Option<&Value> {
		match self {
			Input::Known(value) => Some(value),
			Input::Deferred(_) => None,
		}
	}

	/// Returns the deferred handle, if any.
	pub fn as_deferred(&self) -> Option<&Deferred> {
		match self {
			Input::Known(_) => None,
			Input::Deferred(deferred) => Some(deferred),
		}
	}

	/// JSON form of this input; deferred handles render as `{"$deferred": id, "kind": label}`.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Input::Known(value) => value.to_json(),
			Input::Deferred(deferred) => serde_json::json!({
				"$deferred": deferred.id.as_str(),
				"kind": deferred.kind.to_string(),
			}),
		}
	}

	/// Returns `true` if the input is deferred.
	pub fn is_deferred(&self) -> bool {
		matches!(self, Input::Deferred(_))
	}

	pub(crate) fn collect_deferred<'a>(&'a self, out: &mut Vec<&'a Deferred>) {
		match self {
			Input::Known(value) => value.collect_deferred(out),
			Input::Deferred(deferred) => out.push(deferred),
		}
	}
}
impl Serialize for Input {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Input::Known(value) => value.serialize(serializer),
			Input::Deferred(deferred) => deferred.serialize(serializer),
		}
	}
}
impl From<Value> for Input {
	fn from(value: Value) -> Self {
		Input::Known(value)
	}
}
impl From<Deferred> for Input {
	fn from(value: Deferred) -> Self {
		Input::Deferred(value)
	}
}

macro_rules! impl_known_from {
	($($ty:ty => |$v:ident| $body:expr;)+) => {
		$(
			impl From<$ty> for Value {
				fn from($v: $ty) -> Self {
					$body
				}
			}
			impl From<$ty> for Input {
				fn from(value: $ty) -> Self {
					Input::Known(value.into())
				}
			}
		)+
	};
}

impl_known_from! {
	Scalar => |v| Value::Scalar(v);
	&str => |v| Value::Scalar(v.into());
	String => |v| Value::Scalar(v.into());
	bool => |v| Value::Scalar(v.into());
	i64 => |v| Value::Scalar(v.into());
	i32 => |v| Value::Scalar(v.into());
	Vec<&str> => |v| Value::List(v.into_iter().map(Scalar::from).collect());
	Vec<String> => |v| Value::List(v.into_iter().map(Scalar::from).collect());
	Vec<i64> => |v| Value::List(v.into_iter().map(Scalar::from).collect());
	BTreeMap<String, String> => |v| Value::Map(v.into_iter().map(|(k, s)| (k, s.into())).collect());
	HashMap<String, String> => |v| Value::Map(v.into_iter().map(|(k, s)| (k, s.into())).collect());
	ResolvedConfiguration => |v| Value::Nested(v);
	Vec<ResolvedConfiguration> => |v| Value::NestedList(v);
}

impl<const N: usize> From<[&str; N]> for Value {
	fn from(value: [&str; N]) -> Self {
		Value::List(value.into_iter().map(Scalar::from).collect())
	}
}
impl<const N: usize> From<[&str; N]> for Input {
	fn from(value: [&str; N]) -> Self {
		Input::Known(value.into())
	}
}
impl<const N: usize> From<[(&str, &str); N]> for Value {
	fn from(value: [(&str, &str); N]) -> Self {
		Value::Map(value.into_iter().map(|(k, v)| (k.to_owned(), v.into())).collect())
	}
}
impl<const N: usize> From<[(&str, &str); N]> for Input {
	fn from(value: [(&str, &str); N]) -> Self {
		Input::Known(value.into())
	}
}

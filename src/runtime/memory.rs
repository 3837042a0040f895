//! The dynamic value ("memory") every expression evaluates to.
//!
//! `Memory` is a closed tagged union. Scalars are stored inline; arrays sit
//! behind an `Rc` and are copied on first write, so cloning a `Memory` gives an
//! independent logical copy. Objects are shared between every holder, and a
//! `Reference` aliases another binding's storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use super::array::ArrayMemory;
use super::ops;

/// Kind tag of a [`Memory`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Binary,
    Array,
    Object,
    Reference,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Binary => "binary",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Reference => "reference",
        };
        f.write_str(name)
    }
}

/// Instance data of a class object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMemory {
    pub class_name: String,
    pub properties: ArrayMemory,
}

impl ObjectMemory {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), properties: ArrayMemory::new() }
    }
}

/// Result of numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Numeric::Int(n) => n == 0,
            Numeric::Float(f) => f == 0.0,
        }
    }
}

impl From<Numeric> for Memory {
    fn from(n: Numeric) -> Self {
        match n {
            Numeric::Int(i) => Memory::Int(i),
            Numeric::Float(f) => Memory::Float(f),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Memory {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Rc<ArrayMemory>),
    Object(Rc<RefCell<ObjectMemory>>),
    Reference(Rc<RefCell<Memory>>),
}

impl Memory {
    pub const NULL: Memory = Memory::Null;
    pub const TRUE: Memory = Memory::Bool(true);
    pub const FALSE: Memory = Memory::Bool(false);
    pub const EMPTY_STRING: Memory = Memory::String(String::new());

    pub fn bool(value: bool) -> Memory {
        if value { Memory::TRUE } else { Memory::FALSE }
    }

    pub fn new_array() -> Memory {
        Memory::Array(Rc::new(ArrayMemory::new()))
    }

    pub fn object(class_name: impl Into<String>) -> Memory {
        Memory::Object(Rc::new(RefCell::new(ObjectMemory::new(class_name))))
    }

    /// Wrap a value in fresh reference storage.
    pub fn reference(value: Memory) -> Memory {
        Memory::Reference(Rc::new(RefCell::new(value.to_value())))
    }

    /// Run `f` against the value behind any chain of references.
    pub fn with_value<R>(&self, f: impl FnOnce(&Memory) -> R) -> R {
        match self {
            Memory::Reference(cell) => cell.borrow().with_value(f),
            other => f(other),
        }
    }

    /// The dereferenced value. Arrays keep sharing storage until written.
    pub fn to_value(&self) -> Memory {
        self.with_value(Memory::clone)
    }

    /// Kind of this slot; `Reference` for aliases.
    pub fn kind(&self) -> Kind {
        match self {
            Memory::Null => Kind::Null,
            Memory::Bool(_) => Kind::Bool,
            Memory::Int(_) => Kind::Int,
            Memory::Float(_) => Kind::Float,
            Memory::String(_) => Kind::String,
            Memory::Binary(_) => Kind::Binary,
            Memory::Array(_) => Kind::Array,
            Memory::Object(_) => Kind::Object,
            Memory::Reference(_) => Kind::Reference,
        }
    }

    /// Kind of the referenced value.
    pub fn value_kind(&self) -> Kind {
        self.with_value(Memory::kind)
    }

    pub fn is_null(&self) -> bool {
        self.value_kind() == Kind::Null
    }

    pub fn is_array(&self) -> bool {
        self.value_kind() == Kind::Array
    }

    pub fn is_object(&self) -> bool {
        self.value_kind() == Kind::Object
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value_kind(), Kind::String | Kind::Binary)
    }

    pub fn is_number(&self) -> bool {
        matches!(self.value_kind(), Kind::Int | Kind::Float)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Memory::Reference(_))
    }

    /// Number or numeric string.
    pub fn is_numeric(&self) -> bool {
        self.with_value(|v| match v {
            Memory::Int(_) | Memory::Float(_) => true,
            Memory::String(s) => is_numeric_str(s),
            Memory::Binary(b) => is_numeric_str(&String::from_utf8_lossy(b)),
            _ => false,
        })
    }

    pub fn to_boolean(&self) -> bool {
        self.with_value(|v| match v {
            Memory::Null => false,
            Memory::Bool(b) => *b,
            Memory::Int(n) => *n != 0,
            Memory::Float(f) => *f != 0.0,
            Memory::String(s) => !(s.is_empty() || s == "0"),
            Memory::Binary(b) => !(b.is_empty() || b.as_slice() == b"0"),
            Memory::Array(a) => !a.is_empty(),
            Memory::Object(_) => true,
            Memory::Reference(_) => unreachable!("with_value dereferences"),
        })
    }

    /// Total numeric coercion. Arrays count as 0/1 and objects as 1; operators
    /// that must reject them check the kind first.
    pub fn to_numeric(&self) -> Numeric {
        self.with_value(|v| match v {
            Memory::Null => Numeric::Int(0),
            Memory::Bool(b) => Numeric::Int(i64::from(*b)),
            Memory::Int(n) => Numeric::Int(*n),
            Memory::Float(f) => Numeric::Float(*f),
            Memory::String(s) => parse_numeric_prefix(s).map(|(n, _)| n).unwrap_or(Numeric::Int(0)),
            Memory::Binary(b) => parse_numeric_prefix(&String::from_utf8_lossy(b))
                .map(|(n, _)| n)
                .unwrap_or(Numeric::Int(0)),
            Memory::Array(a) => Numeric::Int(i64::from(!a.is_empty())),
            Memory::Object(_) => Numeric::Int(1),
            Memory::Reference(_) => unreachable!("with_value dereferences"),
        })
    }

    pub fn to_integer(&self) -> i64 {
        match self.to_numeric() {
            Numeric::Int(n) => n,
            Numeric::Float(f) => float_to_int(f),
        }
    }

    pub fn to_double(&self) -> f64 {
        self.to_numeric().to_f64()
    }

    pub fn to_binary_string(&self) -> Vec<u8> {
        self.with_value(|v| match v {
            Memory::Binary(b) => b.clone(),
            other => other.to_string().into_bytes(),
        })
    }

    /// Shared handle to the array behind this value, if it is one.
    pub fn to_array(&self) -> Option<Rc<ArrayMemory>> {
        self.with_value(|v| match v {
            Memory::Array(a) => Some(Rc::clone(a)),
            _ => None,
        })
    }

    /// Mutate the array stored in this slot, copying it first if the storage is shared.
    pub fn with_array_mut<R>(&mut self, f: impl FnOnce(&mut ArrayMemory) -> R) -> Option<R> {
        match self {
            Memory::Array(a) => Some(f(Rc::make_mut(a))),
            Memory::Reference(cell) => cell.borrow_mut().with_array_mut(f),
            _ => None,
        }
    }

    /// Store `value` into this slot. Writes through references; the stored
    /// value itself is always dereferenced, so assignment never creates an alias.
    pub fn assign(&mut self, value: Memory) {
        let value = value.to_value();
        match self {
            Memory::Reference(cell) => cell.borrow_mut().assign(value),
            slot => *slot = value,
        }
    }

    /// Turn this slot into shared reference storage (if it isn't already) and
    /// return an alias to it.
    pub fn make_reference(&mut self) -> Memory {
        if let Memory::Reference(cell) = self {
            return Memory::Reference(Rc::clone(cell));
        }
        let inner = std::mem::take(self);
        let cell = Rc::new(RefCell::new(inner));
        *self = Memory::Reference(Rc::clone(&cell));
        Memory::Reference(cell)
    }

    /// Debug rendering in the style of `var_export`.
    pub fn export(&self) -> String {
        self.with_value(|v| match v {
            Memory::Null => "NULL".to_string(),
            Memory::Bool(b) => b.to_string(),
            Memory::Int(n) => n.to_string(),
            Memory::Float(f) => {
                let s = format_float(*f);
                if f.is_finite() && !s.contains(['.', 'E']) { format!("{s}.0") } else { s }
            }
            Memory::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Memory::Binary(b) => format!("b'{}'", String::from_utf8_lossy(b)),
            Memory::Array(a) => {
                let items: Vec<String> = a
                    .iter()
                    .map(|(k, v)| format!("{} => {}", k.to_memory().export(), v.export()))
                    .collect();
                format!("array ({})", items.join(", "))
            }
            Memory::Object(o) => format!("{}::__set_state(...)", o.borrow().class_name),
            Memory::Reference(_) => unreachable!("with_value dereferences"),
        })
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_value(|v| match v {
            Memory::Null => Ok(()),
            Memory::Bool(true) => f.write_str("1"),
            Memory::Bool(false) => Ok(()),
            Memory::Int(n) => write!(f, "{n}"),
            Memory::Float(x) => f.write_str(&format_float(*x)),
            Memory::String(s) => f.write_str(s),
            Memory::Binary(b) => f.write_str(&String::from_utf8_lossy(b)),
            Memory::Array(_) => f.write_str("Array"),
            Memory::Object(_) => f.write_str("Object"),
            Memory::Reference(_) => unreachable!("with_value dereferences"),
        })
    }
}

/// Strict identity (`===`): floats follow IEEE equality, objects compare by instance.
impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        ops::identical(self, other)
    }
}

impl From<bool> for Memory {
    fn from(b: bool) -> Self {
        Memory::bool(b)
    }
}

impl From<i64> for Memory {
    fn from(n: i64) -> Self {
        Memory::Int(n)
    }
}

impl From<f64> for Memory {
    fn from(f: f64) -> Self {
        Memory::Float(f)
    }
}

impl From<&str> for Memory {
    fn from(s: &str) -> Self {
        Memory::String(s.to_string())
    }
}

impl From<String> for Memory {
    fn from(s: String) -> Self {
        Memory::String(s)
    }
}

impl From<Vec<u8>> for Memory {
    fn from(b: Vec<u8>) -> Self {
        Memory::Binary(b)
    }
}

impl From<ArrayMemory> for Memory {
    fn from(a: ArrayMemory) -> Self {
        Memory::Array(Rc::new(a))
    }
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() { f as i64 } else { 0 }
}

/// Parse the longest numeric prefix of `s` (after leading whitespace).
/// Returns the number and whether the whole string (modulo trailing
/// whitespace) was numeric. `None` when no digits lead the string.
pub fn parse_numeric_prefix(s: &str) -> Option<(Numeric, bool)> {
    let trimmed = s.trim_start_matches(is_php_space);
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    let mut is_float = false;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
            is_float = true;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
            is_float = true;
        }
    }

    let text = &trimmed[..end];
    let whole = trimmed[end..].chars().all(is_php_space);
    let number = if is_float {
        Numeric::Float(text.parse::<f64>().ok()?)
    } else {
        match text.parse::<i64>() {
            Ok(n) => Numeric::Int(n),
            Err(_) => Numeric::Float(text.parse::<f64>().ok()?),
        }
    };
    Some((number, whole))
}

/// True when the whole string is a number (surrounding whitespace allowed).
pub fn is_numeric_str(s: &str) -> bool {
    matches!(parse_numeric_prefix(s), Some((_, true)))
}

fn is_php_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Render a float with 14 significant digits, the way scripts print numbers.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }

    let sci = format!("{f:.13e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-5..15).contains(&exp) {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let mantissa = if mantissa.contains('.') { mantissa.to_string() } else { format!("{mantissa}.0") };
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}E{sign}{}", exp.abs());
    }

    let decimals = (13 - exp).max(0) as usize;
    let fixed = format!("{f:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

//! String utilities over [`Memory`].
//!
//! Every argument is coerced through the `Memory` API (`to_string`,
//! `to_integer`, `to_binary_string`), so these functions accept any kind the
//! way script code would pass it. Positions and lengths count characters.
//! Searches that find nothing return `-1`; invalid ranges return `FALSE`.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::runtime::{ArrayMemory, Memory};

/// Characters stripped by `trim` when no list is given.
pub const DEFAULT_TRIM_CHARS: &str = " \t\n\r\0\x0B";

fn chars(value: &Memory) -> Vec<char> {
    value.to_string().chars().collect()
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_all(cs: &[char]) -> Vec<char> {
    cs.iter().map(|c| fold_case(*c)).collect()
}

fn clamp_index(n: i64, len: usize) -> usize {
    usize::try_from(n.max(0)).map_or(len, |n| n.min(len))
}

fn index_of(haystack: &[char], needle: &[char], from: i64) -> i64 {
    let from = clamp_index(from, haystack.len());
    if needle.is_empty() {
        return from as i64;
    }
    if needle.len() > haystack.len() {
        return -1;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()] == *needle)
        .map_or(-1, |i| i as i64)
}

/// Last match starting at or before `from`.
fn last_index_of(haystack: &[char], needle: &[char], from: i64) -> i64 {
    if from < 0 || needle.len() > haystack.len() {
        return -1;
    }
    let last_start = haystack.len() - needle.len();
    let from = clamp_index(from, last_start);
    (0..=from)
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == *needle)
        .map_or(-1, |i| i as i64)
}

pub fn pos(string: &Memory, search: &Memory, from: Option<&Memory>) -> Memory {
    let from = from.map_or(0, Memory::to_integer);
    Memory::Int(index_of(&chars(string), &chars(search), from))
}

pub fn pos_ignore_case(string: &Memory, search: &Memory, from: Option<&Memory>) -> Memory {
    let from = from.map_or(0, Memory::to_integer);
    Memory::Int(index_of(&fold_all(&chars(string)), &fold_all(&chars(search)), from))
}

pub fn last_pos(string: &Memory, search: &Memory, from: Option<&Memory>) -> Memory {
    let haystack = chars(string);
    let from = from.filter(|m| !m.is_null()).map_or(haystack.len() as i64, Memory::to_integer);
    Memory::Int(last_index_of(&haystack, &chars(search), from))
}

pub fn last_pos_ignore_case(string: &Memory, search: &Memory, from: Option<&Memory>) -> Memory {
    let haystack = fold_all(&chars(string));
    let from = from.filter(|m| !m.is_null()).map_or(haystack.len() as i64, Memory::to_integer);
    Memory::Int(last_index_of(&haystack, &fold_all(&chars(search)), from))
}

/// Characters `begin..end`. `FALSE` when the range falls outside the string.
pub fn sub(string: &Memory, begin: &Memory, end: Option<&Memory>) -> Memory {
    let cs = chars(string);
    let len = cs.len() as i64;
    let begin = begin.to_integer();
    let end = match end.filter(|m| !m.is_null()) {
        Some(end) => {
            let end = end.to_integer();
            if end > len {
                return Memory::FALSE;
            }
            end
        }
        None => len,
    };
    if begin > end || begin < 0 || begin > len - 1 {
        return Memory::FALSE;
    }
    Memory::String(cs[begin as usize..end as usize].iter().collect())
}

fn compare_chars(a: &[char], b: &[char]) -> i64 {
    a.iter()
        .zip(b)
        .find(|(x, y)| x != y)
        .map_or(a.len() as i64 - b.len() as i64, |(x, y)| *x as i64 - *y as i64)
}

/// Difference of the first mismatching characters, else of the lengths.
pub fn compare(a: &Memory, b: &Memory) -> Memory {
    Memory::Int(compare_chars(&chars(a), &chars(b)))
}

pub fn compare_ignore_case(a: &Memory, b: &Memory) -> Memory {
    Memory::Int(compare_chars(&fold_all(&chars(a)), &fold_all(&chars(b))))
}

pub fn equals_ignore_case(a: &Memory, b: &Memory) -> Memory {
    Memory::bool(fold_all(&chars(a)) == fold_all(&chars(b)))
}

pub fn starts_with(string: &Memory, prefix: &Memory, offset: Option<&Memory>) -> Memory {
    let (cs, prefix) = (chars(string), chars(prefix));
    let offset = offset.map_or(0, Memory::to_integer);
    let matches = usize::try_from(offset)
        .ok()
        .and_then(|o| cs.get(o..o.checked_add(prefix.len())?))
        .is_some_and(|window| window == prefix.as_slice());
    Memory::bool(matches)
}

pub fn ends_with(string: &Memory, suffix: &Memory) -> Memory {
    Memory::bool(string.to_string().ends_with(&suffix.to_string()))
}

pub fn lower(string: &Memory) -> Memory {
    Memory::String(string.to_string().to_lowercase())
}

pub fn upper(string: &Memory) -> Memory {
    Memory::String(string.to_string().to_uppercase())
}

pub fn length(string: &Memory) -> Memory {
    Memory::Int(string.to_string().chars().count() as i64)
}

pub fn replace(string: &Memory, target: &Memory, replacement: &Memory) -> Memory {
    Memory::String(string.to_string().replace(&target.to_string(), &replacement.to_string()))
}

/// Largest string `repeat` will build, in bytes.
pub const MAX_REPEAT_BYTES: usize = 1 << 28;

/// `FALSE` for a non-positive amount or a result past [`MAX_REPEAT_BYTES`].
pub fn repeat(string: &Memory, amount: &Memory) -> Memory {
    let text = string.to_string();
    let n = match usize::try_from(amount.to_integer()) {
        Ok(n) if n > 0 => n,
        _ => return Memory::FALSE,
    };
    match text.len().checked_mul(n) {
        Some(total) if total <= MAX_REPEAT_BYTES => Memory::String(text.repeat(n)),
        _ => {
            tracing::debug!(bytes = text.len(), amount = n, "repeat result too large");
            Memory::FALSE
        }
    }
}

fn trim_with(string: &Memory, charlist: Option<&Memory>, left: bool, right: bool) -> Memory {
    let list = charlist.map_or_else(|| DEFAULT_TRIM_CHARS.to_string(), Memory::to_string);
    let text = string.to_string();
    let strip = |c: char| list.contains(c);
    let trimmed = match (left, right) {
        (true, true) => text.trim_matches(strip),
        (true, false) => text.trim_start_matches(strip),
        _ => text.trim_end_matches(strip),
    };
    Memory::String(trimmed.to_string())
}

pub fn trim(string: &Memory, charlist: Option<&Memory>) -> Memory {
    trim_with(string, charlist, true, true)
}

pub fn trim_left(string: &Memory, charlist: Option<&Memory>) -> Memory {
    trim_with(string, charlist, true, false)
}

pub fn trim_right(string: &Memory, charlist: Option<&Memory>) -> Memory {
    trim_with(string, charlist, false, true)
}

pub fn reverse(string: &Memory) -> Memory {
    Memory::String(string.to_string().chars().rev().collect())
}

/// The characters of `string` in random order.
pub fn shuffle(string: &Memory) -> Memory {
    shuffle_with(string, &mut rand::thread_rng())
}

pub fn shuffle_with<R: Rng + ?Sized>(string: &Memory, rng: &mut R) -> Memory {
    let mut cs = chars(string);
    cs.shuffle(rng);
    Memory::String(cs.into_iter().collect())
}

/// Split on a literal separator. A positive `limit` caps the number of
/// pieces; the last piece keeps the remainder. An empty separator yields the
/// whole string as the only element.
pub fn split(string: &Memory, separator: &Memory, limit: Option<&Memory>) -> Memory {
    let (text, sep) = (string.to_string(), separator.to_string());
    let limit = limit.map_or(0, Memory::to_integer);
    let pieces: Vec<Memory> = if sep.is_empty() {
        vec![Memory::String(text)]
    } else if let Ok(n) = usize::try_from(limit)
        && n > 0
    {
        text.splitn(n, sep.as_str()).map(Memory::from).collect()
    } else {
        text.split(sep.as_str()).map(Memory::from).collect()
    };
    Memory::from(ArrayMemory::from_values(pieces))
}

/// Join array values with `separator`. When `0 < limit < len` only the first
/// `limit` values are joined. Non-array collections give `FALSE`.
pub fn join(collection: &Memory, separator: &Memory, limit: Option<&Memory>) -> Memory {
    let Some(array) = collection.to_array() else {
        return Memory::FALSE;
    };
    let limit = limit.map_or(0, Memory::to_integer);
    let size = match usize::try_from(limit) {
        Ok(n) if n > 0 && n < array.len() => n,
        _ => array.len(),
    };
    let parts: Vec<String> = array.values().take(size).map(Memory::to_string).collect();
    Memory::String(parts.join(&separator.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Charset {
    Utf8,
    Ascii,
    Latin1,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    fn lookup(name: &str) -> Option<Charset> {
        let normalized = name.trim().to_ascii_uppercase().replace('_', "-");
        match normalized.as_str() {
            "UTF-8" | "UTF8" => Some(Charset::Utf8),
            "US-ASCII" | "ASCII" => Some(Charset::Ascii),
            "ISO-8859-1" | "LATIN1" | "ISO8859-1" => Some(Charset::Latin1),
            "UTF-16" | "UTF-16BE" => Some(Charset::Utf16Be),
            "UTF-16LE" => Some(Charset::Utf16Le),
            _ => None,
        }
    }
}

/// Encode text into bytes. Unmappable characters become `?`; an unknown
/// charset gives `FALSE`.
pub fn encode(string: &Memory, charset: &Memory) -> Memory {
    let Some(charset) = Charset::lookup(&charset.to_string()) else {
        return Memory::FALSE;
    };
    let text = string.to_string();
    let bytes = match charset {
        Charset::Utf8 => text.into_bytes(),
        Charset::Ascii => text.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }).collect(),
        Charset::Latin1 => text.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')).collect(),
        Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    };
    Memory::Binary(bytes)
}

/// Decode bytes into text. Malformed input decodes to U+FFFD; an unknown
/// charset gives `FALSE`.
pub fn decode(bytes: &Memory, charset: &Memory) -> Memory {
    let Some(charset) = Charset::lookup(&charset.to_string()) else {
        return Memory::FALSE;
    };
    let bytes = bytes.to_binary_string();
    let text = match charset {
        Charset::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
        Charset::Ascii => bytes.iter().map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' }).collect(),
        Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        Charset::Utf16Be | Charset::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks(2)
                .map(|pair| match (charset, pair) {
                    (Charset::Utf16Be, [hi, lo]) => u16::from_be_bytes([*hi, *lo]),
                    (_, [lo, hi]) => u16::from_le_bytes([*lo, *hi]),
                    _ => 0xFFFD,
                })
                .collect();
            char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)).collect()
        }
    };
    Memory::String(text)
}

/// True when the string is a whole integer that fits in 64 bits.
pub fn is_number(string: &Memory) -> Memory {
    let text = string.to_string();
    let digits = text.strip_prefix(['-', '+']).unwrap_or(&text);
    let valid = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && text.parse::<i64>().is_ok();
    Memory::bool(valid)
}

//! Encoded sub-structures for multi-item payloads
//!
//! `CreateQuote` and `UpdateQuote` take their line items as a single
//! `lineitems` parameter: a PHP-serialized array keyed `lineitems[0]`,
//! `lineitems[1]`, … whose values are arrays with `desc`, `qty`, `up` and
//! `taxable`, then base64-encoded.
//!
//! ```text
//! a:1:{s:12:"lineitems[0]";a:4:{s:4:"desc";s:4:"Desk";s:3:"qty";i:1;s:2:"up";i:10;s:7:"taxable";b:0;}}
//! ```
//!
//! String lengths are byte lengths, not character counts.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Array key in a serialized PHP array.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpKey {
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

/// Value in the PHP serialization format.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    /// `N;`
    Null,
    /// `b:0;` / `b:1;`
    Bool(bool),
    /// `i:<n>;`
    Int(i64),
    /// `d:<f>;`
    Float(f64),
    /// `s:<len>:"<bytes>";`
    Str(String),
    /// `a:<count>:{<key><value>...}`, order preserved
    Array(Vec<(PhpKey, PhpValue)>),
}

impl PhpValue {
    /// Look up a string-keyed entry of an array.
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        match self {
            PhpValue::Array(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, PhpKey::Str(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            PhpValue::Int(n) => Some(*n as f64),
            PhpValue::Float(f) => Some(*f),
            PhpValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            PhpValue::Bool(b) => Some(*b),
            PhpValue::Int(n) => Some(*n != 0),
            PhpValue::Str(s) => Some(!(s.is_empty() || s == "0")),
            PhpValue::Null => Some(false),
            _ => None,
        }
    }
}

/// Serialize a value in the PHP `serialize()` format.
pub fn serialize(value: &PhpValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &PhpValue) {
    match value {
        PhpValue::Null => out.push_str("N;"),
        PhpValue::Bool(b) => {
            out.push_str(if *b { "b:1;" } else { "b:0;" });
        }
        PhpValue::Int(n) => {
            out.push_str(&format!("i:{n};"));
        }
        PhpValue::Float(f) => {
            out.push_str(&format!("d:{};", format_float(*f)));
        }
        PhpValue::Str(s) => write_str(out, s),
        PhpValue::Array(entries) => {
            out.push_str(&format!("a:{}:{{", entries.len()));
            for (key, value) in entries {
                match key {
                    PhpKey::Int(n) => out.push_str(&format!("i:{n};")),
                    PhpKey::Str(s) => write_str(out, s),
                }
                write_value(out, value);
            }
            out.push('}');
        }
    }
}

fn write_str(out: &mut String, s: &str) {
    out.push_str(&format!("s:{}:\"{}\";", s.len(), s));
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        f.to_string()
    }
}

/// Parse a PHP-serialized value. Trailing input is an error.
pub fn unserialize(input: &str) -> Result<PhpValue> {
    let mut parser = Parser {
        bytes: input.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("trailing characters after value"));
    }
    Ok(value)
}

/// Deepest array nesting accepted by [`unserialize`].
pub const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn error(&self, what: &str) -> Error {
        Error::Encoding(format!("{what} at byte {}", self.pos))
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn read_until(&mut self, end: u8) -> Result<&str> {
        let start = self.pos;
        let offset = self.bytes[start..]
            .iter()
            .position(|b| *b == end)
            .ok_or_else(|| self.error(&format!("missing '{}'", end as char)))?;
        self.pos = start + offset + 1;
        std::str::from_utf8(&self.bytes[start..start + offset])
            .map_err(|_| self.error("invalid UTF-8"))
    }

    fn int(&mut self, end: u8) -> Result<i64> {
        let text = self.read_until(end)?;
        text.parse()
            .map_err(|_| Error::Encoding(format!("invalid integer '{text}'")))
    }

    fn string_body(&mut self) -> Result<String> {
        let len = usize::try_from(self.int(b':')?)
            .map_err(|_| self.error("negative string length"))?;
        self.expect(b'"')?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| self.error("string length exceeds input"))?;
        let text = std::str::from_utf8(&self.bytes[self.pos..end])
            .map_err(|_| self.error("string length splits a character"))?
            .to_string();
        self.pos = end;
        self.expect(b'"')?;
        self.expect(b';')?;
        Ok(text)
    }

    fn tag(&mut self) -> Result<u8> {
        let tag = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(tag)
    }

    fn value(&mut self) -> Result<PhpValue> {
        match self.tag()? {
            b'N' => {
                self.expect(b';')?;
                Ok(PhpValue::Null)
            }
            b'b' => {
                self.expect(b':')?;
                match self.int(b';')? {
                    0 => Ok(PhpValue::Bool(false)),
                    1 => Ok(PhpValue::Bool(true)),
                    _ => Err(self.error("boolean must be 0 or 1")),
                }
            }
            b'i' => {
                self.expect(b':')?;
                Ok(PhpValue::Int(self.int(b';')?))
            }
            b'd' => {
                self.expect(b':')?;
                let text = self.read_until(b';')?;
                let value = match text {
                    "NAN" => f64::NAN,
                    "INF" => f64::INFINITY,
                    "-INF" => f64::NEG_INFINITY,
                    other => other
                        .parse()
                        .map_err(|_| Error::Encoding(format!("invalid float '{other}'")))?,
                };
                Ok(PhpValue::Float(value))
            }
            b's' => {
                self.expect(b':')?;
                Ok(PhpValue::Str(self.string_body()?))
            }
            b'a' => {
                if self.depth >= MAX_DEPTH {
                    return Err(self.error(&format!("arrays nested deeper than {MAX_DEPTH}")));
                }
                self.expect(b':')?;
                let count = usize::try_from(self.int(b':')?)
                    .map_err(|_| self.error("negative array length"))?;
                self.expect(b'{')?;
                let mut entries = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    let key = match self.tag()? {
                        b'i' => {
                            self.expect(b':')?;
                            PhpKey::Int(self.int(b';')?)
                        }
                        b's' => {
                            self.expect(b':')?;
                            PhpKey::Str(self.string_body()?)
                        }
                        _ => return Err(self.error("array key must be int or string")),
                    };
                    self.depth += 1;
                    let value = self.value();
                    self.depth -= 1;
                    entries.push((key, value?));
                }
                self.expect(b'}')?;
                Ok(PhpValue::Array(entries))
            }
            other => Err(self.error(&format!("unknown type tag '{}'", other as char))),
        }
    }
}

/// One quote line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description shown on the quote
    pub desc: String,
    /// Quantity
    pub qty: u32,
    /// Unit price
    pub up: f64,
    /// Whether tax applies
    pub taxable: bool,
}

impl LineItem {
    /// Create an untaxed line item.
    pub fn new(desc: impl Into<String>, qty: u32, unit_price: f64) -> Self {
        Self {
            desc: desc.into(),
            qty,
            up: unit_price,
            taxable: false,
        }
    }

    /// Mark the item as taxable.
    pub fn taxable(mut self, taxable: bool) -> Self {
        self.taxable = taxable;
        self
    }

    fn to_php(&self) -> PhpValue {
        let up = if self.up.fract() == 0.0 && self.up.abs() < i64::MAX as f64 {
            PhpValue::Int(self.up as i64)
        } else {
            PhpValue::Float(self.up)
        };
        PhpValue::Array(vec![
            (PhpKey::Str("desc".into()), PhpValue::Str(self.desc.clone())),
            (PhpKey::Str("qty".into()), PhpValue::Int(i64::from(self.qty))),
            (PhpKey::Str("up".into()), up),
            (PhpKey::Str("taxable".into()), PhpValue::Bool(self.taxable)),
        ])
    }

    fn from_php(value: &PhpValue) -> Result<Self> {
        let field = |name: &str| {
            value
                .get(name)
                .ok_or_else(|| Error::Encoding(format!("line item is missing '{name}'")))
        };

        let desc = match field("desc")? {
            PhpValue::Str(s) => s.clone(),
            other => return Err(Error::Encoding(format!("desc is not a string: {other:?}"))),
        };
        let qty = field("qty")?
            .as_number()
            .filter(|q| q.fract() == 0.0 && *q >= 0.0 && *q <= f64::from(u32::MAX))
            .ok_or_else(|| Error::Encoding("qty is not a whole number".to_string()))?
            as u32;
        let up = field("up")?
            .as_number()
            .ok_or_else(|| Error::Encoding("up is not a number".to_string()))?;
        let taxable = field("taxable")?
            .as_bool()
            .ok_or_else(|| Error::Encoding("taxable is not a boolean".to_string()))?;

        Ok(Self {
            desc,
            qty,
            up,
            taxable,
        })
    }
}

/// Flatten line items into the `lineitems[N]` PHP-serialized form.
pub fn encode_line_items(items: &[LineItem]) -> String {
    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| (PhpKey::Str(format!("lineitems[{i}]")), item.to_php()))
        .collect();
    serialize(&PhpValue::Array(entries))
}

/// Parse the flattened form back into line items, ordered by index.
pub fn decode_line_items(flattened: &str) -> Result<Vec<LineItem>> {
    let PhpValue::Array(entries) = unserialize(flattened)? else {
        return Err(Error::Encoding("line items must be an array".to_string()));
    };

    let mut indexed = entries
        .iter()
        .map(|(key, value)| {
            let index = match key {
                PhpKey::Str(s) => s
                    .strip_prefix("lineitems[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .and_then(|n| n.parse::<usize>().ok()),
                PhpKey::Int(n) => usize::try_from(*n).ok(),
            }
            .ok_or_else(|| Error::Encoding(format!("unexpected line item key {key:?}")))?;
            Ok((index, LineItem::from_php(value)?))
        })
        .collect::<Result<Vec<_>>>()?;

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, item)| item).collect())
}

/// Base64-encode a flattened blob.
pub fn to_base64(flattened: &str) -> String {
    STANDARD.encode(flattened.as_bytes())
}

/// Decode a base64 blob back to its flattened text.
pub fn from_base64(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::Encoding(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("invalid UTF-8: {e}")))
}

/// Encode line items as the value of the `lineitems` parameter.
pub fn line_items_param(items: &[LineItem]) -> String {
    to_base64(&encode_line_items(items))
}

/// Decode a `lineitems` parameter value.
pub fn parse_line_items_param(encoded: &str) -> Result<Vec<LineItem>> {
    decode_line_items(&from_base64(encoded)?)
}

//! Forward-only token reader over a JSON description.
//!
//! `JsonReader` walks an already-parsed `serde_json::Value` as a pull stream:
//! callers `peek` at the next token shape, open and close objects/arrays, read
//! names and scalars, and `skip_value` anything they do not recognise. There is
//! no backtracking; every call either consumes tokens or fails.

use std::collections::VecDeque;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::StreamError;

/// Shape of the next token in the stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonToken {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Name,
    String,
    Number,
    Bool,
    Null,
    EndDocument,
}

impl JsonToken {
    fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => JsonToken::Null,
            JsonValue::Bool(_) => JsonToken::Bool,
            JsonValue::Number(_) => JsonToken::Number,
            JsonValue::String(_) => JsonToken::String,
            JsonValue::Array(_) => JsonToken::BeginArray,
            JsonValue::Object(_) => JsonToken::BeginObject,
        }
    }
}

#[derive(Debug)]
enum Scope {
    Document(Option<JsonValue>),
    Array {
        items: VecDeque<JsonValue>,
        taken: usize,
    },
    Object {
        entries: VecDeque<(String, JsonValue)>,
        /// Value of the most recently read name, not yet consumed.
        pending: Option<JsonValue>,
        name: Option<String>,
    },
}

/// Pull-style cursor over one JSON document.
#[derive(Debug)]
pub struct JsonReader {
    stack: Vec<Scope>,
}

impl JsonReader {
    pub fn new(document: JsonValue) -> Self {
        Self {
            stack: vec![Scope::Document(Some(document))],
        }
    }

    /// Shape of the next token without consuming it.
    pub fn peek(&self) -> JsonToken {
        match self.stack.last() {
            Some(Scope::Document(value)) => value.as_ref().map_or(JsonToken::EndDocument, JsonToken::of),
            Some(Scope::Array { items, .. }) => items.front().map_or(JsonToken::EndArray, JsonToken::of),
            Some(Scope::Object {
                entries, pending, ..
            }) => match pending {
                Some(value) => JsonToken::of(value),
                None if entries.is_empty() => JsonToken::EndObject,
                None => JsonToken::Name,
            },
            None => JsonToken::EndDocument,
        }
    }

    /// Shape of the first element of the array under the cursor, without
    /// consuming anything. `EndArray` for an empty array, `None` when the next
    /// value is not an array.
    pub fn peek_first_element(&self) -> Option<JsonToken> {
        match self.next_value()? {
            JsonValue::Array(items) => Some(items.first().map_or(JsonToken::EndArray, JsonToken::of)),
            _ => None,
        }
    }

    /// True while the current array or object has more elements.
    pub fn has_next(&self) -> bool {
        !matches!(
            self.peek(),
            JsonToken::EndArray | JsonToken::EndObject | JsonToken::EndDocument
        )
    }

    pub fn begin_object(&mut self) -> Result<(), StreamError> {
        self.expect(JsonToken::BeginObject)?;
        if let JsonValue::Object(map) = self.take_value()? {
            self.stack.push(Scope::Object {
                entries: map.into_iter().collect(),
                pending: None,
                name: None,
            });
        }
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), StreamError> {
        self.expect(JsonToken::EndObject)?;
        self.stack.pop();
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<(), StreamError> {
        self.expect(JsonToken::BeginArray)?;
        if let JsonValue::Array(items) = self.take_value()? {
            self.stack.push(Scope::Array {
                items: VecDeque::from(items),
                taken: 0,
            });
        }
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), StreamError> {
        self.expect(JsonToken::EndArray)?;
        self.stack.pop();
        Ok(())
    }

    /// Read the next field name of the current object.
    pub fn next_name(&mut self) -> Result<String, StreamError> {
        self.expect(JsonToken::Name)?;
        if let Some(Scope::Object {
            entries,
            pending,
            name,
        }) = self.stack.last_mut()
        {
            if let Some((key, value)) = entries.pop_front() {
                *pending = Some(value);
                *name = Some(key.clone());
                return Ok(key);
            }
        }
        Err(self.mismatch(JsonToken::Name))
    }

    pub fn next_f64(&mut self) -> Result<f64, StreamError> {
        self.expect(JsonToken::Number)?;
        let value = self.take_value()?;
        value
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| StreamError::InvalidNumber { path: self.path() })
    }

    /// Like [`next_f64`](Self::next_f64), but also rejects values outside the
    /// `f32` range.
    pub fn next_f32(&mut self) -> Result<f32, StreamError> {
        let n = self.next_f64()? as f32;
        if n.is_finite() {
            Ok(n)
        } else {
            Err(StreamError::InvalidNumber { path: self.path() })
        }
    }

    pub fn next_bool(&mut self) -> Result<bool, StreamError> {
        self.expect(JsonToken::Bool)?;
        Ok(self.take_value()?.as_bool().unwrap_or_default())
    }

    pub fn next_string(&mut self) -> Result<String, StreamError> {
        self.expect(JsonToken::String)?;
        match self.take_value()? {
            JsonValue::String(s) => Ok(s),
            _ => Ok(String::new()),
        }
    }

    pub fn next_null(&mut self) -> Result<(), StreamError> {
        self.expect(JsonToken::Null)?;
        self.take_value().map(drop)
    }

    /// Read a number that may be wrapped in an array (`5` or `[5, ...]`);
    /// the first element wins and the rest of the array is skipped.
    pub fn next_scalar(&mut self) -> Result<f32, StreamError> {
        if self.peek() != JsonToken::BeginArray {
            return self.next_f32();
        }
        self.begin_array()?;
        let value = self.next_f32()?;
        while self.has_next() {
            self.skip_value()?;
        }
        self.end_array()?;
        Ok(value)
    }

    /// Read a flat list of numbers; a bare number reads as a one-element list.
    pub fn next_number_list(&mut self) -> Result<Vec<f32>, StreamError> {
        if self.peek() != JsonToken::BeginArray {
            return Ok(vec![self.next_f32()?]);
        }
        self.begin_array()?;
        let mut out = Vec::new();
        while self.has_next() {
            out.push(self.next_f32()?);
        }
        self.end_array()?;
        Ok(out)
    }

    /// Skip the next value, including any nested arrays/objects. When
    /// positioned on a name, the name and its value are skipped together.
    pub fn skip_value(&mut self) -> Result<(), StreamError> {
        if self.peek() == JsonToken::Name {
            self.next_name()?;
        }
        self.take_value().map(drop)
    }

    /// Location of the cursor, e.g. `$.layers[0].k`.
    pub fn path(&self) -> String {
        let mut path = String::from("$");
        for scope in &self.stack {
            match scope {
                Scope::Array { taken, .. } if *taken > 0 => {
                    path.push_str(&format!("[{}]", taken - 1));
                }
                Scope::Object {
                    name: Some(name), ..
                } => {
                    path.push('.');
                    path.push_str(name);
                }
                _ => {}
            }
        }
        path
    }

    fn expect(&self, expected: JsonToken) -> Result<(), StreamError> {
        if self.peek() == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected))
        }
    }

    fn mismatch(&self, expected: JsonToken) -> StreamError {
        match self.peek() {
            JsonToken::EndDocument => StreamError::EndOfDocument { path: self.path() },
            found => StreamError::UnexpectedToken {
                expected,
                found,
                path: self.path(),
            },
        }
    }

    fn next_value(&self) -> Option<&JsonValue> {
        match self.stack.last()? {
            Scope::Document(value) => value.as_ref(),
            Scope::Array { items, .. } => items.front(),
            Scope::Object { pending, .. } => pending.as_ref(),
        }
    }

    fn take_value(&mut self) -> Result<JsonValue, StreamError> {
        let value = match self.stack.last_mut() {
            Some(Scope::Document(value)) => value.take(),
            Some(Scope::Array { items, taken }) => {
                let value = items.pop_front();
                if value.is_some() {
                    *taken += 1;
                }
                value
            }
            Some(Scope::Object { pending, .. }) => pending.take(),
            None => None,
        };
        value.ok_or_else(|| match self.peek() {
            JsonToken::EndDocument => StreamError::EndOfDocument { path: self.path() },
            found => StreamError::UnexpectedToken {
                expected: JsonToken::Null,
                found,
                path: self.path(),
            },
        })
    }
}

impl From<JsonValue> for JsonReader {
    fn from(document: JsonValue) -> Self {
        Self::new(document)
    }
}

impl FromStr for JsonReader {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(serde_json::from_str(s)?))
    }
}

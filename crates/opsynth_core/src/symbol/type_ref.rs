//! Type references.
//!
//! A `TypeRef` names a type by fully-qualified metadata name. Generic
//! definitions carry a backtick arity suffix (``System.Threading.Tasks.Task`1``);
//! constructed generics additionally carry their type arguments.
//!
//! # Invariants
//! - A constructed generic has exactly as many arguments as its arity suffix.
//! - Text form round-trips: `TypeRef::from_str(&ty.to_string()) == Ok(ty)`.

use crate::symbol::{SymbolError, SymbolResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Metadata name of the "no value" type.
pub const VOID_TYPE_NAME: &str = "System.Void";

/// Deepest generic nesting accepted from type text.
pub const MAX_TYPE_NESTING: usize = 64;

static METADATA_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:[.+][A-Za-z_][A-Za-z0-9_]*)*(?:`[1-9][0-9]*)?$")
        .expect("valid metadata name regex")
});

/// Structural reference to a (possibly generic) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: String,
    type_args: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-constructed type reference. The name is not validated.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// The "no value" type.
    pub fn void() -> Self {
        Self::named(VOID_TYPE_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_args(&self) -> &[TypeRef] {
        &self.type_args
    }

    pub fn is_void(&self) -> bool {
        self.name == VOID_TYPE_NAME && self.type_args.is_empty()
    }

    /// Arity declared by the backtick suffix, `None` for non-generic names.
    pub fn generic_arity(&self) -> Option<usize> {
        generic_arity_of(&self.name)
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity().is_some()
    }

    /// Returns the unbound generic form: same definition, no arguments.
    pub fn unbound(&self) -> TypeRef {
        Self::named(self.name.clone())
    }

    /// Whether both types are generic and share one generic definition.
    pub fn same_generic_definition(&self, other: &TypeRef) -> bool {
        self.is_generic() && other.is_generic() && self.name == other.name
    }

    /// Constructs a generic type from this definition.
    ///
    /// # Errors
    /// - `TypeArityMismatch` when `args` does not match the declared arity or
    ///   this type is not a generic definition.
    pub fn construct(&self, args: Vec<TypeRef>) -> SymbolResult<TypeRef> {
        let expected = self.generic_arity().unwrap_or(0);
        if expected == 0 || args.len() != expected {
            return Err(SymbolError::TypeArityMismatch {
                name: self.name.clone(),
                expected,
                actual: args.len(),
            });
        }
        Ok(Self {
            name: self.name.clone(),
            type_args: args,
        })
    }

    /// Returns the only type argument, if there is exactly one.
    pub fn single_type_argument(&self) -> Option<&TypeRef> {
        match self.type_args.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Validates metadata names and arities, recursively.
    pub fn validate(&self) -> SymbolResult<()> {
        if !METADATA_NAME_RE.is_match(&self.name) {
            return Err(SymbolError::InvalidTypeName(self.name.clone()));
        }
        check_arity(&self.name, self.type_args.len())?;
        self.type_args.iter().try_for_each(TypeRef::validate)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if self.type_args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (index, arg) in self.type_args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

impl FromStr for TypeRef {
    type Err = SymbolError;

    fn from_str(value: &str) -> SymbolResult<Self> {
        let mut parser = TypeTextParser {
            text: value,
            pos: 0,
            depth: 0,
        };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != value.len() {
            return Err(SymbolError::InvalidTypeName(value.to_string()));
        }
        Ok(parsed)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = SymbolError;

    fn try_from(value: String) -> SymbolResult<Self> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

fn generic_arity_of(name: &str) -> Option<usize> {
    let (_, suffix) = name.rsplit_once('`')?;
    suffix.parse::<usize>().ok().filter(|arity| *arity > 0)
}

fn check_arity(name: &str, actual: usize) -> SymbolResult<()> {
    if actual == 0 {
        return Ok(());
    }
    let expected = generic_arity_of(name).unwrap_or(0);
    if expected != actual {
        return Err(SymbolError::TypeArityMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Recursive-descent reader for `Name` / `Name<Arg, ...>` text.
struct TypeTextParser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl TypeTextParser<'_> {
    fn parse_type(&mut self) -> SymbolResult<TypeRef> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'<' | b'>' | b',') {
                break;
            }
            self.pos += 1;
        }
        let name = self.text[start..self.pos].trim();
        if !METADATA_NAME_RE.is_match(name) {
            return Err(SymbolError::InvalidTypeName(self.text.to_string()));
        }

        let mut type_args = Vec::new();
        if self.peek() == Some(b'<') {
            if self.depth >= MAX_TYPE_NESTING {
                return Err(SymbolError::InvalidTypeName(format!(
                    "type text nested deeper than {MAX_TYPE_NESTING} levels"
                )));
            }
            self.pos += 1;
            self.depth += 1;
            loop {
                type_args.push(self.parse_type()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b'>') => {
                        self.pos += 1;
                        self.depth -= 1;
                        break;
                    }
                    _ => return Err(SymbolError::InvalidTypeName(self.text.to_string())),
                }
            }
        }

        check_arity(name, type_args.len())?;
        Ok(TypeRef {
            name: name.to_string(),
            type_args,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}

// path/parser.rs — hand-written recursive-descent parser for the path
// expression grammar (spec §4.1):
//
//   path         := contract-ref ( '.' segment ( '.' segment | '[' key ']' )* )?
//   contract-ref := '$self' | '@' field-name | qualified-address
//   segment      := identifier
//   key          := qualified-address | identifier | digits

use crate::errors::PathError;
use crate::model::Address;

#[derive(Debug, Clone, PartialEq)]
pub enum PathRoot {
    SelfRef,
    FieldRef(String),
    Address(Address),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Address(Address),
    Identifier(String),
    Digits(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(Key),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub root: PathRoot,
    pub segments: Vec<PathSegment>,
}

fn parse_key(raw: &str) -> Key {
    if let Ok(addr) = raw.parse::<Address>() {
        return Key::Address(addr);
    }
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<i64>() {
            return Key::Digits(n);
        }
    }
    Key::Identifier(raw.to_string())
}

/// Parse a path expression string into an AST.
pub fn parse(input: &str) -> Result<Path, PathError> {
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0usize;
    let n = chars.len();

    if n == 0 {
        return Err(PathError::MalformedPath(input.to_string(), "empty path".into()));
    }

    // --- contract-ref ---
    let root = if input.starts_with("$self") {
        i += "$self".len();
        PathRoot::SelfRef
    } else if chars[0] == '@' {
        i += 1;
        let start = i;
        while i < n && chars[i] != '.' && chars[i] != '[' {
            i += 1;
        }
        if i == start {
            return Err(PathError::MalformedPath(
                input.to_string(),
                "empty @field-name".into(),
            ));
        }
        PathRoot::FieldRef(chars[start..i].iter().collect())
    } else {
        let start = i;
        while i < n && chars[i] != '.' && chars[i] != '[' {
            i += 1;
        }
        let raw: String = chars[start..i].iter().collect();
        let addr: Address = raw.parse().map_err(|_| {
            PathError::MalformedPath(input.to_string(), format!("invalid contract-ref {:?}", raw))
        })?;
        PathRoot::Address(addr)
    };

    // --- segments ---
    if i < n && chars[i] == '[' {
        return Err(PathError::MalformedPath(
            input.to_string(),
            "a contract-ref must be followed by '.segment' before any '[key]'".into(),
        ));
    }

    let mut segments = Vec::new();
    while i < n {
        match chars[i] {
            '.' => {
                i += 1;
                let start = i;
                while i < n && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                if i == start {
                    return Err(PathError::MalformedPath(
                        input.to_string(),
                        "empty segment after '.'".into(),
                    ));
                }
                segments.push(PathSegment::Field(chars[start..i].iter().collect()));
            }
            '[' => {
                i += 1;
                let start = i;
                while i < n && chars[i] != ']' {
                    i += 1;
                }
                if i == n {
                    return Err(PathError::MalformedPath(
                        input.to_string(),
                        "unterminated '['".into(),
                    ));
                }
                let raw: String = chars[start..i].iter().collect();
                i += 1; // consume ']'
                segments.push(PathSegment::Index(parse_key(&raw)));
            }
            other => {
                return Err(PathError::MalformedPath(
                    input.to_string(),
                    format!("unexpected character {:?}", other),
                ));
            }
        }
    }

    Ok(Path { root, segments })
}

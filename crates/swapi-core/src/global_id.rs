//! Relay-style global identifiers.
//!
//! A global id is the base64 encoding of `"<TypeName>:<local id>"`, e.g.
//! `UGxhbmV0Tm9kZTox` for `PlanetNode:1`. Clients treat it as opaque; the
//! server decodes it to find both the table and the row.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding a global id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalIdError {
    #[error("'{0}' is not valid base64")]
    Encoding(String),

    #[error("'{0}' does not decode to '<type>:<id>'")]
    Malformed(String),

    #[error("unknown node type '{0}'")]
    UnknownType(String),

    #[error("expected a {expected} id, got a {found} id")]
    WrongType { expected: NodeKind, found: NodeKind },
}

/// Node types addressable by global id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Planet,
    Film,
    Character,
}

impl NodeKind {
    /// Type name embedded in the encoded token.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Planet => "PlanetNode",
            Self::Film => "FilmNode",
            Self::Character => "CharacterNode",
        }
    }

    /// Lowercase name used for history rows and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planet => "planet",
            Self::Film => "film",
            Self::Character => "character",
        }
    }

    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "PlanetNode" => Some(Self::Planet),
            "FilmNode" => Some(Self::Film),
            "CharacterNode" => Some(Self::Character),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded global id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalId {
    pub kind: NodeKind,
    pub id: i64,
}

impl GlobalId {
    pub fn new(kind: NodeKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Encode to the opaque token handed to clients.
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind.type_name(), self.id))
    }

    /// Decode a token of any node type.
    pub fn decode(token: &str) -> Result<Self, GlobalIdError> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|_| GlobalIdError::Encoding(token.to_string()))?;
        let raw = String::from_utf8(bytes).map_err(|_| GlobalIdError::Malformed(token.to_string()))?;

        let (type_name, id) = raw
            .split_once(':')
            .ok_or_else(|| GlobalIdError::Malformed(token.to_string()))?;
        let kind = NodeKind::from_type_name(type_name)
            .ok_or_else(|| GlobalIdError::UnknownType(type_name.to_string()))?;
        let id = id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| GlobalIdError::Malformed(token.to_string()))?;

        Ok(Self { kind, id })
    }

    /// Decode a token and require a specific node type.
    pub fn decode_as(token: &str, expected: NodeKind) -> Result<Self, GlobalIdError> {
        let gid = Self::decode(token)?;
        if gid.kind != expected {
            return Err(GlobalIdError::WrongType {
                expected,
                found: gid.kind,
            });
        }
        Ok(gid)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

//! The stored symbol model and its persistence collaborator.
//!
//! Symbols are immutable once stored; edits produce a new revision
//! under a new id. The store itself is a host concern, but the trait
//! plus the in-memory reference implementation keep the engine testable
//! stand-alone.

use crate::error::{EngineError, Result};
use crate::raster::RasterBuffer;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shapes normalized to the symbol's own unit bounding box, plus the
/// box's real size in page-fraction units so placement can reconstruct
/// absolute scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSymbol {
    pub shapes: Vec<Shape>,
    pub original_width: f64,
    pub original_height: f64,
    pub aspect_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapSymbol {
    pub raster: RasterBuffer,
    /// Page-fraction size of the captured selection after editing.
    pub original_width: f64,
    pub original_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Vector(VectorSymbol),
    Bitmap(BitmapSymbol),
}

impl Symbol {
    pub fn original_width(&self) -> f64 {
        match self {
            Symbol::Vector(v) => v.original_width,
            Symbol::Bitmap(b) => b.original_width,
        }
    }

    pub fn original_height(&self) -> f64 {
        match self {
            Symbol::Vector(v) => v.original_height,
            Symbol::Bitmap(b) => b.original_height,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a persisted record. A record whose `kind` tag is not a
    /// known symbol kind surfaces `UnsupportedSymbolKind` rather than a
    /// bare serde error, so the caller can distinguish corruption from
    /// a format written by a newer revision of the application.
    pub fn from_json(json: &str) -> Result<Symbol> {
        serde_json::from_str(json).map_err(|e| {
            let kind = serde_json::from_str::<serde_json::Value>(json)
                .ok()
                .and_then(|v| v.get("kind").and_then(|k| k.as_str().map(String::from)))
                .unwrap_or_else(|| e.to_string());
            EngineError::UnsupportedSymbolKind(kind)
        })
    }
}

pub type SymbolId = u64;

/// Persistence collaborator provided by the host application.
pub trait SymbolStore {
    fn save(&mut self, symbol: Symbol) -> SymbolId;
    fn load(&self, id: SymbolId) -> Option<&Symbol>;
    fn delete(&mut self, id: SymbolId) -> bool;
}

/// In-memory reference store with monotonically increasing ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    symbols: HashMap<SymbolId, Symbol>,
    next_id: SymbolId,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolStore for MemoryStore {
    fn save(&mut self, symbol: Symbol) -> SymbolId {
        self.next_id += 1;
        self.symbols.insert(self.next_id, symbol);
        self.next_id
    }

    fn load(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    fn delete(&mut self, id: SymbolId) -> bool {
        self.symbols.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Geometry, Point};

    fn sample_vector() -> Symbol {
        Symbol::Vector(VectorSymbol {
            shapes: vec![Shape::new(Geometry::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 1.0),
            })],
            original_width: 0.2,
            original_height: 0.1,
            aspect_ratio: 2.0,
        })
    }

    #[test]
    fn test_store_save_load_delete() {
        let mut store = MemoryStore::new();
        let id = store.save(sample_vector());
        assert!(store.load(id).is_some());
        let id2 = store.save(sample_vector());
        assert_ne!(id, id2);
        assert!(store.delete(id));
        assert!(store.load(id).is_none());
        assert!(!store.delete(id));
    }

    #[test]
    fn test_json_round_trip() {
        let symbol = sample_vector();
        let json = symbol.to_json().unwrap();
        let back = Symbol::from_json(&json).unwrap();
        assert_eq!(back, symbol);
    }

    #[test]
    fn test_unknown_kind_surfaces_typed_error() {
        let err = Symbol::from_json(r#"{"kind":"hologram","data":[]}"#).unwrap_err();
        match err {
            EngineError::UnsupportedSymbolKind(kind) => assert_eq!(kind, "hologram"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

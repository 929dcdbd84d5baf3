//! Typed cell values and column descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Column Type
// =============================================================================

/// Semantic type declared by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Bool,
    Int,
    Float,
    String,
}

impl ColumnType {
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::String => "string",
        }
    }
}

// =============================================================================
// Cell Value
// =============================================================================

/// Value of one cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Missing value, also returned for out-of-range reads
    #[default]
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to the representation of `column_type`.
    ///
    /// Conversions that make no sense (text that is not a number, a float
    /// with a fraction into an int) yield [`CellValue::Empty`].
    pub fn convert(&self, column_type: ColumnType) -> CellValue {
        match (column_type, self) {
            (_, CellValue::Empty) => CellValue::Empty,

            (ColumnType::Bool, CellValue::Bool(b)) => CellValue::Bool(*b),
            (ColumnType::Bool, CellValue::Int(i)) => CellValue::Bool(*i != 0),
            (ColumnType::Bool, CellValue::Float(f)) => CellValue::Bool(*f != 0.0),
            (ColumnType::Bool, CellValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str()
            {
                "true" | "1" | "yes" => CellValue::Bool(true),
                "false" | "0" | "no" => CellValue::Bool(false),
                _ => CellValue::Empty,
            },

            (ColumnType::Int, CellValue::Bool(b)) => CellValue::Int(i64::from(*b)),
            (ColumnType::Int, CellValue::Int(i)) => CellValue::Int(*i),
            (ColumnType::Int, CellValue::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
                CellValue::Int(*f as i64)
            }
            (ColumnType::Int, CellValue::Float(_)) => CellValue::Empty,
            (ColumnType::Int, CellValue::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(CellValue::Int)
                .unwrap_or(CellValue::Empty),

            (ColumnType::Float, CellValue::Bool(b)) => CellValue::Float(if *b { 1.0 } else { 0.0 }),
            (ColumnType::Float, CellValue::Int(i)) => CellValue::Float(*i as f64),
            (ColumnType::Float, CellValue::Float(f)) => CellValue::Float(*f),
            (ColumnType::Float, CellValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(CellValue::Float)
                .unwrap_or(CellValue::Empty),

            (ColumnType::String, CellValue::Text(s)) => CellValue::Text(s.clone()),
            (ColumnType::String, other) => CellValue::Text(other.to_string()),
        }
    }

    /// Whether this value can be stored in a column of `column_type`.
    pub fn fits(&self, column_type: ColumnType) -> bool {
        self.is_empty() || !self.convert(column_type).is_empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// One row of cells, in column order.
pub type Row = Vec<CellValue>;

// =============================================================================
// Column Descriptor
// =============================================================================

/// A boolean column property the UI may toggle unless it is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnFlag {
    pub value: bool,
    /// Read-only override; a locked flag ignores writes
    #[serde(default)]
    pub locked: bool,
}

impl ColumnFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            locked: false,
        }
    }

    pub fn locked(value: bool) -> Self {
        Self {
            value,
            locked: true,
        }
    }

    /// Set the flag; returns `false` when the flag is locked.
    pub fn set(&mut self, value: bool) -> bool {
        if self.locked {
            return false;
        }
        self.value = value;
        true
    }
}

/// Description of one column.
///
/// Name, label and type never change after construction; only the flags do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    name: String,
    /// Display label; empty means "use the name"
    #[serde(default)]
    label: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default = "visible_default")]
    visible: ColumnFlag,
    #[serde(default)]
    renderable: ColumnFlag,
    #[serde(default)]
    editable: ColumnFlag,
}

fn visible_default() -> ColumnFlag {
    ColumnFlag::new(true)
}

impl ColumnDescriptor {
    /// A visible, non-renderable, read-only column labelled with its name.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            column_type,
            visible: ColumnFlag::new(true),
            renderable: ColumnFlag::new(false),
            editable: ColumnFlag::new(false),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_visible(mut self, flag: ColumnFlag) -> Self {
        self.visible = flag;
        self
    }

    pub fn with_renderable(mut self, flag: ColumnFlag) -> Self {
        self.renderable = flag;
        self
    }

    pub fn with_editable(mut self, flag: ColumnFlag) -> Self {
        self.editable = flag;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_visible(&self) -> bool {
        self.visible.value
    }

    pub fn is_renderable(&self) -> bool {
        self.renderable.value
    }

    pub fn is_editable(&self) -> bool {
        self.editable.value
    }

    pub fn visible(&self) -> ColumnFlag {
        self.visible
    }

    pub fn renderable(&self) -> ColumnFlag {
        self.renderable
    }

    pub fn editable(&self) -> ColumnFlag {
        self.editable
    }

    pub fn set_visible(&mut self, value: bool) -> bool {
        self.visible.set(value)
    }

    pub fn set_renderable(&mut self, value: bool) -> bool {
        self.renderable.set(value)
    }

    pub fn set_editable(&mut self, value: bool) -> bool {
        self.editable.set(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

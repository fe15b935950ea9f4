//! Attribute values, dimensions, and multi-dimensional variables.

use ndarray::{ArrayD, IxDyn};

/// The value of a block attribute.
///
/// Attributes are scalar or one-dimensional metadata attached to a block,
/// separate from dimensioned variable data.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    StrArray(Vec<String>),
}

impl AttrValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Str(_) => "str",
            AttrValue::IntArray(_) => "int[]",
            AttrValue::FloatArray(_) => "float[]",
            AttrValue::StrArray(_) => "str[]",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        AttrValue::IntArray(v)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(v: Vec<f64>) -> Self {
        AttrValue::FloatArray(v)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::StrArray(v)
    }
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named extent shared by the variables of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub size: u64,
}

impl Dimension {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Element type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
    Str,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Str => "str",
        }
    }
}

/// The payload of a variable, one dense array per element type.
#[derive(Debug, Clone, PartialEq)]
pub enum VarData {
    Int(ArrayD<i64>),
    Float(ArrayD<f64>),
    Str(ArrayD<String>),
}

impl VarData {
    pub fn dtype(&self) -> VarType {
        match self {
            VarData::Int(_) => VarType::Int,
            VarData::Float(_) => VarType::Float,
            VarData::Str(_) => VarType::Str,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            VarData::Int(a) => a.shape(),
            VarData::Float(a) => a.shape(),
            VarData::Str(a) => a.shape(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VarData::Int(a) => a.len(),
            VarData::Float(a) => a.len(),
            VarData::Str(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A zero-dimensional array holding a single integer.
    pub fn scalar_int(v: i64) -> Self {
        VarData::Int(ArrayD::from_elem(IxDyn(&[]), v))
    }

    /// A zero-dimensional array holding a single float.
    pub fn scalar_float(v: f64) -> Self {
        VarData::Float(ArrayD::from_elem(IxDyn(&[]), v))
    }

    /// A zero-dimensional array holding a single string.
    pub fn scalar_str(v: impl Into<String>) -> Self {
        VarData::Str(ArrayD::from_elem(IxDyn(&[]), v.into()))
    }

    pub fn vec_int(v: Vec<i64>) -> Self {
        VarData::Int(ndarray::Array1::from(v).into_dyn())
    }

    pub fn vec_float(v: Vec<f64>) -> Self {
        VarData::Float(ndarray::Array1::from(v).into_dyn())
    }

    pub fn vec_str(v: Vec<String>) -> Self {
        VarData::Str(ndarray::Array1::from(v).into_dyn())
    }
}

impl From<ArrayD<i64>> for VarData {
    fn from(a: ArrayD<i64>) -> Self {
        VarData::Int(a)
    }
}

impl From<ArrayD<f64>> for VarData {
    fn from(a: ArrayD<f64>) -> Self {
        VarData::Float(a)
    }
}

impl From<ArrayD<String>> for VarData {
    fn from(a: ArrayD<String>) -> Self {
        VarData::Str(a)
    }
}

/// A dimensioned variable. Each entry of `dims` names a dimension defined
/// in the same block; a scalar variable has an empty `dims`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub dims: Vec<String>,
    pub data: VarData,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        data: impl Into<VarData>,
    ) -> Self {
        Self {
            name: name.into(),
            dims,
            data: data.into(),
        }
    }

    /// A scalar integer variable with no dimensions.
    pub fn scalar_int(name: impl Into<String>, v: i64) -> Self {
        Self::new(name, Vec::new(), VarData::scalar_int(v))
    }

    /// A scalar float variable with no dimensions.
    pub fn scalar_float(name: impl Into<String>, v: f64) -> Self {
        Self::new(name, Vec::new(), VarData::scalar_float(v))
    }

    /// A scalar string variable with no dimensions.
    pub fn scalar_str(name: impl Into<String>, v: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), VarData::scalar_str(v))
    }

    pub fn dtype(&self) -> VarType {
        self.data.dtype()
    }
}

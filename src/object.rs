//! PDF object types.
//!
//! Dictionaries keep insertion order so that appearance dictionaries,
//! resource names and state lists come out deterministically.

use indexmap::IndexMap;

/// Dictionary payload shared by [`Object::Dictionary`] and [`Object::Stream`].
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Build a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Build a real number object from an `f32` measurement.
    pub fn real(value: f32) -> Self {
        Object::Real(value as f64)
    }

    /// Build a numeric array (rectangles, colors, matrices).
    pub fn number_array(values: &[f32]) -> Self {
        Object::Array(values.iter().map(|v| Object::real(*v)).collect())
    }

    /// Encode a text string.
    ///
    /// Latin-1 text is stored byte for byte; anything wider is stored as
    /// UTF-16BE with a byte order mark.
    pub fn text_string(text: &str) -> Self {
        if text.chars().all(|c| (c as u32) < 0x100) {
            Object::String(text.chars().map(|c| c as u8).collect())
        } else {
            let mut bytes = vec![0xFE, 0xFF];
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            Object::String(bytes)
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer or real, as `f32`.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r as f32),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Mutable counterpart of [`Object::as_dict`].
    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Decode a text string (UTF-16BE with BOM, otherwise Latin-1).
    pub fn as_text_string(&self) -> Option<String> {
        self.as_string().map(decode_text_string)
    }

    /// Stream payload, if this is a stream.
    pub fn stream_data(&self) -> Option<&bytes::Bytes> {
        match self {
            Object::Stream { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Decode the bytes of a PDF text string.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Read four numbers out of a `/Rect`-style array.
pub fn rect_components(obj: &Object) -> Option<[f32; 4]> {
    let arr = obj.as_array()?;
    if arr.len() < 4 {
        return None;
    }
    let mut out = [0.0f32; 4];
    for (slot, item) in out.iter_mut().zip(arr.iter()) {
        *slot = item.as_number()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::new(12, 0).to_string(), "12 0 R");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Object::Null.type_name(), "Null");
        assert_eq!(Object::name("Tx").type_name(), "Name");
        assert_eq!(Object::Dictionary(Dictionary::new()).type_name(), "Dictionary");
    }

    #[test]
    fn test_as_number_accepts_integer_and_real() {
        assert_eq!(Object::Integer(3).as_number(), Some(3.0));
        assert_eq!(Object::Real(1.5).as_number(), Some(1.5));
        assert_eq!(Object::name("x").as_number(), None);
    }

    #[test]
    fn test_stream_exposes_dict() {
        let mut dict = Dictionary::new();
        dict.insert("Length".to_string(), Object::Integer(0));
        let stream = Object::Stream {
            dict,
            data: bytes::Bytes::new(),
        };
        assert!(stream.as_dict().unwrap().contains_key("Length"));
    }

    #[test]
    fn test_text_string_latin1() {
        let obj = Object::text_string("Caf\u{e9}");
        assert_eq!(obj.as_string().unwrap(), &[b'C', b'a', b'f', 0xE9]);
        assert_eq!(obj.as_text_string().unwrap(), "Caf\u{e9}");
    }

    #[test]
    fn test_text_string_utf16() {
        let obj = Object::text_string("\u{4e2d}");
        let bytes = obj.as_string().unwrap();
        assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
        assert_eq!(obj.as_text_string().unwrap(), "\u{4e2d}");
    }

    #[test]
    fn test_rect_components() {
        let rect = Object::number_array(&[0.0, 0.0, 100.0, 20.0]);
        assert_eq!(rect_components(&rect), Some([0.0, 0.0, 100.0, 20.0]));
        assert_eq!(rect_components(&Object::Array(vec![Object::Integer(1)])), None);
    }

    #[test]
    fn test_dictionary_keeps_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert("Yes".to_string(), Object::Null);
        dict.insert("Off".to_string(), Object::Null);
        let keys: Vec<&String> = dict.keys().collect();
        assert_eq!(keys, vec!["Yes", "Off"]);
    }
}

// file.rs
//
// A parsed module file: the header, then definitions until the source is
// exhausted. The header is big-endian; the body is little-endian.

use std::path::Path;

use tracing::debug;

use nir_core::Definition;

use crate::decoder::{ByteOrder, Decoder};
use crate::deserializer::Deserializer;
use crate::error::{DecodeError, FileError};

/// The value identifying serialized module files.
///
/// The first four bytes of a file hold this value, written in big-endian.
pub const FILE_IDENTIFIER: i32 = 0x2e4e4952;

/// The header of a serialized module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The major version number of the file.
    pub compatibility_level: i32,
    /// The minor version number of the file.
    pub revision: i32,
    /// `true` if the file has entry points.
    pub has_entry_points: bool,
}

impl Header {
    /// Parses a header from `source`, whose byte order must be big-endian.
    pub fn decode(source: &mut Decoder) -> Result<Self, DecodeError> {
        let offset = source.position();
        let magic = source.i32()?;
        if magic != FILE_IDENTIFIER {
            return Err(DecodeError::BadMagic {
                offset,
                found: magic,
            });
        }
        let compatibility_level = source.i32()?;
        let revision = source.i32()?;
        // The revisions this reader targets do not serialize the
        // entry-points flag.
        Ok(Header {
            compatibility_level,
            revision,
            has_entry_points: true,
        })
    }
}

/// A parsed module file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    /// The header of the file.
    pub header: Header,
    /// The definitions in the file, in stream order.
    pub definitions: Vec<Definition>,
}

impl File {
    /// Parses an instance from raw file contents.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let mut source = Decoder::new(bytes);

        source.byte_order = ByteOrder::Big;
        let header = Header::decode(&mut source)?;

        source.byte_order = ByteOrder::Little;
        let mut deserializer = Deserializer::new(&mut source);
        let mut definitions = Vec::new();
        while !deserializer.is_empty() {
            definitions.push(deserializer.definition()?);
        }

        debug!(
            definitions = definitions.len(),
            compatibility_level = header.compatibility_level,
            revision = header.revision,
            "decoded module"
        );
        Ok(File {
            header,
            definitions,
        })
    }

    /// Parses an instance from the contents of the file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let bytes = std::fs::read(path).map_err(|source| FileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags;
    use nir_core::{
        AttributeSet, DebugInformation, FunctionType, Member, Signature, SourceFile,
        SourcePosition, Symbol, Top, Type, Value,
    };

    fn uleb(mut value: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                bytes.push(byte);
                return bytes;
            }
            bytes.push(byte | 0x80);
        }
    }

    fn inserted(s: &str) -> Vec<u8> {
        let mut bytes = vec![tags::string::INSERTED];
        bytes.extend(uleb(s.len() as u64));
        bytes.extend(s.as_bytes());
        bytes
    }

    /// A member symbol `owner.signature`, both names inline.
    fn member(owner: &str, signature: &str) -> Vec<u8> {
        let mut bytes = vec![tags::symbol::MEMBER, tags::symbol::TOP];
        bytes.extend(inserted(owner));
        bytes.extend(inserted(signature));
        bytes
    }

    /// A position with a virtual source at 0:0.
    fn position() -> Vec<u8> {
        let mut bytes = vec![tags::string::EMPTY];
        bytes.extend(uleb(0));
        bytes.extend(uleb(0));
        bytes
    }

    fn header(major: i32, minor: i32) -> Vec<u8> {
        let mut bytes = FILE_IDENTIFIER.to_be_bytes().to_vec();
        bytes.extend(major.to_be_bytes());
        bytes.extend(minor.to_be_bytes());
        bytes
    }

    #[test]
    fn rejects_a_bad_magic() {
        let mut bytes = 0x2e4e4953i32.to_be_bytes().to_vec();
        bytes.extend([0u8; 8]);
        assert_eq!(
            File::from_bytes(bytes),
            Err(DecodeError::BadMagic {
                offset: 0,
                found: 0x2e4e4953,
            })
        );
    }

    #[test]
    fn rejects_a_truncated_header() {
        assert!(matches!(
            File::from_bytes(FILE_IDENTIFIER.to_be_bytes().to_vec()),
            Err(DecodeError::OutOfBytes { .. })
        ));
    }

    #[test]
    fn decodes_an_empty_file() {
        let file = File::from_bytes(header(1, 5)).unwrap();
        assert_eq!(
            file.header,
            Header {
                compatibility_level: 1,
                revision: 5,
                has_entry_points: true,
            }
        );
        assert!(file.definitions.is_empty());
    }

    #[test]
    fn decodes_an_empty_method_definition() {
        let mut bytes = header(1, 5);
        bytes.push(tags::definition::DEFINE);
        bytes.extend(uleb(0)); // no attributes
        bytes.extend(member("A", "m()"));
        bytes.push(tags::ty::FUNCTION);
        bytes.extend(uleb(0)); // no parameters
        bytes.push(tags::ty::UNIT);
        bytes.extend(uleb(0)); // no instructions
        bytes.extend(uleb(0)); // no local names
        bytes.extend(uleb(0)); // no scopes
        bytes.extend(position());

        let file = File::from_bytes(bytes).unwrap();
        assert_eq!(
            file.definitions,
            vec![Definition::Method {
                attributes: AttributeSet::new(),
                name: Member {
                    owner: Top::new("A"),
                    signature: Signature::new("m()"),
                },
                ty: FunctionType::new(vec![], Type::unit()),
                instructions: vec![],
                debug: DebugInformation::default(),
                position: SourcePosition::new(SourceFile::Virtual, 0, 0),
            }]
        );
    }

    #[test]
    fn decodes_a_constant_binding() {
        let mut bytes = header(1, 5);
        bytes.push(tags::definition::CONSTANT);
        bytes.extend(uleb(0));
        bytes.extend(member("A", "f"));
        bytes.push(tags::ty::INT);
        bytes.extend([tags::value::INT, 0x2a]);
        bytes.extend(position());

        let file = File::from_bytes(bytes).unwrap();
        let [definition] = file.definitions.as_slice() else {
            panic!("expected one definition");
        };
        let Definition::Binding {
            ty,
            initializer,
            constant,
            ..
        } = definition
        else {
            panic!("expected a binding");
        };
        assert!(*constant);
        assert_eq!(*ty, Type::i32());
        assert_eq!(*initializer, Value::Int(42));
        assert_eq!(definition.name(), Symbol::member(Top::new("A"), "f"));
    }

    #[test]
    fn decodes_definitions_in_stream_order() {
        let mut bytes = header(1, 5);
        bytes.push(tags::definition::TRAIT);
        bytes.extend(uleb(0));
        bytes.push(tags::symbol::TOP);
        bytes.extend(inserted("T"));
        bytes.extend(uleb(0)); // no bases
        bytes.extend(position());

        bytes.push(tags::definition::CLASS);
        bytes.extend(uleb(0));
        bytes.push(tags::symbol::TOP);
        bytes.extend(inserted("C"));
        bytes.push(1); // parent present
        bytes.push(tags::symbol::TOP);
        bytes.extend(inserted("java.lang.Object"));
        bytes.extend(uleb(1)); // one trait, back-referenced
        bytes.push(tags::BACK_REFERENCE);
        bytes.extend(uleb(0));
        bytes.extend(position());

        let file = File::from_bytes(bytes).unwrap();
        assert_eq!(file.definitions.len(), 2);
        let Definition::Trait { name, .. } = &file.definitions[0] else {
            panic!("expected a trait");
        };
        assert_eq!(name, &Top::new("T"));
        let Definition::Class { name, parent, traits, .. } = &file.definitions[1] else {
            panic!("expected a class");
        };
        assert_eq!(name, &Top::new("C"));
        assert_eq!(parent, &Some(Top::new("java.lang.Object")));
        // The back-reference resolves to the trait's interned name.
        assert_eq!(traits, &vec![Top::new("T")]);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut bytes = header(1, 5);
        bytes.push(tags::definition::CONSTANT);
        bytes.extend(uleb(0));
        bytes.extend(member("A", "f"));
        bytes.push(tags::ty::INT);
        bytes.extend([tags::value::INT, 0x2a]);
        bytes.extend(position());
        bytes.push(0xfe);

        assert!(matches!(
            File::from_bytes(bytes),
            Err(DecodeError::UnexpectedTag { .. }) | Err(DecodeError::OutOfBytes { .. })
        ));
    }

    #[test]
    fn memo_expanded_and_inlined_encodings_decode_equally() {
        // Two bindings sharing the member symbol: once with the symbol
        // written inline twice, once with a back-reference.
        fn binding(member_bytes: &[u8]) -> Vec<u8> {
            let mut bytes = vec![tags::definition::VARIABLE];
            bytes.extend(uleb(0));
            bytes.extend(member_bytes);
            bytes.push(tags::ty::LONG);
            bytes.extend([tags::value::LONG, 0x01]);
            bytes.extend(position());
            bytes
        }

        let mut inlined = header(1, 5);
        inlined.extend(binding(&member("A", "f")));
        // The second inline encoding re-inserts its strings, so contained
        // references keep working; re-encode the member with contained
        // strings to model the producer re-emitting the same payload.
        let mut second = vec![tags::symbol::MEMBER, tags::symbol::TOP];
        second.push(tags::string::CONTAINED);
        second.extend(uleb(1));
        second.extend(uleb(0));
        second.push(tags::string::CONTAINED);
        second.extend(uleb(1));
        second.extend(uleb(1));
        inlined.extend(binding(&second));

        let mut referenced = header(1, 5);
        referenced.extend(binding(&member("A", "f")));
        let mut back = vec![tags::BACK_REFERENCE];
        // The member is memoized after its owner: index 1.
        back.extend(uleb(1));
        referenced.extend(binding(&back));

        let inlined = File::from_bytes(inlined).unwrap();
        let referenced = File::from_bytes(referenced).unwrap();
        assert_eq!(inlined.definitions, referenced.definitions);
    }
}

use std::collections::BTreeMap;

use super::Reader;
use crate::error::{Error, ErrorKind, Result, ResultExt};

// -------------------------------------------------------------------------- //
// Variant Registry

pub type PayloadDecoder<T> = fn(&mut Reader<'_>) -> Result<T>;

pub struct VariantEntry<T> {
    pub name: &'static str,
    decode: PayloadDecoder<T>,
}

/// Maps discriminant bytes to payload decoders for one tagged union.
///
/// Registries are append-only: a discriminant keeps its meaning and payload
/// layout forever, new versions get new discriminants.
pub struct VariantRegistry<T> {
    union: &'static str,
    entries: BTreeMap<u8, VariantEntry<T>>,
}

impl<T> VariantRegistry<T> {
    pub fn new(union: &'static str) -> Self {
        VariantRegistry {
            union,
            entries: BTreeMap::new(),
        }
    }

    /// Register a payload decoder. Panics if the discriminant is taken, which
    /// can only happen through a mistake in a registry definition.
    pub fn register(mut self, discriminant: u8, name: &'static str, decode: PayloadDecoder<T>) -> Self {
        let previous = self.entries.insert(discriminant, VariantEntry { name, decode });
        assert!(
            previous.is_none(),
            "{}: discriminant {discriminant:#04x} registered twice",
            self.union
        );
        log::trace!("{}: registered {name} as {discriminant:#04x}", self.union);
        self
    }

    pub fn union_name(&self) -> &'static str {
        self.union
    }

    pub fn get(&self, discriminant: u8) -> Option<&VariantEntry<T>> {
        self.entries.get(&discriminant)
    }

    pub fn name_of(&self, discriminant: u8) -> Option<&'static str> {
        self.get(discriminant).map(|entry| entry.name)
    }

    /// Registered discriminants in ascending order.
    pub fn discriminants(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }

    /// Read a discriminant and decode the payload it selects.
    pub fn decode(&self, reader: &mut Reader<'_>) -> Result<T> {
        let discriminant = reader.read_byte()?;
        let Some(entry) = self.entries.get(&discriminant) else {
            log::debug!(
                "{}: unknown discriminant {discriminant:#04x} at offset {}",
                self.union,
                reader.position() - 1
            );
            return Err(Error::new(ErrorKind::UnknownVariant { discriminant }));
        };
        (entry.decode)(reader).at(entry.name)
    }
}

// -------------------------------------------------------------------------- //
// Tagged Unions

/// A sum type encoded as one discriminant byte followed by the payload of
/// the selected variant.
pub trait TaggedUnion: Sized + 'static {
    fn registry() -> &'static VariantRegistry<Self>;

    fn discriminant(&self) -> u8;

    fn encode_payload(&self, out: &mut Vec<u8>);

    fn payload_len(&self) -> usize;

    fn variant_name(&self) -> &'static str {
        Self::registry()
            .name_of(self.discriminant())
            .unwrap_or("<unregistered>")
    }
}

pub fn encode_tagged<T: TaggedUnion>(value: &T, out: &mut Vec<u8>) {
    out.push(value.discriminant());
    value.encode_payload(out);
}

pub fn tagged_len<T: TaggedUnion>(value: &T) -> usize {
    1 + value.payload_len()
}

pub fn decode_tagged<T: TaggedUnion>(reader: &mut Reader<'_>) -> Result<T> {
    T::registry().decode(reader)
}

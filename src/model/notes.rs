//! Footnote and endnote bodies

use super::element::{Element, NoteReference};
use std::collections::BTreeMap;

/// A note body
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Note {
    pub elements: Vec<Element>,
}

/// Notes of one kind, keyed by id. Ids start at 1; OOXML reserves lower
/// ids for its separator notes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notes {
    notes: BTreeMap<u32, Note>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a note body and return a reference to it
    pub fn add(&mut self, elements: Vec<Element>) -> NoteReference {
        let id = self.notes.keys().next_back().map_or(1, |last| last + 1);
        self.notes.insert(id, Note { elements });
        NoteReference { id }
    }

    /// Store a note under a known id (used by the reader)
    pub fn insert(&mut self, id: u32, note: Note) {
        self.notes.insert(id, note);
    }

    pub fn get(&self, id: u32) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Note)> {
        self.notes.iter().map(|(id, n)| (*id, n))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Text;

    #[test]
    fn test_ids_are_sequential() {
        let mut notes = Notes::new();
        let a = notes.add(vec![Element::Text(Text::new("first"))]);
        let b = notes.add(vec![]);
        assert_eq!((a.id, b.id), (1, 2));
        notes.insert(7, Note::default());
        assert_eq!(notes.add(vec![]).id, 8);
        assert_eq!(notes.len(), 4);
    }
}

//! Deduplicated strings behind `u32` handles.
//!
//! The compiler keys terminal rules by the interned canonical predicate
//! text, and rule sets store capture names as [`Symbol`]s.

use std::collections::HashMap;

/// Handle to a string held by an [`Interner`]. Handles compare in the order
/// their strings were first interned.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: HashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        match self.map.get(s) {
            Some(&sym) => sym,
            None => self.insert(s.to_owned()),
        }
    }

    /// Like [`intern`](Self::intern), for keys built on the fly.
    pub fn intern_owned(&mut self, s: String) -> Symbol {
        match self.map.get(&s) {
            Some(&sym) => sym,
            None => self.insert(s),
        }
    }

    fn insert(&mut self, s: String) -> Symbol {
        let sym = Symbol(self.strings.len() as u32);
        self.map.insert(s.clone(), sym);
        self.strings.push(s);
        sym
    }

    /// # Panics
    /// Panics if `sym` comes from another interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Every string with its handle, first-interned first.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (Symbol(i as u32), s.as_str()))
    }
}

//! Append-only string interner backing [`crate::StringId`].
//!
//! Grounded on the `libsolv` `Pool::str2id`/`id2str` shape that
//! `rattler_solve::libsolv_c::wrapper::pool` wraps: a dedicating table from
//! string to small integer, with ids stable for the life of the pool.

use indexmap::IndexSet;

use crate::ids::StringId;

#[derive(Debug, Default)]
pub(crate) struct Interner {
    strings: IndexSet<String>,
}

impl Interner {
    pub(crate) fn intern(&mut self, s: &str) -> StringId {
        if let Some(idx) = self.strings.get_index_of(s) {
            return StringId(idx as u32);
        }
        let (idx, _) = self.strings.insert_full(s.to_string());
        StringId(idx as u32)
    }

    pub(crate) fn resolve(&self, id: StringId) -> &str {
        self.strings
            .get_index(id.0 as usize)
            .expect("StringId minted by this interner must resolve")
    }

    pub(crate) fn lookup(&self, s: &str) -> Option<StringId> {
        self.strings.get_index_of(s).map(|idx| StringId(idx as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedupes() {
        let mut interner = Interner::default();
        let a = interner.intern("zlib");
        let b = interner.intern("zlib");
        let c = interner.intern("openssl");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "zlib");
    }

    #[test]
    fn test_lookup_missing() {
        let interner = Interner::default();
        assert_eq!(interner.lookup("missing"), None);
    }
}

//! Decoding of the attribute-prefix conventions into typed records.
//!
//! Model documents encode graph structure in plain attributes:
//!
//! | Key | Meaning |
//! |---|---|
//! | `id` | document-unique guid |
//! | `relid` | identifier unique among siblings |
//! | `isMeta` | `"true"` marks a meta-type definition |
//! | `base` | guid of the base (meta-type) entity |
//! | `atr-<name>` | plain attribute |
//! | `rel-<name>-<n>` | pointer to one guid |
//! | `set-<name>-<n>` | space-delimited list of member guids |
//! | `invrel-<name>-<n>` | one member guid of an inverse collection |
//!
//! Each element's attributes are classified once, when the document is
//! built, into a [`Record`]. Pointer and set lookups match any key whose
//! remainder after the prefix starts with the requested name, so `next`
//! finds `rel-next-0` and `rel-next-0` alike.

use indexmap::IndexMap;

const GUID_KEY: &str = "id";
const RELID_KEY: &str = "relid";
const META_KEY: &str = "isMeta";
const BASE_KEY: &str = "base";

const ATTRIBUTE_PREFIX: &str = "atr-";
const POINTER_PREFIX: &str = "rel-";
const SET_PREFIX: &str = "set-";
const COLLECTION_PREFIX: &str = "invrel-";

/// The decoded model view of one element's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    guid: Option<String>,
    relid: Option<String>,
    is_meta: bool,
    base: Option<String>,
    attributes: IndexMap<String, String>,
    pointers: Vec<Reference>,
    sets: Vec<Members>,
    collections: IndexMap<String, Vec<String>>,
}

/// One `rel-<name>-<disambiguator>` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reference {
    /// Key with the `rel-` prefix stripped.
    rest: String,
    name_len: usize,
    guid: String,
}

impl Reference {
    fn name(&self) -> &str {
        &self.rest[..self.name_len]
    }

    fn disambiguator(&self) -> &str {
        self.rest[self.name_len..].trim_start_matches('-')
    }
}

/// One `set-<name>-<disambiguator>` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Members {
    rest: String,
    name_len: usize,
    guids: Vec<String>,
}

impl Record {
    /// Classify raw attributes, given in document order.
    pub fn decode<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut record = Self::default();

        for (key, value) in attributes {
            match key {
                GUID_KEY => record.guid = Some(value.to_owned()),
                RELID_KEY => record.relid = Some(value.to_owned()),
                META_KEY => record.is_meta = value == "true",
                BASE_KEY => {
                    // An empty base names no entity.
                    record.base = Some(value.to_owned()).filter(|guid| !guid.is_empty());
                }
                _ => record.decode_prefixed(key, value),
            }
        }

        record
    }

    fn decode_prefixed(&mut self, key: &str, value: &str) {
        if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            self.attributes.insert(name.to_owned(), value.to_owned());
        } else if let Some(rest) = key.strip_prefix(POINTER_PREFIX) {
            self.pointers.push(Reference {
                rest: rest.to_owned(),
                name_len: split_name(rest).0.len(),
                guid: value.to_owned(),
            });
        } else if let Some(rest) = key.strip_prefix(SET_PREFIX) {
            let guids = value
                .split(' ')
                .filter(|guid| !guid.is_empty())
                .map(str::to_owned)
                .collect();
            self.sets.push(Members {
                rest: rest.to_owned(),
                name_len: split_name(rest).0.len(),
                guids,
            });
        } else if let Some(rest) = key.strip_prefix(COLLECTION_PREFIX) {
            let (name, _) = split_name(rest);
            self.collections
                .entry(name.to_owned())
                .or_default()
                .push(value.to_owned());
        }
    }

    /// The `id` attribute.
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// The raw `relid` attribute, without the leading `/`.
    pub fn relid(&self) -> Option<&str> {
        self.relid.as_deref()
    }

    /// Whether `isMeta` is exactly `"true"`.
    pub fn is_meta(&self) -> bool {
        self.is_meta
    }

    /// The guid held by the `base` attribute.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// The value of the `atr-<name>` attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Logical attribute names in document order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Target guid of the `rel-` key whose remainder starts with `name`.
    ///
    /// When several keys match, the lowest disambiguator wins: numeric
    /// disambiguators in numeric order first, then the rest in lexical
    /// order, then document order.
    pub fn pointer(&self, name: &str) -> Option<&str> {
        self.pointers
            .iter()
            .filter(|reference| reference.rest.starts_with(name))
            .min_by(|a, b| {
                disambiguator_key(a.disambiguator()).cmp(&disambiguator_key(b.disambiguator()))
            })
            .map(|reference| reference.guid.as_str())
    }

    /// Distinct pointer names in order of first appearance.
    pub fn pointer_names(&self) -> impl Iterator<Item = &str> {
        distinct(self.pointers.iter().map(Reference::name))
    }

    /// Member guids of the `set-` key whose remainder starts with `name`,
    /// in the order given.
    ///
    /// When several keys match, the later key in document order wins.
    pub fn set(&self, name: &str) -> Option<&[String]> {
        self.sets
            .iter()
            .rev()
            .find(|members| members.rest.starts_with(name))
            .map(|members| members.guids.as_slice())
    }

    /// Distinct set names in order of first appearance.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        distinct(self.sets.iter().map(|members| &members.rest[..members.name_len]))
    }

    /// Member guids of the inverse collection `name`, merged across keys.
    pub fn collection(&self, name: &str) -> Option<&[String]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Distinct collection names in order of first appearance.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Member guids of every collection, grouped by collection name.
    pub fn collection_guids(&self) -> impl Iterator<Item = &str> {
        self.collections.values().flatten().map(String::as_str)
    }
}

/// Split `<name>-<disambiguator>` at the last `-`.
///
/// A key without any `-` is all name with an empty disambiguator.
fn split_name(rest: &str) -> (&str, &str) {
    rest.rsplit_once('-').unwrap_or((rest, ""))
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    let mut seen = Vec::new();
    names.filter(move |name| {
        if seen.contains(name) {
            false
        } else {
            seen.push(*name);
            true
        }
    })
}

/// Sort key putting numeric disambiguators first, in numeric order.
fn disambiguator_key(disambiguator: &str) -> (bool, u64, &str) {
    match disambiguator.parse::<u64>() {
        Ok(number) => (false, number, disambiguator),
        Err(_) => (true, 0, disambiguator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(attributes: &[(&str, &str)]) -> Record {
        Record::decode(attributes.iter().copied())
    }

    #[test]
    fn test_identity_and_meta() {
        let record = decode(&[
            ("id", "m1"),
            ("relid", "7"),
            ("isMeta", "true"),
            ("base", "m0"),
        ]);

        assert_eq!(record.guid(), Some("m1"));
        assert_eq!(record.relid(), Some("7"));
        assert!(record.is_meta());
        assert_eq!(record.base(), Some("m0"));
    }

    #[test]
    fn test_is_meta_requires_literal_true() {
        assert!(!decode(&[("isMeta", "True")]).is_meta());
        assert!(!decode(&[("isMeta", "1")]).is_meta());
        assert!(!decode(&[]).is_meta());
    }

    #[test]
    fn test_plain_attributes_strip_prefix() {
        let record = decode(&[("atr-name", "s1"), ("atr-initial", "false"), ("name", "x")]);

        assert_eq!(record.attribute("name"), Some("s1"));
        assert_eq!(
            record.attribute_names().collect::<Vec<_>>(),
            vec!["name", "initial"]
        );
    }

    #[test]
    fn test_pointer_name_strips_disambiguator() {
        let record = decode(&[("rel-next-0", "i2"), ("rel-src-dst-3", "i9")]);

        assert_eq!(record.pointer("next"), Some("i2"));
        assert_eq!(record.pointer("src-dst"), Some("i9"));
        assert_eq!(
            record.pointer_names().collect::<Vec<_>>(),
            vec!["next", "src-dst"]
        );
    }

    #[test]
    fn test_pointer_matches_name_prefix() {
        let record = decode(&[("id", "a"), ("rel-next-0", "b"), ("set-roles-1", "b")]);

        assert_eq!(record.pointer("next"), Some("b"));
        assert_eq!(record.pointer("nex"), Some("b"));
        assert_eq!(record.pointer("next-0"), Some("b"));
        assert_eq!(record.pointer("prev"), None);
        assert_eq!(record.set("role").unwrap(), &["b".to_owned()]);
        assert_eq!(record.set("roles-1").unwrap(), &["b".to_owned()]);
        assert!(record.set("rules").is_none());
    }

    #[test]
    fn test_prefix_matches_keep_lowest_disambiguator() {
        let record = decode(&[("rel-nextState-4", "far"), ("rel-next-1", "near")]);

        assert_eq!(record.pointer("next"), Some("near"));
        assert_eq!(record.pointer("nextS"), Some("far"));
        assert_eq!(
            record.pointer_names().collect::<Vec<_>>(),
            vec!["nextState", "next"]
        );
    }

    #[test]
    fn test_empty_base_is_no_base() {
        assert_eq!(decode(&[("base", "")]).base(), None);
        assert_eq!(decode(&[("base", "m0")]).base(), Some("m0"));
    }

    #[test]
    fn test_pointer_lowest_disambiguator_wins() {
        let record = decode(&[
            ("rel-next-10", "late"),
            ("rel-next-b", "word"),
            ("rel-next-2", "early"),
        ]);
        assert_eq!(record.pointer("next"), Some("early"));
        assert_eq!(record.pointer_names().count(), 1);
    }

    #[test]
    fn test_pointer_without_disambiguator() {
        let record = decode(&[("rel-owner", "g1")]);
        assert_eq!(record.pointer("owner"), Some("g1"));
    }

    #[test]
    fn test_set_keeps_order_and_duplicates() {
        let record = decode(&[("set-roles-1", "g1 g2  g1 g3")]);
        assert_eq!(
            record.set("roles").unwrap(),
            &["g1", "g2", "g1", "g3"].map(String::from)
        );
    }

    #[test]
    fn test_set_later_key_replaces_earlier() {
        let record = decode(&[("set-roles-1", "g1 g2"), ("set-roles-2", "g3")]);
        assert_eq!(record.set("roles").unwrap(), &["g3".to_owned()]);
        assert_eq!(record.set_names().collect::<Vec<_>>(), vec!["roles"]);
    }

    #[test]
    fn test_collections_merge_across_keys() {
        let record = decode(&[
            ("invrel-incoming-0", "g1"),
            ("invrel-outgoing-0", "g7"),
            ("invrel-incoming-1", "g2"),
        ]);

        assert_eq!(
            record.collection("incoming").unwrap(),
            &["g1".to_owned(), "g2".to_owned()]
        );
        assert_eq!(
            record.collection_names().collect::<Vec<_>>(),
            vec!["incoming", "outgoing"]
        );
        assert_eq!(
            record.collection_guids().collect::<Vec<_>>(),
            vec!["g1", "g2", "g7"]
        );
    }

    #[test]
    fn test_invrel_is_not_mistaken_for_rel() {
        let record = decode(&[("invrel-next-0", "g1")]);
        assert_eq!(record.pointer_names().count(), 0);
        assert_eq!(record.collection("next").unwrap().len(), 1);
    }
}

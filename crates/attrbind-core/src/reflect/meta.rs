use crate::{error::TagError, reflect::bind::Structure};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};
use tracing::trace;

///
/// CONSTANTS
///

/// Tag that removes a field from binding.
pub const EXCLUDE_TAG: &str = "-";

///
/// FieldDecl
///
/// A named structure field and the tag it carries, if any.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldDecl {
    pub field: &'static str,
    pub tag: Option<&'static str>,
}

impl FieldDecl {
    #[must_use]
    pub const fn new(field: &'static str, tag: Option<&'static str>) -> Self {
        Self { field, tag }
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.tag == Some(EXCLUDE_TAG)
    }
}

///
/// FieldSlot
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSlot {
    pub tag: &'static str,
    pub field: &'static str,
    pub index: usize,
}

///
/// StructMeta
///
/// Validated tag layout of one structure type.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StructMeta {
    slots: Vec<FieldSlot>,
    by_tag: HashMap<&'static str, usize>,
}

impl StructMeta {
    /// Validate every tag in declaration order. The first problem wins.
    pub fn build(decls: &[FieldDecl]) -> Result<Self, TagError> {
        let mut meta = Self::default();

        for (index, decl) in decls.iter().enumerate() {
            let Some(tag) = decl.tag else {
                return Err(TagError::Missing { field: decl.field });
            };
            if decl.is_excluded() {
                continue;
            }
            if !is_valid_tag(tag) {
                return Err(TagError::Invalid {
                    field: decl.field,
                    tag,
                });
            }
            if let Some(&prior) = meta.by_tag.get(tag) {
                return Err(TagError::Duplicate {
                    tag,
                    first: meta.slots[prior].field,
                    second: decl.field,
                });
            }

            meta.by_tag.insert(tag, meta.slots.len());
            meta.slots.push(FieldSlot {
                tag,
                field: decl.field,
                index,
            });
        }

        Ok(meta)
    }

    /// Bound fields in declaration order.
    #[must_use]
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, tag: &str) -> Option<&FieldSlot> {
        self.by_tag.get(tag).map(|&i| &self.slots[i])
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }
}

/// `^[a-z][a-z0-9_]*$`
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();

    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// ============================================================================
// Cache
// ============================================================================

type MetaEntry = Arc<Result<StructMeta, TagError>>;

static META_CACHE: LazyLock<RwLock<HashMap<TypeId, MetaEntry>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Metadata for the structure's type, built on first use. Tag errors are
/// cached as well, so a broken type is only analysed once.
pub fn struct_meta(structure: &dyn Structure) -> MetaEntry {
    let key = structure.meta_key();

    if let Some(entry) = META_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Arc::clone(entry);
    }

    let built = Arc::new(StructMeta::build(structure.field_decls()));
    trace!(
        fields = structure.field_decls().len(),
        ok = built.is_ok(),
        "struct metadata built"
    );

    let mut cache = META_CACHE.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(key).or_insert(built))
}

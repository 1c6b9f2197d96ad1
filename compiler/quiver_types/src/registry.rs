//! Registry for algebraic datatypes.
//!
//! # Design
//!
//! - Datatypes stored in registration order, addressed by `DatatypeId`
//! - Constructor index: O(1) lookup of owning datatype and arity by name
//! - Constructor names are global: two datatypes may not share one

use quiver_ir::{Datatype, FieldType, Name, SharedInterner};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::RegistryError;

/// Index of a registered datatype.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatatypeId(u32);

impl DatatypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a constructor lookup resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CtorInfo {
    /// Owning datatype.
    pub datatype: DatatypeId,
    /// Position among the datatype's constructors.
    pub index: usize,
    /// Declared number of fields.
    pub arity: usize,
}

/// Registry of every datatype in a program.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    interner: SharedInterner,
    datatypes: Vec<Datatype>,
    by_name: FxHashMap<Name, DatatypeId>,
    ctors: FxHashMap<Name, CtorInfo>,
    /// Constructor names from datatypes whose registration failed. Lookups
    /// of these still fail, but callers can skip follow-on diagnostics.
    rejected: FxHashSet<Name>,
}

impl TypeRegistry {
    pub fn new(interner: SharedInterner) -> Self {
        TypeRegistry {
            interner,
            datatypes: Vec::new(),
            by_name: FxHashMap::default(),
            ctors: FxHashMap::default(),
            rejected: FxHashSet::default(),
        }
    }

    /// Register a datatype.
    ///
    /// Registration is all-or-nothing: on a duplicate type name or a
    /// constructor collision (with any registered datatype, or within
    /// `datatype` itself) nothing is registered and the first conflict is
    /// returned.
    pub fn register(&mut self, datatype: Datatype) -> Result<DatatypeId, RegistryError> {
        match self.conflicts(&datatype).into_iter().next() {
            Some(err) => {
                self.reject(&datatype);
                Err(err)
            }
            None => Ok(self.insert(datatype)),
        }
    }

    /// Register every datatype, collecting all conflicts instead of
    /// stopping at the first one.
    pub fn register_all(
        &mut self,
        datatypes: impl IntoIterator<Item = Datatype>,
    ) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        for datatype in datatypes {
            let conflicts = self.conflicts(&datatype);
            if conflicts.is_empty() {
                self.insert(datatype);
            } else {
                self.reject(&datatype);
                errors.extend(conflicts);
            }
        }
        errors
    }

    /// Owning datatype and arity of a constructor.
    pub fn lookup_constructor(&self, name: Name) -> Result<CtorInfo, RegistryError> {
        self.ctors
            .get(&name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownConstructor {
                name: self.interner.lookup(name).to_owned(),
            })
    }

    /// Whether `name` belonged to a datatype whose registration failed.
    pub fn was_rejected(&self, name: Name) -> bool {
        self.rejected.contains(&name)
    }

    pub fn datatype(&self, id: DatatypeId) -> &Datatype {
        &self.datatypes[id.index()]
    }

    pub fn datatype_by_name(&self, name: Name) -> Option<&Datatype> {
        self.by_name.get(&name).map(|id| self.datatype(*id))
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &Datatype> {
        self.datatypes.iter()
    }

    pub fn len(&self) -> usize {
        self.datatypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datatypes.is_empty()
    }

    /// Check every constructor field names a registered datatype (or `Int`).
    ///
    /// Run once all datatypes are registered, so datatypes may refer to
    /// each other regardless of declaration order.
    pub fn check_field_types(&self) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        for datatype in &self.datatypes {
            for ctor in &datatype.constructors {
                for (field, ty) in ctor.fields.iter().enumerate() {
                    if let FieldType::Named(name) = ty {
                        if !self.by_name.contains_key(name) {
                            errors.push(RegistryError::UnknownType {
                                constructor: self.interner.lookup(ctor.name).to_owned(),
                                field,
                                name: self.interner.lookup(*name).to_owned(),
                            });
                        }
                    }
                }
            }
        }
        errors
    }

    fn conflicts(&self, datatype: &Datatype) -> Vec<RegistryError> {
        let lookup = |name: Name| self.interner.lookup(name).to_owned();

        if self.by_name.contains_key(&datatype.name) {
            return vec![RegistryError::DuplicateType {
                name: lookup(datatype.name),
            }];
        }

        let mut errors = Vec::new();
        let mut seen: FxHashSet<Name> = FxHashSet::default();
        for ctor in &datatype.constructors {
            let existing = if let Some(info) = self.ctors.get(&ctor.name) {
                Some(self.datatype(info.datatype).name)
            } else if !seen.insert(ctor.name) {
                Some(datatype.name)
            } else {
                None
            };
            if let Some(existing) = existing {
                errors.push(RegistryError::DuplicateConstructor {
                    constructor: lookup(ctor.name),
                    datatype: lookup(datatype.name),
                    existing: lookup(existing),
                });
            }
        }
        errors
    }

    fn insert(&mut self, datatype: Datatype) -> DatatypeId {
        let id = DatatypeId(u32::try_from(self.datatypes.len()).unwrap_or(u32::MAX));
        for (index, ctor) in datatype.constructors.iter().enumerate() {
            self.ctors.insert(
                ctor.name,
                CtorInfo {
                    datatype: id,
                    index,
                    arity: ctor.arity(),
                },
            );
        }
        self.by_name.insert(datatype.name, id);
        self.datatypes.push(datatype);
        id
    }

    fn reject(&mut self, datatype: &Datatype) {
        self.rejected
            .extend(datatype.constructors.iter().map(|ctor| ctor.name));
    }
}

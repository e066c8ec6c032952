use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{FixedHashState, HashMap, HashSet};
use crate::info::{ClassInfo, MethodInfo, PropertyInfo};
use crate::reflector::Target;
use crate::registry::{GetClassInfo, class_key};

// -----------------------------------------------------------------------------
// ClassRegistry

/// The set of classes and interfaces a reflector can see.
///
/// Classes are found by name, case-insensitively and with an optional
/// leading `\`, or by the [`TypeId`] of the Rust type backing their
/// instances.
///
/// Parents and interfaces are referenced by name and resolved lazily, so
/// classes may be registered in any order. A name that never gets
/// registered simply ends the chain there.
///
/// # Example
///
/// ```
/// use vc_reflector::registry::ClassRegistry;
/// use vc_reflector::info::ClassBuilder;
///
/// struct Post;
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.try_insert_class(ClassBuilder::<Post>::new("Blog\\Post").build()));
///
/// assert!(registry.contains("blog\\post"));
/// assert!(registry.contains("\\Blog\\Post"));
/// assert_eq!(registry.class_of(&Post).unwrap().name(), "Blog\\Post");
///
/// // Duplicate names are refused.
/// assert!(!registry.try_insert_class(ClassBuilder::<Post>::new("BLOG\\POST").build()));
/// ```
pub struct ClassRegistry {
    classes: Vec<ClassInfo>,
    name_to_index: HashMap<String, usize>,
    type_to_index: HashMap<TypeId, usize>,
    // Rust types already passed to `register`, including interface markers.
    registered_types: HashSet<TypeId>,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create a empty [`ClassRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            classes: Vec::new(),
            name_to_index: HashMap::with_hasher(FixedHashState),
            type_to_index: HashMap::with_hasher(FixedHashState),
            registered_types: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Create a registry holding every auto-registered class.
    ///
    /// Equivalent to [`empty`](Self::empty) followed by
    /// [`auto_register`](Self::auto_register).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Try add or do nothing.
    ///
    /// - If the class name (or its backing [`TypeId`]) is already taken,
    ///   nothing changes and `false` is returned.
    /// - Otherwise the class is inserted and `true` is returned.
    ///
    /// This method will _not_ register dependencies.
    /// Use [`register`](Self::register) to register a class with its dependencies.
    pub fn try_insert_class(&mut self, info: ClassInfo) -> bool {
        let key = class_key(info.name());
        if self.name_to_index.contains_key(&key) {
            log::warn!("class `{}` is already registered, ignoring", info.name());
            return false;
        }
        if let Some(type_id) = info.type_id()
            && let Some(&index) = self.type_to_index.get(&type_id)
        {
            log::warn!(
                "type `{}` already backs class `{}`, ignoring `{}`",
                info.type_name().unwrap_or("?"),
                self.classes[index].name(),
                info.name(),
            );
            return false;
        }

        let index = self.classes.len();
        self.name_to_index.insert(key, index);
        if let Some(type_id) = info.type_id() {
            self.type_to_index.insert(type_id, index);
        }
        self.classes.push(info);
        true
    }

    /// Insert or **Overwrite** a class.
    ///
    /// A class with the same name is replaced in place. Its old backing
    /// [`TypeId`] no longer resolves unless the new class reuses it.
    ///
    /// This method will _not_ register dependencies.
    pub fn insert_class(&mut self, info: ClassInfo) {
        let key = class_key(info.name());
        let Some(&index) = self.name_to_index.get(&key) else {
            if let Some(type_id) = info.type_id()
                && let Some(&old) = self.type_to_index.get(&type_id)
            {
                log::warn!(
                    "class `{}` takes over type `{}` from `{}`",
                    info.name(),
                    info.type_name().unwrap_or("?"),
                    self.classes[old].name(),
                );
            }
            let index = self.classes.len();
            self.name_to_index.insert(key, index);
            if let Some(type_id) = info.type_id() {
                self.type_to_index.insert(type_id, index);
            }
            self.classes.push(info);
            return;
        };

        if let Some(old) = self.classes[index].type_id() {
            self.type_to_index.remove(&old);
        }
        if let Some(type_id) = info.type_id()
            && let Some(old) = self.type_to_index.insert(type_id, index)
            && old != index
        {
            log::warn!(
                "class `{}` takes over type `{}` from `{}`",
                info.name(),
                info.type_name().unwrap_or("?"),
                self.classes[old].name(),
            );
        }
        self.classes[index] = info;
    }

    /// Attempts to register the class `T` if it has not been registered yet.
    ///
    /// This will also register whatever
    /// [`GetClassInfo::register_dependencies`] names, usually the parent
    /// class and the interfaces. Dependencies are only registered the
    /// first time.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_reflector::registry::{ClassRegistry, GetClassInfo};
    /// use vc_reflector::info::{ClassBuilder, ClassInfo};
    ///
    /// struct Shape;
    /// struct Circle { shape: Shape }
    ///
    /// impl GetClassInfo for Shape {
    ///     fn get_class_info() -> ClassInfo {
    ///         ClassBuilder::<Shape>::new("Geo\\Shape").build()
    ///     }
    /// }
    ///
    /// impl GetClassInfo for Circle {
    ///     fn get_class_info() -> ClassInfo {
    ///         ClassBuilder::<Circle>::new("Geo\\Circle")
    ///             .extends("Geo\\Shape", |c| &c.shape, |c| &mut c.shape)
    ///             .build()
    ///     }
    ///
    ///     fn register_dependencies(registry: &mut ClassRegistry) {
    ///         registry.register::<Shape>();
    ///     }
    /// }
    ///
    /// let mut registry = ClassRegistry::empty();
    /// registry.register::<Circle>();
    ///
    /// assert!(registry.contains("Geo\\Circle"));
    /// assert!(registry.contains("Geo\\Shape"));
    /// ```
    pub fn register<T: GetClassInfo>(&mut self) {
        if !self.mark_registered(TypeId::of::<T>()) {
            return;
        }
        if self.try_insert_class(T::get_class_info()) {
            T::register_dependencies(self);
        }
    }

    // Returns `false` if the type was already marked.
    #[inline]
    pub(crate) fn mark_registered(&mut self, type_id: TypeId) -> bool {
        self.registered_types.insert(type_id)
    }

    /// Automatically registers every class declared via
    /// [`impl_auto_register!`](crate::impl_auto_register).
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration is supported on the current
    /// platform, otherwise `false`.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it
    /// does nothing and returns `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.registered_types.contains(&TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_classes(self);
            self.registered_types
                .contains(&TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether a class or interface with the given name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(&class_key(name))
    }

    /// Returns the class or interface registered under `name`.
    ///
    /// The lookup ignores ASCII case and one leading `\`.
    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        match self.name_to_index.get(&class_key(name)) {
            Some(&index) => self.classes.get(index),
            None => None,
        }
    }

    /// Returns the class backed by the Rust type with the given [`TypeId`].
    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&ClassInfo> {
        match self.type_to_index.get(&type_id) {
            Some(&index) => self.classes.get(index),
            None => None,
        }
    }

    /// Returns the class of a live instance.
    #[inline]
    pub fn class_of(&self, instance: &dyn Any) -> Option<&ClassInfo> {
        self.get_by_type_id(instance.type_id())
    }

    /// Resolves the class a [`Target`] refers to.
    pub fn resolve(&self, target: Target<'_>) -> Option<&ClassInfo> {
        match target {
            Target::Instance(instance) => self.class_of(instance),
            Target::Class(name) => self.get(name),
        }
    }

    /// Returns an iterator over every registered class, in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassInfo> {
        self.classes.iter()
    }

    // -------------------------------------------------------------------------
    // Hierarchy

    /// Returns the registered parent of `class`.
    pub fn parent_of(&self, class: &ClassInfo) -> Option<&ClassInfo> {
        self.get(class.parent_name()?)
    }

    /// Iterates `class` and then its registered ancestors, nearest first.
    ///
    /// The walk stops at the first unregistered parent, and after as many
    /// steps as there are classes, so a cyclic declaration cannot hang.
    pub fn ancestors<'a>(
        &'a self,
        class: &'a ClassInfo,
    ) -> impl Iterator<Item = &'a ClassInfo> + 'a {
        core::iter::successors(Some(class), move |current| self.parent_of(current))
            .take(self.classes.len().max(1))
    }

    /// Every interface `class` implements, in declaration order.
    ///
    /// Includes interfaces declared by ancestors and the interfaces those
    /// extend. Names are reported as declared, and an interface that is not
    /// registered is still reported but not expanded.
    pub fn interfaces_of(&self, class: &ClassInfo) -> Vec<&'static str> {
        let mut seen: HashSet<String> = HashSet::with_hasher(FixedHashState);
        let mut names = Vec::new();
        let mut stack: Vec<&'static str> = Vec::new();

        for owner in self.ancestors(class) {
            stack.extend(owner.interfaces().iter().rev());
            while let Some(name) = stack.pop() {
                if !seen.insert(class_key(name)) {
                    continue;
                }
                names.push(name);
                if let Some(interface) = self.get(name) {
                    stack.extend(interface.interfaces().iter().rev());
                }
            }
        }
        names
    }

    /// The classes whose declared members are visible through `class`.
    ///
    /// For a class that is the ancestor chain; for an interface it is the
    /// interface and every interface it extends.
    pub(crate) fn member_scope<'a>(&'a self, class: &'a ClassInfo) -> Vec<&'a ClassInfo> {
        if !class.is_interface() {
            return self.ancestors(class).collect();
        }
        let mut scope = Vec::from([class]);
        for name in self.interfaces_of(class) {
            if let Some(interface) = self.get(name) {
                scope.push(interface);
            }
        }
        scope
    }

    /// Finds a property visible through `class`, with its declaring class.
    ///
    /// Property names are case-sensitive; the nearest declaration wins.
    pub fn find_property<'a>(
        &'a self,
        class: &'a ClassInfo,
        name: &str,
    ) -> Option<(&'a ClassInfo, &'a PropertyInfo)> {
        self.member_scope(class)
            .into_iter()
            .find_map(|owner| owner.property(name).map(|property| (owner, property)))
    }

    /// Finds a method visible through `class`, with its declaring class.
    ///
    /// Method names are case-insensitive; the nearest declaration wins.
    pub fn find_method<'a>(
        &'a self,
        class: &'a ClassInfo,
        name: &str,
    ) -> Option<(&'a ClassInfo, &'a MethodInfo)> {
        self.member_scope(class)
            .into_iter()
            .find_map(|owner| owner.method(name).map(|method| (owner, method)))
    }

    // -------------------------------------------------------------------------
    // Instance views

    /// Views an instance of `from` as an instance of its ancestor `to`.
    ///
    /// Returns `None` if `to` is not on the chain or a link has no
    /// instance projection.
    pub fn upcast<'a>(
        &self,
        from: &ClassInfo,
        to: &ClassInfo,
        instance: &'a dyn Any,
    ) -> Option<&'a dyn Any> {
        let mut current = from;
        let mut view = instance;
        for _ in 0..=self.classes.len() {
            if core::ptr::eq(current, to) {
                return Some(view);
            }
            let link = current.parent()?;
            view = link.upcast(view)?;
            current = self.get(link.name())?;
        }
        None
    }

    /// Mutable version of [`upcast`](Self::upcast).
    pub fn upcast_mut<'a>(
        &self,
        from: &ClassInfo,
        to: &ClassInfo,
        instance: &'a mut dyn Any,
    ) -> Option<&'a mut dyn Any> {
        let mut current = from;
        let mut view = instance;
        for _ in 0..=self.classes.len() {
            if core::ptr::eq(current, to) {
                return Some(view);
            }
            let link = current.parent()?;
            view = link.upcast_mut(view)?;
            current = self.get(link.name())?;
        }
        None
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.classes.iter().map(ClassInfo::name))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

/// A [`ClassRegistry`] shared between threads.
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    /// The wrapped [`ClassRegistry`].
    pub internal: Arc<RwLock<ClassRegistry>>,
}

impl ClassRegistryArc {
    /// Takes a read lock on the underlying [`ClassRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ClassRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use super::{ClassRegistry, ClassRegistryArc};
    use crate::info::{ClassBuilder, ClassInfo, InterfaceBuilder};
    use crate::tests_support::{Model, User, fixture};

    #[test]
    fn lookup_ignores_case_and_leading_backslash() {
        let registry = fixture();
        assert_eq!(registry.get("app\\user").map(ClassInfo::name), Some("App\\User"));
        assert_eq!(registry.get("\\APP\\USER").map(ClassInfo::name), Some("App\\User"));
        assert!(registry.get("\\\\App\\User").is_none());
        assert!(registry.get("User").is_none());
    }

    #[test]
    fn ancestors_nearest_first() {
        let registry = fixture();
        let user = registry.get("App\\User").unwrap();
        let chain: Vec<_> = registry.ancestors(user).map(ClassInfo::name).collect();
        assert_eq!(chain, ["App\\User", "App\\Model"]);
    }

    #[test]
    fn cyclic_parents_terminate() {
        struct A;
        struct B;
        let mut registry = ClassRegistry::empty();
        registry.try_insert_class(ClassBuilder::<A>::new("A").parent("B").build());
        registry.try_insert_class(ClassBuilder::<B>::new("B").parent("A").build());

        let a = registry.get("A").unwrap();
        assert_eq!(registry.ancestors(a).count(), 2);
        assert!(registry.find_method(a, "missing").is_none());
    }

    #[test]
    fn interfaces_are_deduplicated_and_expanded() {
        let registry = fixture();
        let user = registry.get("App\\User").unwrap();
        assert_eq!(
            registry.interfaces_of(user),
            [
                "App\\Contracts\\Named",
                "App\\Contracts\\Labeled",
                "App\\Contracts\\Countable",
            ]
        );
    }

    #[test]
    fn unregistered_interface_is_still_reported() {
        struct Thing;
        let mut registry = ClassRegistry::empty();
        registry.try_insert_class(InterfaceBuilder::new("I").extends("Missing").build());
        registry.try_insert_class(
            ClassBuilder::<Thing>::new("Thing")
                .implements("I")
                .implements("i")
                .build(),
        );

        let thing = registry.get("Thing").unwrap();
        assert_eq!(registry.interfaces_of(thing), ["I", "Missing"]);
    }

    #[test]
    fn upcast_reaches_embedded_parent() {
        let registry = fixture();
        let user = User::sample();
        let from = registry.get("App\\User").unwrap();
        let to = registry.get("App\\Model").unwrap();

        let view = registry.upcast(from, to, &user).unwrap();
        assert!(view.downcast_ref::<Model>().is_some());
        assert!(registry.upcast(to, from, &user.model).is_none());
    }

    #[test]
    fn insert_overwrites_by_name() {
        struct First;
        struct Second;
        let mut registry = ClassRegistry::empty();
        registry.insert_class(ClassBuilder::<First>::new("Slot").constant("N", 1).build());
        registry.insert_class(ClassBuilder::<Second>::new("slot").constant("N", 2).build());

        assert_eq!(registry.len(), 1);
        assert!(registry.class_of(&First).is_none());
        assert_eq!(registry.class_of(&Second).unwrap().name(), "slot");
    }

    #[test]
    fn overwrite_takes_over_type_of_other_class() {
        struct First;
        struct Second;
        let mut registry = ClassRegistry::empty();
        registry.insert_class(ClassBuilder::<First>::new("One").build());
        registry.insert_class(ClassBuilder::<Second>::new("Two").build());
        registry.insert_class(ClassBuilder::<First>::new("two").build());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.class_of(&First).unwrap().name(), "two");
        assert!(registry.class_of(&Second).is_none());
        assert_eq!(registry.get("One").unwrap().name(), "One");
    }

    #[test]
    fn shared_registry_survives_poisoning() {
        struct Post;
        let shared = ClassRegistryArc::default();
        shared.write().try_insert_class(ClassBuilder::<Post>::new("Post").build());
        assert!(shared.read().contains("post"));

        let clone = shared.clone();
        let result = std::thread::spawn(move || {
            let _guard = clone.write();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(shared.internal.is_poisoned());

        assert_eq!(shared.read().len(), 1);
        assert!(shared.write().try_insert_class(ClassBuilder::<()>::new("Unit").build()));
        assert_eq!(format!("{shared:?}"), r#"["Post", "Unit"]"#);
    }
}

use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::Value;
use crate::docs::doc_comment;
use crate::info::ClassInfo;
use crate::reflector::{Target, resolve};
use crate::registry::{ClassRegistry, class_key};

// -----------------------------------------------------------------------------
// Constants

// Own class first, then ancestors, then every implemented interface.
fn constant_sources<'r>(registry: &'r ClassRegistry, class: &'r ClassInfo) -> Vec<&'r ClassInfo> {
    let mut sources: Vec<_> = registry.ancestors(class).collect();
    sources.extend(
        registry
            .interfaces_of(class)
            .into_iter()
            .filter_map(|name| registry.get(name)),
    );
    sources
}

/// Returns the constants of `target`'s class, inherited ones included.
///
/// Own constants come first, then those of each ancestor, then those of
/// the implemented interfaces. A nearer declaration hides a farther one of
/// the same name.
///
/// Returns an empty map if `target` cannot be resolved.
///
/// # Examples
///
/// ```
/// use vc_reflector::Value;
/// use vc_reflector::info::{ClassBuilder, InterfaceBuilder};
/// use vc_reflector::reflector::{self, Target};
/// use vc_reflector::registry::ClassRegistry;
///
/// struct Base;
/// struct Child;
///
/// let mut registry = ClassRegistry::empty();
/// registry.try_insert_class(InterfaceBuilder::new("HasLimit").constant("LIMIT", 10).build());
/// registry.try_insert_class(ClassBuilder::<Base>::new("Base").constant("KIND", "base").build());
/// registry.try_insert_class(
///     ClassBuilder::<Child>::new("Child")
///         .parent("Base")
///         .implements("HasLimit")
///         .constant("KIND", "child")
///         .build(),
/// );
///
/// let constants = reflector::constants(&registry, Target::class("Child"));
/// assert_eq!(constants.len(), 2);
/// assert_eq!(constants["KIND"], Value::from("child"));
/// assert_eq!(constants["LIMIT"], Value::Int(10));
/// ```
pub fn constants(registry: &ClassRegistry, target: Target<'_>) -> IndexMap<&'static str, Value> {
    let mut constants = IndexMap::new();
    let Some(class) = resolve(registry, target) else {
        return constants;
    };
    for source in constant_sources(registry, class) {
        for (&name, value) in source.constants() {
            constants.entry(name).or_insert_with(|| value.clone());
        }
    }
    constants
}

/// Returns one constant of `target`'s class, looked up as
/// [`constants`] does. Constant names are case-sensitive.
pub fn get_constant(registry: &ClassRegistry, target: Target<'_>, name: &str) -> Option<Value> {
    let class = resolve(registry, target)?;
    let value = constant_sources(registry, class)
        .into_iter()
        .find_map(|source| source.constants().get(name));
    if value.is_none() {
        log::debug!("constant {}::{name} does not exist", class.name());
    }
    value.cloned()
}

#[inline]
pub fn has_constant(registry: &ClassRegistry, target: Target<'_>, name: &str) -> bool {
    get_constant(registry, target, name).is_some()
}

// -----------------------------------------------------------------------------
// Hierarchy

/// Returns the declared name of `target`'s class.
///
/// Useful to canonicalize a case-insensitive class name, or to find the
/// class of an instance.
pub fn class_name<'r>(registry: &'r ClassRegistry, target: Target<'_>) -> Option<&'r str> {
    resolve(registry, target).map(ClassInfo::name)
}

/// Returns the name of the immediate parent class.
///
/// The registered spelling is preferred; a parent that is declared but not
/// registered is reported as declared. Returns `None` for a class without
/// a parent or an unresolvable target.
pub fn parent_class<'r>(registry: &'r ClassRegistry, target: Target<'_>) -> Option<&'r str> {
    let class = resolve(registry, target)?;
    let declared = class.parent_name()?;
    match registry.get(declared) {
        Some(parent) => Some(parent.name()),
        None => Some(declared),
    }
}

/// Returns every interface implemented by `target`'s class.
///
/// Interfaces of ancestors and the interfaces those extend are included,
/// each once. Returns an empty `Vec` if `target` cannot be resolved.
pub fn interface_names<'r>(registry: &'r ClassRegistry, target: Target<'_>) -> Vec<&'r str> {
    match resolve(registry, target) {
        Some(class) => registry.interfaces_of(class),
        None => Vec::new(),
    }
}

/// Whether `target`'s class implements `interface`, directly or not.
///
/// Interface names are compared like class names.
pub fn implements_interface(registry: &ClassRegistry, target: Target<'_>, interface: &str) -> bool {
    let key = class_key(interface);
    interface_names(registry, target)
        .into_iter()
        .any(|name| class_key(name) == key)
}

/// Whether `target`'s class extends `class` or implements it as an
/// interface. A class is not a subclass of itself.
pub fn is_subclass_of(registry: &ClassRegistry, target: Target<'_>, class: &str) -> bool {
    let Some(this) = resolve(registry, target) else {
        return false;
    };
    let key = class_key(class);
    registry
        .ancestors(this)
        .filter_map(ClassInfo::parent_name)
        .any(|parent| class_key(parent) == key)
        || implements_interface(registry, target, class)
}

// -----------------------------------------------------------------------------
// Docs

/// Returns the doc comment of `target`'s class, see [`doc_comment`].
pub fn class_doc_comment(
    registry: &ClassRegistry,
    target: Target<'_>,
    strip_tags: bool,
) -> Option<String> {
    let class = resolve(registry, target)?;
    doc_comment(class.docs(), strip_tags)
}

/// Returns the doc comment of a method, see [`doc_comment`].
///
/// `None` if the method is missing or undocumented.
pub fn method_doc_comment(
    registry: &ClassRegistry,
    target: Target<'_>,
    method: &str,
    strip_tags: bool,
) -> Option<String> {
    let class = resolve(registry, target)?;
    let (_, method) = registry.find_method(class, method)?;
    doc_comment(method.docs(), strip_tags)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{
        class_doc_comment, class_name, constants, get_constant, has_constant, implements_interface,
        interface_names, is_subclass_of, method_doc_comment, parent_class,
    };
    use crate::Value;
    use crate::reflector::Target;
    use crate::tests_support::{Secret, User, fixture};

    #[test]
    fn parent_is_immediate_only() {
        let registry = fixture();
        let user = User::sample();
        assert_eq!(parent_class(&registry, Target::object(&user)), Some("App\\Model"));
        assert_eq!(parent_class(&registry, Target::class("App\\Model")), None);
        assert_eq!(parent_class(&registry, Target::class("App\\Nope")), None);
    }

    #[test]
    fn interfaces_include_extended_ones() {
        let registry = fixture();
        let names = interface_names(&registry, Target::class("App\\User"));
        assert_eq!(names.len(), 3);
        for expected in [
            "App\\Contracts\\Countable",
            "App\\Contracts\\Named",
            "App\\Contracts\\Labeled",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }

        assert!(interface_names(&registry, Target::class("App\\Secret")).is_empty());
        assert!(interface_names(&registry, Target::class("App\\Nope")).is_empty());
        assert_eq!(
            interface_names(&registry, Target::class("App\\Contracts\\Named")),
            ["App\\Contracts\\Labeled"]
        );
    }

    #[test]
    fn constants_shadow_by_distance() {
        let registry = fixture();
        let user = User::sample();
        let all = constants(&registry, Target::object(&user));
        let names: Vec<_> = all.keys().copied().collect();
        assert_eq!(names, ["TABLE", "VERSION", "SEPARATOR", "COUNT_NORMAL"]);
        assert_eq!(all["TABLE"], Value::from("users"));
        // `Named` redeclares the separator of `Labeled`.
        assert_eq!(all["SEPARATOR"], Value::from(" - "));

        assert_eq!(
            get_constant(&registry, Target::class("App\\Model"), "TABLE"),
            Some(Value::from("models"))
        );
        assert!(has_constant(&registry, Target::class("App\\User"), "COUNT_NORMAL"));
        assert!(!has_constant(&registry, Target::class("App\\User"), "table"));
        assert!(constants(&registry, Target::class("App\\Nope")).is_empty());
    }

    #[test]
    fn subclass_and_interface_checks() {
        let registry = fixture();
        let user = User::sample();
        assert!(is_subclass_of(&registry, Target::object(&user), "app\\model"));
        assert!(is_subclass_of(&registry, Target::object(&user), "\\App\\Contracts\\Labeled"));
        assert!(!is_subclass_of(&registry, Target::object(&user), "App\\User"));
        let model = Target::class("App\\Model");
        assert!(implements_interface(&registry, model, "App\\Contracts\\Countable"));
        assert!(!implements_interface(&registry, model, "App\\Contracts\\Named"));
    }

    #[test]
    fn class_name_is_canonical() {
        let registry = fixture();
        let secret = Secret {
            token: "t".into(),
            pin: 1,
        };
        assert_eq!(class_name(&registry, Target::object(&secret)), Some("App\\Secret"));
        assert_eq!(class_name(&registry, Target::class("\\app\\SECRET")), Some("App\\Secret"));
        assert_eq!(class_name(&registry, Target::class("Secret")), None);
    }

    #[test]
    fn doc_comments() {
        let registry = fixture();
        assert_eq!(
            class_doc_comment(&registry, Target::class("App\\Model"), true).as_deref(),
            Some("Base model.")
        );
        assert_eq!(
            class_doc_comment(&registry, Target::class("App\\User"), false).as_deref(),
            Some("/**\n * A registered user.\n * @property-read string $name\n */")
        );
        assert_eq!(class_doc_comment(&registry, Target::class("App\\Secret"), true), None);

        assert_eq!(
            method_doc_comment(&registry, Target::class("App\\User"), "getid", true).as_deref(),
            Some("Returns the primary key.")
        );
        assert_eq!(
            method_doc_comment(&registry, Target::class("App\\User"), "greet", true).as_deref(),
            Some("")
        );
        assert_eq!(method_doc_comment(&registry, Target::class("App\\User"), "hash", true), None);
        assert_eq!(
            method_doc_comment(&registry, Target::class("App\\User"), "missing", false),
            None
        );
    }
}

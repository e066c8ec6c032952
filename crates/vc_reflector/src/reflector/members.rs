use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::hash::{FixedHashState, HashSet};
use crate::info::{ClassInfo, Invoker, MethodInfo, ParamInfo};
use crate::reflector::{InvokeError, Target, TargetMut, resolve};
use crate::registry::ClassRegistry;
use crate::{Arguments, Value, Visibility, VisibilityFilter};

// -----------------------------------------------------------------------------
// MethodHandle

/// A method as seen through a class: the method and the class declaring it.
#[derive(Clone, Copy, Debug)]
pub struct MethodHandle<'r> {
    class: &'r ClassInfo,
    method: &'r MethodInfo,
}

impl<'r> MethodHandle<'r> {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.method.name()
    }

    /// Returns the class that declares the method, which may be an ancestor
    /// of the class it was looked up on.
    #[inline]
    pub const fn declaring_class(&self) -> &'r ClassInfo {
        self.class
    }

    #[inline]
    pub const fn method(&self) -> &'r MethodInfo {
        self.method
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.method.visibility()
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.method.is_static()
    }

    #[inline]
    pub const fn is_abstract(&self) -> bool {
        self.method.is_abstract()
    }

    #[inline]
    pub fn parameters(&self) -> &'r [ParamInfo] {
        self.method.parameters()
    }

    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.method.docs()
    }
}

// -----------------------------------------------------------------------------
// Enumeration

/// Snapshots the properties of `target` whose visibility passes `filter`.
///
/// Properties are listed most-derived class first. A name declared again by
/// a subclass hides the ancestor's property even if the subclass's one is
/// filtered out.
///
/// - Static properties are always included.
/// - Public instance properties are included even when unset, as `Null`.
/// - Protected and private instance properties are included only when set.
/// - A bare class target has no instance, so it lists static properties only.
///
/// Returns an empty map if `target` cannot be resolved.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility, VisibilityFilter};
/// use vc_reflector::info::ClassBuilder;
/// use vc_reflector::reflector::{self, Target};
/// use vc_reflector::registry::ClassRegistry;
///
/// struct Account { owner: String, pin: Option<i64> }
///
/// let mut registry = ClassRegistry::empty();
/// registry.try_insert_class(
///     ClassBuilder::<Account>::new("Bank\\Account")
///         .field("owner", Visibility::Public, |a| &a.owner, |a| &mut a.owner)
///         .optional_field("pin", Visibility::Private, |a| &a.pin, |a| &mut a.pin)
///         .build(),
/// );
///
/// let account = Account { owner: "bob".into(), pin: None };
/// let all = reflector::properties(&registry, Target::object(&account), VisibilityFilter::all());
/// assert_eq!(all.len(), 1);
/// assert_eq!(all["owner"], Value::from("bob"));
///
/// let private =
///     reflector::properties(&registry, Target::object(&account), VisibilityFilter::PRIVATE);
/// assert!(private.is_empty());
/// ```
pub fn properties(
    registry: &ClassRegistry,
    target: Target<'_>,
    filter: VisibilityFilter,
) -> IndexMap<&'static str, Value> {
    let mut snapshot = IndexMap::new();
    let Some(class) = resolve(registry, target) else {
        return snapshot;
    };

    let mut seen: HashSet<&'static str> = HashSet::with_hasher(FixedHashState);
    for owner in registry.member_scope(class) {
        let view = match target.instance() {
            Some(instance) => registry.upcast(class, owner, instance),
            None => None,
        };
        for property in owner.properties() {
            if !seen.insert(property.name()) || !filter.accepts(property.visibility()) {
                continue;
            }
            if property.is_static() {
                if let Some(value) = property.static_value() {
                    snapshot.insert(property.name(), value);
                }
                continue;
            }
            let Some(view) = view else {
                continue;
            };
            match property.read(view) {
                Some(value) => {
                    snapshot.insert(property.name(), value);
                }
                None if property.visibility().is_public() => {
                    snapshot.insert(property.name(), Value::Null);
                }
                None => {}
            }
        }
    }
    snapshot
}

/// Lists the methods of `target` whose visibility passes `filter`.
///
/// Methods are listed most-derived class first; an override hides the
/// ancestor's method. Static and instance methods are both listed, whatever
/// the target form.
///
/// Returns an empty map if `target` cannot be resolved.
pub fn methods<'r>(
    registry: &'r ClassRegistry,
    target: Target<'_>,
    filter: VisibilityFilter,
) -> IndexMap<&'static str, MethodHandle<'r>> {
    let mut table = IndexMap::new();
    let Some(class) = resolve(registry, target) else {
        return table;
    };

    let mut seen = HashSet::with_hasher(FixedHashState);
    for owner in registry.member_scope(class) {
        for method in owner.methods() {
            if !seen.insert(method.name().to_ascii_lowercase())
                || !filter.accepts(method.visibility())
            {
                continue;
            }
            table.insert(method.name(), MethodHandle { class: owner, method });
        }
    }
    table
}

// -----------------------------------------------------------------------------
// Properties

/// Reads one property, whatever its visibility.
///
/// Returns `None` if the target or property cannot be resolved, if the
/// property is unset, or if an instance property is read through a bare
/// class name.
pub fn get_property(registry: &ClassRegistry, target: Target<'_>, name: &str) -> Option<Value> {
    let class = resolve(registry, target)?;
    let Some((owner, property)) = registry.find_property(class, name) else {
        log::debug!("property {}::${name} does not exist", class.name());
        return None;
    };

    if property.is_static() {
        return property.static_value();
    }
    let Some(instance) = target.instance() else {
        log::debug!("property {}::${name} needs an instance", owner.name());
        return None;
    };
    let Some(view) = registry.upcast(class, owner, instance) else {
        log::debug!("instance of {} cannot be viewed as {}", class.name(), owner.name());
        return None;
    };
    property.read(view)
}

/// Writes one property, whatever its visibility.
///
/// Returns `false` if the target or property cannot be resolved, if an
/// instance property is written through a bare class name, or if the
/// property rejects the value.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility};
/// use vc_reflector::info::ClassBuilder;
/// use vc_reflector::reflector::{self, Target, TargetMut};
/// use vc_reflector::registry::ClassRegistry;
///
/// struct Door { locked: bool }
///
/// let mut registry = ClassRegistry::empty();
/// registry.try_insert_class(
///     ClassBuilder::<Door>::new("Door")
///         .field("locked", Visibility::Private, |d| &d.locked, |d| &mut d.locked)
///         .build(),
/// );
///
/// let mut door = Door { locked: false };
/// let target = TargetMut::object(&mut door);
/// assert!(reflector::set_property(&registry, target, "locked", Value::Bool(true)));
/// assert!(door.locked);
///
/// // A string is not a bool.
/// let target = TargetMut::object(&mut door);
/// assert!(!reflector::set_property(&registry, target, "locked", Value::from("no")));
/// // Unknown properties are not created.
/// let target = TargetMut::object(&mut door);
/// assert!(!reflector::set_property(&registry, target, "color", Value::from("red")));
/// ```
pub fn set_property(
    registry: &ClassRegistry,
    target: TargetMut<'_>,
    name: &str,
    value: Value,
) -> bool {
    let Some(class) = resolve(registry, target.as_target()) else {
        return false;
    };
    let Some((owner, property)) = registry.find_property(class, name) else {
        log::debug!("property {}::${name} does not exist", class.name());
        return false;
    };

    let result = if property.is_static() {
        property.set_static_value(value)
    } else {
        let TargetMut::Instance(instance) = target else {
            log::debug!("property {}::${name} needs an instance", owner.name());
            return false;
        };
        let Some(view) = registry.upcast_mut(class, owner, instance) else {
            log::debug!("instance of {} cannot be viewed as {}", class.name(), owner.name());
            return false;
        };
        property.write(view, value)
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            log::debug!("cannot write {}::${name}: {err}", owner.name());
            false
        }
    }
}

/// Whether `target` declares or inherits a property called `name`.
///
/// Property names are case-sensitive.
pub fn has_property(registry: &ClassRegistry, target: Target<'_>, name: &str) -> bool {
    match resolve(registry, target) {
        Some(class) => registry.find_property(class, name).is_some(),
        None => false,
    }
}

// -----------------------------------------------------------------------------
// Methods

/// Whether `target` declares or inherits a method called `name`.
///
/// Method names are case-insensitive.
pub fn has_method(registry: &ClassRegistry, target: Target<'_>, name: &str) -> bool {
    match resolve(registry, target) {
        Some(class) => registry.find_method(class, name).is_some(),
        None => false,
    }
}

/// Invokes a method, whatever its visibility, with positional arguments.
///
/// An instance target binds the method to that instance; a bare class name
/// only allows static methods. Omitted optional arguments are filled with
/// their declared defaults before the body runs.
///
/// Unlike every other reflector operation this one reports failures.
///
/// # Errors
///
/// See [`InvokeError`]: unknown class or unregistered instance, missing
/// method, instance method called statically, abstract method, argument
/// count or type mismatch, or an error raised by the body.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility};
/// use vc_reflector::info::{ClassBuilder, ParamInfo, Signature};
/// use vc_reflector::reflector::{self, InvokeError, TargetMut};
/// use vc_reflector::registry::ClassRegistry;
///
/// struct Counter { hits: i64 }
///
/// let mut registry = ClassRegistry::empty();
/// registry.try_insert_class(
///     ClassBuilder::<Counter>::new("Counter")
///         .method(
///             Signature::new("bump", Visibility::Private)
///                 .with_param(ParamInfo::new("by").with_type("int").with_default(1)),
///             |c, mut args| {
///                 c.hits += args.take::<i64>(0)?;
///                 Ok(Value::Int(c.hits))
///             },
///         )
///         .build(),
/// );
///
/// let mut counter = Counter { hits: 0 };
/// let bumped = reflector::call_method(&registry, TargetMut::object(&mut counter), "bump", vec![]);
/// assert_eq!(bumped, Ok(Value::Int(1)));
///
/// let err = reflector::call_method(&registry, TargetMut::class("Counter"), "bump", vec![]);
/// assert!(matches!(err, Err(InvokeError::NonStaticCall { .. })));
/// ```
pub fn call_method(
    registry: &ClassRegistry,
    target: TargetMut<'_>,
    name: &str,
    args: Vec<Value>,
) -> Result<Value, InvokeError> {
    let class = match &target {
        TargetMut::Instance(instance) => registry
            .class_of(&**instance)
            .ok_or(InvokeError::UnregisteredInstance)?,
        TargetMut::Class(class) => registry
            .get(class)
            .ok_or_else(|| InvokeError::UnknownClass((*class).into()))?,
    };
    let Some((owner, method)) = registry.find_method(class, name) else {
        return Err(InvokeError::MethodNotFound {
            class: class.name(),
            method: name.into(),
        });
    };

    let result = match (method.invoker(), target) {
        (Invoker::Abstract, _) => Err(InvokeError::AbstractMethod {
            class: owner.name(),
            method: method.name(),
        }),
        (Invoker::Instance(_), TargetMut::Class(_)) => Err(InvokeError::NonStaticCall {
            class: owner.name(),
            method: method.name(),
        }),
        (Invoker::Static(body), _) => body(bind_arguments(owner, method, args)?),
        (Invoker::Instance(body), TargetMut::Instance(instance)) => {
            let args = bind_arguments(owner, method, args)?;
            let receiver = registry
                .upcast_mut(class, owner, instance)
                .ok_or(InvokeError::InstanceMismatch { class: owner.name() })?;
            body(receiver, args)
        }
    };

    if result.is_ok() {
        log::trace!("called {}::{}()", owner.name(), method.name());
    }
    result
}

/// Checks `args` against the signature and appends omitted defaults.
fn bind_arguments(
    owner: &ClassInfo,
    method: &MethodInfo,
    args: Vec<Value>,
) -> Result<Arguments, InvokeError> {
    let signature = method.signature();
    let params = signature.parameters();
    let given = args.len();

    let required = signature.required_parameter_count();
    if given < required {
        return Err(InvokeError::TooFewArguments {
            class: owner.name(),
            method: method.name(),
            expected: required,
            given,
        });
    }
    if given > params.len() && !signature.is_variadic() {
        return Err(InvokeError::TooManyArguments {
            class: owner.name(),
            method: method.name(),
            expected: params.len(),
            given,
        });
    }

    for (index, value) in args.iter().enumerate() {
        // Extra arguments all bind to the variadic tail.
        let Some(param) = params.get(index).or(params.last()) else {
            break;
        };
        if !param.accepts(value) {
            return Err(InvokeError::ArgumentType {
                class: owner.name(),
                method: method.name(),
                position: index + 1,
                param: param.name(),
                expected: param.declared_type().unwrap_or("mixed"),
                found: value.type_name(),
            });
        }
    }

    let mut bound = Arguments::from(args);
    for param in params.iter().skip(given) {
        let Some(default) = param.default_value() else {
            break;
        };
        bound.push(default.clone());
    }
    Ok(bound)
}

// -----------------------------------------------------------------------------
// Tests

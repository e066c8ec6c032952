use alloc::string::String;
use alloc::vec::Vec;

use crate::Value;
use crate::docs::param_tags;
use crate::reflector::{Target, resolve};
use crate::registry::ClassRegistry;

// -----------------------------------------------------------------------------
// ParameterDescriptor

/// One method parameter: its declared signature merged with its `@param`
/// doc tag.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    /// Zero-based.
    pub position: usize,
    /// Declared type without the nullable `?`; `None` when untyped.
    pub type_name: Option<&'static str>,
    pub allows_null: bool,
    /// The parameter and every one after it may be omitted.
    pub is_optional: bool,
    pub has_default: bool,
    /// Meaningful only when `has_default`.
    pub default_value: Option<Value>,
    pub is_variadic: bool,
    pub is_by_ref: bool,
    /// Type from the matching `@param` tag.
    pub doc_type: Option<String>,
    /// Description from the matching `@param` tag.
    pub doc_description: Option<String>,
}

/// Describes every parameter of `method`, in declaration order.
///
/// Returns an empty `Vec` if `target` cannot be resolved or has no such
/// method. A parameter without a matching `@param` tag gets `None` doc
/// fields.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility};
/// use vc_reflector::info::{ClassBuilder, ParamInfo, Signature};
/// use vc_reflector::reflector::{self, Target};
/// use vc_reflector::registry::ClassRegistry;
///
/// struct Mailer;
///
/// let mut registry = ClassRegistry::empty();
/// registry.try_insert_class(
///     ClassBuilder::<Mailer>::new("Mailer")
///         .method(
///             Signature::new("send", Visibility::Public)
///                 .with_docs("/**\n * @param string $to Recipient address\n */")
///                 .with_params([
///                     ParamInfo::new("to").with_type("string"),
///                     ParamInfo::new("retries").with_type("?int").with_default(3),
///                 ]),
///             |_, _| Ok(Value::Null),
///         )
///         .build(),
/// );
///
/// let params = reflector::method_parameters(&registry, Target::class("Mailer"), "send");
/// assert_eq!(params.len(), 2);
///
/// assert_eq!(params[0].doc_description.as_deref(), Some("Recipient address"));
/// assert!(!params[0].is_optional);
///
/// assert_eq!(params[1].position, 1);
/// assert_eq!(params[1].type_name, Some("int"));
/// assert!(params[1].allows_null);
/// assert_eq!(params[1].default_value, Some(Value::Int(3)));
/// assert_eq!(params[1].doc_type, None);
///
/// assert!(reflector::method_parameters(&registry, Target::class("Mailer"), "missing").is_empty());
/// ```
pub fn method_parameters(
    registry: &ClassRegistry,
    target: Target<'_>,
    method: &str,
) -> Vec<ParameterDescriptor> {
    let Some(class) = resolve(registry, target) else {
        return Vec::new();
    };
    let Some((_, method)) = registry.find_method(class, method) else {
        log::debug!("method {}::{method}() does not exist", class.name());
        return Vec::new();
    };

    let signature = method.signature();
    let mut tags = method.docs().map(param_tags).unwrap_or_default();

    signature
        .parameters()
        .iter()
        .enumerate()
        .map(|(position, param)| {
            let tag = tags.swap_remove(param.name());
            ParameterDescriptor {
                name: param.name(),
                position,
                type_name: param.type_name(),
                allows_null: param.allows_null(),
                is_optional: signature.is_optional(position),
                has_default: param.has_default(),
                default_value: param.default_value().cloned(),
                is_variadic: param.is_variadic(),
                is_by_ref: param.is_by_ref(),
                doc_type: tag.as_ref().map(|tag| tag.doc_type.clone()),
                doc_description: tag.and_then(|tag| tag.description),
            }
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::method_parameters;
    use crate::Value;
    use crate::reflector::Target;
    use crate::tests_support::{User, fixture};

    #[test]
    fn documented_default_parameter() {
        let registry = fixture();
        let user = User::sample();
        let params = method_parameters(&registry, Target::object(&user), "greet");

        assert_eq!(params.len(), 1);
        let name = &params[0];
        assert_eq!(name.name, "name");
        assert_eq!(name.position, 0);
        assert_eq!(name.type_name, Some("string"));
        assert!(!name.allows_null);
        assert!(name.is_optional);
        assert!(name.has_default);
        assert_eq!(name.default_value, Some(Value::from("default")));
        assert_eq!(name.doc_type.as_deref(), Some("string"));
        assert_eq!(name.doc_description.as_deref(), Some("desc here"));
    }

    #[test]
    fn variadic_and_untagged_description() {
        let registry = fixture();
        let params = method_parameters(&registry, Target::class("App\\User"), "tag");

        assert_eq!(params[0].doc_description.as_deref(), Some("The first tag"));
        assert!(!params[0].is_optional);

        let rest = &params[1];
        assert!(rest.is_variadic);
        assert!(rest.is_optional);
        assert!(!rest.has_default);
        assert_eq!(rest.doc_type.as_deref(), Some("string"));
        assert_eq!(rest.doc_description, None);
    }

    #[test]
    fn by_ref_without_docs() {
        let registry = fixture();
        let params = method_parameters(&registry, Target::class("App\\User"), "swap");

        let left = &params[0];
        assert!(left.is_by_ref);
        assert_eq!(left.type_name, None);
        assert!(left.allows_null);
        assert!(!left.is_optional);
        assert_eq!(left.doc_type, None);

        let right = &params[1];
        assert_eq!(right.type_name, Some("int"));
        assert!(right.allows_null);
        assert_eq!(right.default_value, Some(Value::Null));
    }

    #[test]
    fn inherited_method_and_failures() {
        let registry = fixture();
        let user = User::sample();

        let touch = method_parameters(&registry, Target::object(&user), "TOUCH");
        assert_eq!(touch.len(), 1);
        assert_eq!(touch[0].name, "stamp");

        assert!(method_parameters(&registry, Target::object(&user), "missing").is_empty());
        assert!(method_parameters(&registry, Target::class("App\\Nope"), "greet").is_empty());
        assert!(method_parameters(&registry, Target::class("App\\User"), "name").is_empty());
    }
}

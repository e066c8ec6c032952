//! A small registered class hierarchy shared by unit tests.
//!
//! ```text
//! App\Contracts\Labeled
//!   └─ App\Contracts\Named          App\Contracts\Countable
//!        │                                 │
//! App\User ── extends ──> App\Model ───────┘
//!
//! App\Secret (no parent, private members only)
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{ClassBuilder, ClassInfo, InterfaceBuilder, ParamInfo, Signature};
use crate::reflector::InvokeError;
use crate::registry::{ClassRegistry, GetClassInfo};
use crate::{Value, Visibility};

// -----------------------------------------------------------------------------
// Interfaces

pub(crate) struct Countable;

impl GetClassInfo for Countable {
    fn get_class_info() -> ClassInfo {
        InterfaceBuilder::new("App\\Contracts\\Countable")
            .constant("COUNT_NORMAL", 0)
            .method(Signature::new("count", Visibility::Public))
            .build()
    }
}

pub(crate) struct Labeled;

impl GetClassInfo for Labeled {
    fn get_class_info() -> ClassInfo {
        InterfaceBuilder::new("App\\Contracts\\Labeled")
            .constant("SEPARATOR", ": ")
            .method(Signature::new("label", Visibility::Public))
            .build()
    }
}

pub(crate) struct Named;

impl GetClassInfo for Named {
    fn get_class_info() -> ClassInfo {
        InterfaceBuilder::new("App\\Contracts\\Named")
            .extends("App\\Contracts\\Labeled")
            .constant("SEPARATOR", " - ")
            .method(Signature::new("name", Visibility::Public))
            .build()
    }

    fn register_dependencies(registry: &mut ClassRegistry) {
        registry.register::<Labeled>();
    }
}

// -----------------------------------------------------------------------------
// Model

pub(crate) struct Model {
    pub id: i64,
    pub created: Option<String>,
}

impl GetClassInfo for Model {
    fn get_class_info() -> ClassInfo {
        ClassBuilder::<Model>::new("App\\Model")
            .with_docs("/**\n * Base model.\n *\n * @internal\n */")
            .implements("App\\Contracts\\Countable")
            .constant("TABLE", "models")
            .constant("VERSION", 1)
            .field("id", Visibility::Private, |m| &m.id, |m| &mut m.id)
            .optional_field("created", Visibility::Protected, |m| &m.created, |m| &mut m.created)
            .static_property("instances", Visibility::Protected, 0)
            .method(
                Signature::new("getId", Visibility::Public)
                    .with_docs("/** Returns the primary key. */"),
                |m, _| Ok(Value::Int(m.id)),
            )
            .method(
                Signature::new("touch", Visibility::Protected)
                    .with_param(ParamInfo::new("stamp").with_type("string")),
                |m, mut args| {
                    m.created = Some(args.take(0)?);
                    Ok(Value::Null)
                },
            )
            .method(Signature::new("secret", Visibility::Private), |_, _| {
                Ok(Value::from("model-secret"))
            })
            .method(Signature::new("count", Visibility::Public), |_, _| Ok(Value::Int(1)))
            .build()
    }

    fn register_dependencies(registry: &mut ClassRegistry) {
        registry.register::<Countable>();
    }
}

// -----------------------------------------------------------------------------
// User

pub(crate) struct User {
    pub model: Model,
    pub name: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl User {
    pub(crate) fn sample() -> Self {
        Self {
            model: Model {
                id: 7,
                created: None,
            },
            name: "alice".into(),
            nickname: None,
            email: None,
            age: Some(30),
        }
    }
}

impl GetClassInfo for User {
    fn get_class_info() -> ClassInfo {
        ClassBuilder::<User>::new("App\\User")
            .with_docs("/**\n * A registered user.\n * @property-read string $name\n */")
            .extends("App\\Model", |u| &u.model, |u| &mut u.model)
            .implements("App\\Contracts\\Named")
            .constant("TABLE", "users")
            .field("name", Visibility::Private, |u| &u.name, |u| &mut u.name)
            .optional_field("nickname", Visibility::Private, |u| &u.nickname, |u| &mut u.nickname)
            .optional_field("email", Visibility::Public, |u| &u.email, |u| &mut u.email)
            .optional_field("age", Visibility::Protected, |u| &u.age, |u| &mut u.age)
            .static_property("registered", Visibility::Public, 0)
            .method(
                Signature::new("greet", Visibility::Public)
                    .with_docs("/** @param string $name desc here */")
                    .with_param(ParamInfo::new("name").with_type("string").with_default("default")),
                |u, mut args| {
                    let who: String = args.take(0)?;
                    Ok(Value::from(format!("Hello {who}, I am {}", u.name)))
                },
            )
            .static_method(
                Signature::new("normalize", Visibility::Public)
                    .with_param(ParamInfo::new("name").with_type("string")),
                |mut args| {
                    let name: String = args.take(0)?;
                    Ok(Value::from(name.trim().to_lowercase()))
                },
            )
            .method(
                Signature::new("hash", Visibility::Private)
                    .with_param(ParamInfo::new("salt").with_type("int")),
                |u, mut args| {
                    let salt: i64 = args.take(0)?;
                    Ok(Value::Int(u.name.len() as i64 * 31 + salt))
                },
            )
            .method(
                Signature::new("tag", Visibility::Public)
                    .with_docs(concat!(
                        "/**\n * Joins tags.\n *\n",
                        " * @param string $first The first tag\n",
                        " * @param string ...$rest\n */",
                    ))
                    .with_params([
                        ParamInfo::new("first").with_type("string"),
                        ParamInfo::new("rest").with_type("string").variadic(),
                    ]),
                |_, mut args| {
                    let mut tags: Vec<String> = Vec::from([args.take(0)?]);
                    tags.extend(args.take_rest::<String>(1)?);
                    Ok(Value::from(tags.join(",")))
                },
            )
            .method(
                Signature::new("swap", Visibility::Public).with_params([
                    ParamInfo::new("left").by_ref(),
                    ParamInfo::new("right").by_ref().with_type("?int").with_default(Value::Null),
                ]),
                |_, mut args| {
                    let left = args.take::<Value>(0)?;
                    let right = args.take::<Value>(1)?;
                    Ok(Value::List(Vec::from([right, left])))
                },
            )
            .method(Signature::new("name", Visibility::Public), |u, _| {
                Ok(Value::from(u.name.as_str()))
            })
            .method(Signature::new("label", Visibility::Public), |u, _| {
                Ok(Value::from(format!("user: {}", u.name)))
            })
            .method(Signature::new("fail", Visibility::Public), |_, _| {
                Err(InvokeError::failed("refused"))
            })
            .build()
    }

    fn register_dependencies(registry: &mut ClassRegistry) {
        registry.register::<Model>();
        registry.register::<Named>();
    }
}

// -----------------------------------------------------------------------------
// Secret

pub(crate) struct Secret {
    pub token: String,
    pub pin: i64,
}

impl GetClassInfo for Secret {
    fn get_class_info() -> ClassInfo {
        ClassBuilder::<Secret>::new("App\\Secret")
            .field("token", Visibility::Private, |s| &s.token, |s| &mut s.token)
            .field("pin", Visibility::Private, |s| &s.pin, |s| &mut s.pin)
            .build()
    }
}

// -----------------------------------------------------------------------------
// Fixture

/// A registry holding every class above.
pub(crate) fn fixture() -> ClassRegistry {
    let mut registry = ClassRegistry::empty();
    registry.register::<User>();
    registry.register::<Secret>();
    registry
}

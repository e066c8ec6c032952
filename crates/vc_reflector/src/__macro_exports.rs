//! Items used by exported macros. Not part of the public API.

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub mod auto_register {
    use core::any::TypeId;

    pub use inventory;

    use crate::registry::{ClassRegistry, GetClassInfo};

    /// A registration function submitted by `impl_auto_register!`.
    pub struct __AutoRegisterFunc(pub fn(&mut ClassRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Marks that `inventory` collected at least one submission.
    pub struct __AvailFlag;

    fn __mark_available(registry: &mut ClassRegistry) {
        registry.mark_registered(TypeId::of::<__AvailFlag>());
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub trait __RegisterClass: GetClassInfo + Sized {
        fn __register(registry: &mut ClassRegistry) {
            registry.register::<Self>();
        }
    }

    impl<T: GetClassInfo> __RegisterClass for T {}

    pub fn __register_classes(registry: &mut ClassRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}

/// Submits classes for [`ClassRegistry::auto_register`].
///
/// Each type must implement [`GetClassInfo`]. Without the `auto_register`
/// feature the macro expands to nothing.
///
/// # Examples
///
/// ```
/// use vc_reflector::impl_auto_register;
/// use vc_reflector::info::{ClassBuilder, ClassInfo};
/// use vc_reflector::registry::{ClassRegistry, GetClassInfo};
///
/// struct Invoice;
///
/// impl GetClassInfo for Invoice {
///     fn get_class_info() -> ClassInfo {
///         ClassBuilder::<Invoice>::new("Billing\\Invoice").build()
///     }
/// }
///
/// impl_auto_register!(Invoice);
///
/// let mut registry = ClassRegistry::empty();
/// if registry.auto_register() {
///     assert!(registry.contains("Billing\\Invoice"));
/// }
/// ```
///
/// [`ClassRegistry::auto_register`]: crate::registry::ClassRegistry::auto_register
/// [`GetClassInfo`]: crate::registry::GetClassInfo
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! impl_auto_register {
    ($($ty:ty),+ $(,)?) => {
        $(
            const _: () = {
                $crate::__macro_exports::auto_register::inventory::submit!{
                    $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                        <$ty as $crate::__macro_exports::auto_register::__RegisterClass>::__register
                    )
                }
            };
        )+
    };
}

/// Submits classes for [`ClassRegistry::auto_register`].
///
/// The `auto_register` feature is disabled, so this expands to nothing.
///
/// [`ClassRegistry::auto_register`]: crate::registry::ClassRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! impl_auto_register {
    ($($ty:ty),+ $(,)?) => {};
}

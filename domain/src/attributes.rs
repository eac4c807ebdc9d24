//! Typed partial records.
//!
//! Every entity has an attribute set: the same fields as the entity, each wrapped
//! in `Option`. An attribute set is what `create` and `update` accept, what a
//! factory definition produces, and what named states and overrides transform.
//! Nullable columns use `Option<Option<T>>` so "set to null" and "not given" stay
//! distinguishable.

/// Behaviour shared by all attribute sets.
pub trait Attributes: Clone + Default + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Layer `overrides` on top of `self`. Fields present in `overrides` win.
    fn merge(self, overrides: Self) -> Self;
}

/// Declare an attribute set with one builder-style setter per field.
macro_rules! attribute_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: Option<$ty>, )*
        }

        impl $name {
            $(
                #[doc = concat!("Set `", stringify!($field), "`.")]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl $crate::attributes::Attributes for $name {
            fn merge(self, overrides: Self) -> Self {
                Self {
                    $( $field: overrides.$field.or(self.$field), )*
                }
            }
        }
    };
}

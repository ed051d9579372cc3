//! Signal argument types for the sessiond D-Bus interfaces.

/// Declares a signal argument struct that can be matched, read and emitted.
macro_rules! signal {
    ($(#[$meta:meta])* $name:ident, $iface:expr, $member:literal { $($field:ident: $ty:ty),* }) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            $(pub $field: $ty,)*
        }

        impl dbus::arg::AppendAll for $name {
            fn append(&self, _i: &mut dbus::arg::IterAppend) {
                $(dbus::arg::RefArg::append(&self.$field, _i);)*
            }
        }

        impl dbus::arg::ReadAll for $name {
            fn read(_i: &mut dbus::arg::Iter) -> Result<Self, dbus::arg::TypeMismatchError> {
                Ok($name {
                    $($field: _i.read()?,)*
                })
            }
        }

        impl dbus::message::SignalArgs for $name {
            const NAME: &'static str = $member;
            const INTERFACE: &'static str = $iface;
        }
    };
}

pub mod audiosink;
pub mod session;

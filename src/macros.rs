/// Declares a configured codec: the public type, its [`Configure`](crate::builder::Configure) and
/// [`Codec`](crate::Codec) impls.
macro_rules! codec {
    (
        $(#[$attr:meta])*
        $name:ident<$param:ty> => $backend:ty,
        $(level: ($level:expr, $fastest:expr, $best:expr),)?
        backend: |$params:ident| $make:expr $(,)?
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            options: crate::params::CodecOptions<$param>,
        }

        impl $name {
            /// Creates a codec with every parameter at its default.
            pub fn new() -> Self {
                Self::default()
            }

            /// Starts configuring a codec.
            pub fn builder() -> crate::builder::CodecBuilder<Self> {
                crate::builder::CodecBuilder::new()
            }

            /// The parameters this codec was built with.
            pub fn params(&self) -> &crate::params::ParamTable<$param> {
                &self.options.params
            }
        }

        impl crate::builder::Configure for $name {
            type Param = $param;

            $(
                fn level_param() -> Option<($param, i64, i64)> {
                    Some(($level, $fastest, $best))
                }
            )?

            fn from_options(options: crate::params::CodecOptions<$param>) -> Self {
                Self { options }
            }
        }

        impl crate::convert::Codec for $name {
            type Backend = $backend;

            fn backend(&self) -> $backend {
                let $params = &self.options.params;
                $make
            }

            fn buffer_lengths(&self) -> crate::holder::BufferLengths {
                self.options.lengths
            }
        }
    };
}

/// Declares a parameter id enum with its names and application order.
macro_rules! params {
    (
        $(#[$attr:meta])*
        $name:ident {
            $($(#[$vattr:meta])* $variant:ident = $pname:literal,)*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum $name {
            $($(#[$vattr])* $variant,)*
        }

        impl $name {
            const ORDER: &'static [Self] = &[$(Self::$variant,)*];

            fn param_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $pname,)*
                }
            }
        }
    };
}

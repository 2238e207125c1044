//! Macro para declarar pasos como structs unitarios.
//!
//! ```ignore
//! wizard_step! {
//!     /// Paso de detalles.
//!     DetailsStep {
//!         id: "details",
//!         title: "Job Details",
//!         validate(data) {
//!             ValidationResult::valid().check(rules::present(data, "title"), "title", "Job title is required.")
//!         }
//!     }
//! }
//! ```
//!
//! Sin bloque `validate` el paso es siempre válido (pasos de revisión).

#[macro_export]
macro_rules! wizard_step {
    ($(#[$meta:meta])* $name:ident {
        id: $id:expr,
        title: $title:expr,
        validate($data:ident) $body:block
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::__private::WizardStep for $name {
            fn id(&self) -> &str {
                $id
            }
            fn title(&self) -> &str {
                $title
            }
            fn validate(&self, $data: &$crate::__private::FormData) -> $crate::__private::ValidationResult $body
        }
    };
    ($(#[$meta:meta])* $name:ident {
        id: $id:expr,
        title: $title:expr $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::__private::WizardStep for $name {
            fn id(&self) -> &str {
                $id
            }
            fn title(&self) -> &str {
                $title
            }
        }
    };
}

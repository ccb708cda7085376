use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives the `ParamValue` trait for enums.
///
/// This macro lets a unit-variant enum be stored in a shell `Parameter`. The
/// variant names are the accepted tokens, the enum name is the type hint shown
/// by `params`, and an unrecognized token falls back to the first variant.
///
/// # Example
///
/// ```ignore
/// use poll_shell::ParamValue;
///
/// #[derive(Copy, Clone, Debug, PartialEq, ParamValue)]
/// pub enum Mode {
///     Idle,
///     Walk,
///     Kick,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl ParamValue for Mode {
///     const TYPE_NAME: &'static str = "Mode";
///
///     fn from_token(token: &str) -> Self {
///         match token {
///             "Idle" => Self::Idle,
///             "Walk" => Self::Walk,
///             "Kick" => Self::Kick,
///             _ => Self::Idle,
///         }
///     }
///
///     fn write_value(&self, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
///         out.write_str(match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///             Self::Kick => "Kick",
///         })
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum with at least one variant
/// - All variants must be unit variants (no fields)
/// - The type must also implement `Copy`
#[proc_macro_derive(ParamValue)]
pub fn derive_param_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let type_name = name.to_string();

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return syn::Error::new_spanned(&input, "ParamValue can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "ParamValue can only be derived for enums with unit variants (no fields)",
            )
            .to_compile_error()
            .into();
        }
    }

    let Some(fallback) = variants.first().map(|variant| &variant.ident) else {
        return syn::Error::new_spanned(&input, "ParamValue requires at least one variant")
            .to_compile_error()
            .into();
    };

    let from_token_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let variant_str = variant_name.to_string();
        quote! {
            #variant_str => Self::#variant_name
        }
    });

    let write_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let variant_str = variant_name.to_string();
        quote! {
            Self::#variant_name => #variant_str
        }
    });

    let expanded = quote! {
        impl ::poll_shell::ParamValue for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn from_token(token: &str) -> Self {
                match token {
                    #(#from_token_arms,)*
                    _ => Self::#fallback,
                }
            }

            fn write_value(
                &self,
                out: &mut dyn ::core::fmt::Write,
            ) -> ::core::fmt::Result {
                out.write_str(match self {
                    #(#write_arms,)*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

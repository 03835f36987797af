use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Result as SynResult, Type};

struct FieldDef {
    ident: syn::Ident,
    ty: Type,
    name: String,
    opaque: bool,
}

#[derive(Default)]
struct LinkAttrs {
    rename: Option<String>,
    skip: bool,
    opaque: bool,
}

fn parse_link_attrs(attrs: &[syn::Attribute]) -> SynResult<LinkAttrs> {
    let mut out = LinkAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("link_param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("opaque") {
                out.opaque = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"`, `skip` or `opaque`"))
            }
        })?;
    }
    Ok(out)
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(p) = ty {
        if let Some(seg) = p.path.segments.last() {
            return seg.ident == "Option";
        }
    }
    false
}

fn collect_fields(input: &DeriveInput) -> SynResult<Vec<FieldDef>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "LinkParams can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "LinkParams can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let attrs = parse_link_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = attrs.rename.unwrap_or_else(|| {
            let raw = ident.to_string();
            raw.strip_prefix("r#").map(str::to_string).unwrap_or(raw)
        });
        fields.push(FieldDef {
            ident,
            ty: field.ty.clone(),
            name,
            opaque: attrs.opaque,
        });
    }
    Ok(fields)
}

fn expand(input: DeriveInput) -> SynResult<TokenStream2> {
    let fields = collect_fields(&input)?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let inserts = fields.iter().map(|f| {
        let field = &f.ident;
        let name = &f.name;
        if f.opaque && is_option(&f.ty) {
            quote! {
                bag.insert(#name, match &self.#field {
                    ::core::option::Option::Some(v) => ::brrtlink::params::ParamValue::Opaque(v.to_string()),
                    ::core::option::Option::None => ::brrtlink::params::ParamValue::Null,
                });
            }
        } else if f.opaque {
            quote! {
                bag.insert(#name, ::brrtlink::params::ParamValue::Opaque(self.#field.to_string()));
            }
        } else {
            quote! {
                bag.insert(#name, ::brrtlink::params::ParamField::to_param_value(&self.#field));
            }
        }
    });

    let shapes = fields.iter().map(|f| {
        let ty = &f.ty;
        let name = &f.name;
        if f.opaque {
            quote! { ::brrtlink::params::FieldShape::leaf(#name) }
        } else {
            quote! {
                ::brrtlink::params::FieldShape {
                    name: #name,
                    kind: <#ty as ::brrtlink::params::ParamField>::field_shape(),
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::brrtlink::params::ToParams for #ident #ty_generics #where_clause {
            fn to_params(&self) -> ::brrtlink::params::ParamBag {
                let mut bag = ::brrtlink::params::ParamBag::new();
                #(#inserts)*
                bag
            }
        }

        impl #impl_generics ::brrtlink::params::ParamShape for #ident #ty_generics #where_clause {
            fn param_shape() -> ::std::vec::Vec<::brrtlink::params::FieldShape> {
                ::std::vec![#(#shapes),*]
            }
        }

        impl #impl_generics ::brrtlink::params::ParamField for #ident #ty_generics #where_clause {
            fn to_param_value(&self) -> ::brrtlink::params::ParamValue {
                ::brrtlink::params::ParamValue::Object(::brrtlink::params::ToParams::to_params(self))
            }

            fn field_shape() -> ::brrtlink::params::ShapeKind {
                ::brrtlink::params::ShapeKind::Nested(
                    <Self as ::brrtlink::params::ParamShape>::param_shape(),
                )
            }
        }
    })
}

/// Derive `ToParams`, `ParamShape` and `ParamField` for a struct with named fields.
///
/// Fields are enumerated in declaration order. Field attributes:
///
/// - `#[link_param(rename = "Name")]` changes the property name
/// - `#[link_param(skip)]` leaves the field out entirely
/// - `#[link_param(opaque)]` renders the field through `Display` as a single value
///   instead of flattening it
#[proc_macro_derive(LinkParams, attributes(link_param))]
pub fn derive_link_params(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
